use std::env;

use log::{debug, info, warn};

use tamer_client::{
    shared::{ActionId, ActionKind, BattleId, MonsterId, Timestamp},
    transport::ws,
    AutoPassEvent, BattleEvents, BattleFinishedEvent, BattleResult, BattleSession, BattleView,
    Channel, ClientConfig, ErrorEvent, SessionIdentity, SessionPhase, SessionRejectedEvent,
    TurnChangedEvent,
};

/// Prints hits and the final banner instead of animating them
struct LogView;

impl BattleView for LogView {
    fn play_self_hit(&mut self, damage: u32) {
        info!("Our monster took {} damage", damage);
    }

    fn play_opponent_hit(&mut self, damage: u32) {
        info!("Enemy monster took {} damage", damage);
    }

    fn show_result(&mut self, result: &BattleResult) {
        if result.win {
            info!("*** VICTORY *** reward: {:?}", result.reward);
        } else {
            info!("*** DEFEAT *** winner: {}", result.winner);
        }
    }

    fn play_attack(&mut self, attack_id: &ActionId) {
        info!("Attacking with {}", attack_id);
    }
}

pub struct App {
    session: BattleSession,
    auto_attack: bool,
}

impl App {
    pub fn default() -> Self {
        info!("Tamer Battle Client Demo started");

        let url = env_or("TAMER_URL", "ws://127.0.0.1:14191/battle");
        let token = env_or("TAMER_TOKEN", "dev-token");
        let identity = SessionIdentity::new(
            env::var("TAMER_BATTLE_ID").ok().map(BattleId::from),
            MonsterId::from(env_or("TAMER_MONSTER_ID", "monster-1")),
            MonsterId::from(env_or("TAMER_OPPONENT_ID", "monster-2")),
            token.clone(),
        );

        let socket = ws::Socket::new(&url, ws::WsConfig::default());
        let channel = Channel::connect(socket, &token);
        let session = BattleSession::new(
            ClientConfig::default(),
            channel,
            identity,
            Box::new(LogView),
            Timestamp::now_millis(),
        );

        App {
            session,
            auto_attack: env::var("TAMER_AUTO_ATTACK").is_ok(),
        }
    }

    pub fn is_running(&self) -> bool {
        !matches!(
            self.session.phase(),
            SessionPhase::Rejected | SessionPhase::Closed
        )
    }

    pub fn update(&mut self) {
        let now = Timestamp::now_millis();
        self.session.update(now);

        let mut events = self.session.take_events();
        if events.is_empty() {
            return;
        }
        self.handle_events(&mut events, now);
    }

    fn handle_events(&mut self, events: &mut BattleEvents, now: i64) {
        for error in events.read::<SessionRejectedEvent>() {
            warn!("{}", error);
        }
        for change in events.read::<TurnChangedEvent>() {
            if change.is_my_turn {
                let state = self.session.state();
                info!(
                    "Our turn: hp {} vs {}, stamina {}, {:.0}% of the turn left",
                    state.self_hp,
                    state.enemy_hp,
                    state.self_stamina,
                    state.remaining_turn_fraction(self.session.server_now(now)) * 100.0
                );
                if self.auto_attack {
                    self.attack();
                }
            } else {
                debug!("Turn now belongs to {:?}", change.current_turn);
            }
        }
        for deadline in events.read::<AutoPassEvent>() {
            info!("Turn timed out at {}, passed", deadline);
        }
        for _ in events.read::<BattleFinishedEvent>() {
            info!("Battle over, closing session");
            self.session.close();
        }
        for error in events.read::<ErrorEvent>() {
            warn!("Client Error: {}", error);
        }
    }

    // Pick the cheapest affordable attack
    fn attack(&mut self) {
        let state = self.session.state();
        let choice = state
            .my_actions
            .iter()
            .filter(|action| action.kind == ActionKind::Attack)
            .filter(|action| action.stamina_cost <= state.self_stamina)
            .min_by_key(|action| action.stamina_cost)
            .map(|action| action.id.clone());

        if let Err(err) = self.session.submit(choice, None) {
            warn!("Could not submit action: {}", err);
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
