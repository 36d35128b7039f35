use std::collections::HashSet;

use log::{debug, info, warn};

use tamer_shared::{
    events, ActionId, BattleAction, BattleId, BattleSnapshot, ClientMessage, Frame, JoinBattle,
    MonsterId, ServerMessage, StatusProbe,
};

use crate::{
    battle::{
        deadline_watcher::{TurnDeadlineWatcher, WatcherState},
        projector::{project, HitTarget},
        state::LocalBattleState,
        submitter::{validate_submission, SubmitError},
    },
    client_config::ClientConfig,
    connection::{clock_reconciler::ClockReconciler, silence_monitor::SilenceMonitor},
    error::TamerClientError,
    events::{BattleEvents, TurnChange},
    transport::{Channel, ListenerKey},
    view::BattleView,
};

/// Identifiers supplied by the authenticated-identity provider. Any of them
/// may still be unknown when the session is created.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SessionIdentity {
    /// Battle to join; `None` asks the server to create one
    pub battle_id: Option<BattleId>,
    pub self_monster_id: Option<MonsterId>,
    pub opponent_monster_id: Option<MonsterId>,
    pub token: Option<String>,
}

impl SessionIdentity {
    pub fn new(
        battle_id: Option<BattleId>,
        self_monster_id: MonsterId,
        opponent_monster_id: MonsterId,
        token: impl Into<String>,
    ) -> Self {
        Self {
            battle_id,
            self_monster_id: Some(self_monster_id),
            opponent_monster_id: Some(opponent_monster_id),
            token: Some(token.into()),
        }
    }

    /// True once everything needed to join is known
    pub fn is_complete(&self) -> bool {
        self.self_monster_id.is_some() && self.opponent_monster_id.is_some() && self.token.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Running,
    /// A terminal snapshot arrived; duplicates are still accepted
    Finished,
    /// The server refused the session; nothing more is sent or processed
    Rejected,
    /// Torn down by the application
    Closed,
}

/// Drives one battle: joins it, keeps the clock offset, watches our turn
/// deadline, probes a silent server, and projects every pushed snapshot.
///
/// All work happens inside [`BattleSession::update`] and the other `&mut self`
/// calls, on the caller's thread. Nothing is scheduled in the background, so
/// dropping or closing the session leaves no timer behind.
pub struct BattleSession {
    config: ClientConfig,
    channel: Channel,
    listener: Option<ListenerKey>,
    identity: SessionIdentity,
    joined: HashSet<SessionIdentity>,
    clock: ClockReconciler,
    watcher: TurnDeadlineWatcher,
    silence: SilenceMonitor,
    state: LocalBattleState,
    view: Box<dyn BattleView>,
    events: BattleEvents,
    phase: SessionPhase,
    incoming: Vec<Frame>,
}

impl BattleSession {
    pub fn new(
        config: ClientConfig,
        mut channel: Channel,
        identity: SessionIdentity,
        view: Box<dyn BattleView>,
        now_ms: i64,
    ) -> Self {
        let listener = Some(channel.on(events::BATTLE_STATE));
        let state = placeholder_state(&identity);

        Self {
            clock: ClockReconciler::new(config.max_clock_skew),
            watcher: TurnDeadlineWatcher::new(config.turn_poll_interval),
            silence: SilenceMonitor::new(config.heartbeat_interval, config.silence_threshold, now_ms),
            config,
            channel,
            listener,
            identity,
            joined: HashSet::new(),
            state,
            view,
            events: BattleEvents::new(),
            phase: SessionPhase::Running,
            incoming: Vec::new(),
        }
    }

    // Public

    pub fn state(&self) -> &LocalBattleState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn identity(&self) -> &SessionIdentity {
        &self.identity
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn clock(&self) -> &ClockReconciler {
        &self.clock
    }

    pub fn watcher_state(&self) -> WatcherState {
        self.watcher.state()
    }

    pub fn is_connected(&self) -> bool {
        self.channel.is_connected()
    }

    /// Reconciled server time at `local_now_ms`
    pub fn server_now(&self, local_now_ms: i64) -> i64 {
        self.clock.now(local_now_ms)
    }

    /// Take every event collected since the last call
    pub fn take_events(&mut self) -> BattleEvents {
        self.events.take()
    }

    /// Replace the identifiers from the identity provider. Joins as soon as
    /// a new complete combination becomes available.
    pub fn set_identity(&mut self, identity: SessionIdentity) {
        if identity == self.identity {
            return;
        }
        if self.state.is_loading() {
            self.state = placeholder_state(&identity);
        } else if identity.self_monster_id != self.identity.self_monster_id {
            warn!("Local monster changed mid-battle; keeping the current battle state");
        }
        self.identity = identity;
        self.try_bootstrap();
    }

    /// Run one step: join if needed, apply pushed snapshots, check for a
    /// silent server and check our turn deadline. Call this from the host's
    /// frame or timer loop with the current local time.
    pub fn update(&mut self, local_now_ms: i64) {
        if !self.is_live() {
            return;
        }

        self.try_bootstrap();
        self.receive_all(local_now_ms);

        if self.phase != SessionPhase::Running {
            return;
        }

        if self.silence.check_due(local_now_ms) {
            self.check_silence(local_now_ms);
        }
        self.check_deadline(local_now_ms);
    }

    /// The application returned to the foreground. Timers may have been
    /// paused while backgrounded, so the silence check runs right away.
    pub fn visibility_regained(&mut self, local_now_ms: i64) {
        if self.phase != SessionPhase::Running {
            return;
        }
        self.receive_all(local_now_ms);
        if self.phase != SessionPhase::Running {
            return;
        }
        self.check_silence(local_now_ms);
        self.check_deadline(local_now_ms);
    }

    /// Submit the chosen attack and/or defense. Preconditions are checked
    /// locally first; on failure nothing is sent. A valid action sent while
    /// disconnected is dropped silently.
    pub fn submit(
        &mut self,
        attack_id: Option<ActionId>,
        defense_id: Option<ActionId>,
    ) -> Result<(), SubmitError> {
        if self.phase != SessionPhase::Running {
            return Err(SubmitError::BattleOver);
        }
        let request = validate_submission(&self.state, attack_id, defense_id)?;

        if let Some(attack_id) = &request.attack_id {
            self.view.play_attack(attack_id);
        }
        self.channel.emit(&ClientMessage::SubmitAction(request));
        Ok(())
    }

    /// Tear the session down: stop listening for pushes and stop all timers
    pub fn close(&mut self) {
        if self.phase == SessionPhase::Closed {
            return;
        }
        self.stop_listening();
        self.watcher.cancel();
        self.phase = SessionPhase::Closed;
        debug!("Battle session '{}' closed", self.state.battle_id);
    }

    /// Close the session and hand back its channel for reuse
    pub fn into_channel(mut self) -> Channel {
        self.close();
        self.channel
    }

    // Private

    fn is_live(&self) -> bool {
        matches!(self.phase, SessionPhase::Running | SessionPhase::Finished)
    }

    fn try_bootstrap(&mut self) {
        if self.phase != SessionPhase::Running
            || !self.identity.is_complete()
            || self.joined.contains(&self.identity)
        {
            return;
        }
        let Some(monster_id) = self.identity.self_monster_id.clone() else {
            return;
        };
        let message = ClientMessage::JoinBattle(JoinBattle {
            battle_id: self.identity.battle_id.clone(),
            monster_id: monster_id.clone(),
        });
        // only a join that reached the transport counts, so one attempted
        // while offline is retried on the next update
        if self.channel.emit(&message) {
            info!("Joining battle as {}", monster_id);
            self.joined.insert(self.identity.clone());
        }
    }

    fn receive_all(&mut self, local_now_ms: i64) {
        let mut frames = std::mem::take(&mut self.incoming);
        if let Err(err) = self.channel.receive(&mut frames) {
            self.events.push_error(err.into());
        }

        for frame in frames.drain(..) {
            if !self.is_live() {
                break;
            }
            match ServerMessage::decode(&frame.event, frame.data) {
                Ok(Some(ServerMessage::BattleState(snapshot))) => {
                    self.handle_snapshot(snapshot, local_now_ms);
                }
                Ok(None) => {}
                Err(err) => {
                    warn!("Discarding push event: {}", err);
                    self.events.push_error(err.into());
                }
            }
        }
        self.incoming = frames;
    }

    fn handle_snapshot(&mut self, snapshot: BattleSnapshot, local_now_ms: i64) {
        self.silence.mark_heard(local_now_ms);

        if let Some(server_now_ms) = snapshot.server_now_ms {
            self.clock.observe(server_now_ms, local_now_ms);
        }

        let self_monster_id = match &self.identity.self_monster_id {
            Some(monster_id) => monster_id.clone(),
            None if snapshot.rejected => MonsterId::default(),
            None => {
                debug!("Ignoring battle state: local monster not known yet");
                return;
            }
        };

        let projection = project(&self.state, &snapshot, &self_monster_id);
        self.state = projection.state;
        let signals = projection.signals;

        if signals.rejected {
            self.reject();
            return;
        }
        if !signals.applied {
            return;
        }

        for hit in &signals.hits {
            match *hit {
                HitTarget::SelfMonster { damage } => self.view.play_self_hit(damage),
                HitTarget::Enemy { damage } => self.view.play_opponent_hit(damage),
            }
        }

        if signals.turn_changed {
            self.events.push_turn_change(TurnChange {
                current_turn: self.state.current_turn.clone(),
                is_my_turn: self.state.is_my_turn,
            });
        }
        self.events.push_applied_snapshot(snapshot.sequence);

        if let Some(result) = signals.finished {
            info!(
                "Battle '{}' finished, winner {}",
                self.state.battle_id, result.winner
            );
            self.phase = SessionPhase::Finished;
            self.watcher.cancel();
            self.view.show_result(&result);
            self.events.push_finish(result);
            return;
        }

        self.watcher
            .sync(self.state.is_my_turn, self.state.turn_ends_at_ms);
    }

    fn reject(&mut self) {
        let battle_id = self.state.battle_id.clone();
        warn!("Server rejected battle session '{}'", battle_id);
        self.phase = SessionPhase::Rejected;
        self.watcher.cancel();
        self.stop_listening();
        self.events
            .push_rejection(TamerClientError::SessionRejected { battle_id });
    }

    fn stop_listening(&mut self) {
        if let Some(listener) = self.listener.take() {
            self.channel.off(listener);
        }
    }

    fn check_silence(&mut self, local_now_ms: i64) {
        if !self.silence.is_silent(local_now_ms) || !self.channel.is_connected() {
            return;
        }
        let Some(battle_id) = self.known_battle_id() else {
            debug!("Server silent but no battle id known yet, skipping status probe");
            return;
        };
        debug!(
            "No battle state for {} ms, probing server",
            local_now_ms - self.silence.last_heard_ms()
        );
        if self
            .channel
            .emit(&ClientMessage::StatusProbe(StatusProbe { battle_id }))
        {
            self.silence.mark_heard(local_now_ms);
        }
    }

    fn check_deadline(&mut self, local_now_ms: i64) {
        let server_now_ms = self.clock.now(local_now_ms);
        let Some(deadline_ms) = self.watcher.poll(local_now_ms, server_now_ms) else {
            return;
        };
        info!("Turn deadline {} reached, passing", deadline_ms);
        let pass = BattleAction::pass(
            self.state.battle_id.clone(),
            self.state.self_monster_id.clone(),
        );
        // the guard keeps this deadline either way; a dropped pass is left
        // to the server's own turn timeout
        if self.channel.emit(&ClientMessage::BattleAction(pass)) {
            self.events.push_auto_pass(deadline_ms);
        }
    }

    fn known_battle_id(&self) -> Option<BattleId> {
        if !self.state.battle_id.is_empty() {
            return Some(self.state.battle_id.clone());
        }
        self.identity.battle_id.clone()
    }
}

fn placeholder_state(identity: &SessionIdentity) -> LocalBattleState {
    LocalBattleState::new(
        identity.battle_id.clone().unwrap_or_default(),
        identity.self_monster_id.clone().unwrap_or_default(),
    )
}
