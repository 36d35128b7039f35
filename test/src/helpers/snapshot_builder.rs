use tamer_shared::{
    ActionKind, ActionLog, ActionOption, BattleId, BattleSnapshot, MonsterId, Reward,
};

/// Fluent builder for battle snapshots in tests
pub struct SnapshotBuilder {
    snapshot: BattleSnapshot,
}

impl SnapshotBuilder {
    /// An in-progress battle between two monsters at full health, nobody's turn
    pub fn new(battle_id: &str, challenger: &str, opponent: &str) -> Self {
        Self {
            snapshot: BattleSnapshot {
                battle_id: BattleId::from(battle_id),
                challenger_monster_id: MonsterId::from(challenger),
                opponent_monster_id: MonsterId::from(opponent),
                challenger_hp: 100,
                opponent_hp: 100,
                challenger_stamina: 10,
                opponent_stamina: 10,
                turn_time_limit_ms: 15_000,
                ..BattleSnapshot::default()
            },
        }
    }

    /// A bare rejection
    pub fn rejected() -> BattleSnapshot {
        BattleSnapshot {
            rejected: true,
            ..BattleSnapshot::default()
        }
    }

    pub fn hp(mut self, challenger: u32, opponent: u32) -> Self {
        self.snapshot.challenger_hp = challenger;
        self.snapshot.opponent_hp = opponent;
        self
    }

    pub fn stamina(mut self, challenger: u32, opponent: u32) -> Self {
        self.snapshot.challenger_stamina = challenger;
        self.snapshot.opponent_stamina = opponent;
        self
    }

    pub fn turn(mut self, monster_id: &str, ends_at_ms: i64) -> Self {
        self.snapshot.current_turn_monster_id = Some(MonsterId::from(monster_id));
        self.snapshot.turn_ends_at_ms = Some(ends_at_ms);
        self
    }

    pub fn no_turn(mut self) -> Self {
        self.snapshot.current_turn_monster_id = None;
        self.snapshot.turn_ends_at_ms = None;
        self
    }

    pub fn turn_time_limit(mut self, millis: u64) -> Self {
        self.snapshot.turn_time_limit_ms = millis;
        self
    }

    pub fn server_now(mut self, server_now_ms: i64) -> Self {
        self.snapshot.server_now_ms = Some(server_now_ms);
        self
    }

    pub fn last_action(mut self, monster_id: &str, damage: u32, stamina_gained: i32) -> Self {
        self.snapshot.last_action_log = Some(ActionLog {
            monster_id: MonsterId::from(monster_id),
            damage,
            stamina_gained,
        });
        self
    }

    pub fn winner(mut self, monster_id: &str) -> Self {
        self.snapshot.winner_monster_id = Some(MonsterId::from(monster_id));
        self.snapshot.current_turn_monster_id = None;
        self.snapshot.turn_ends_at_ms = None;
        self
    }

    pub fn rewards(mut self, challenger: Reward, opponent: Reward) -> Self {
        self.snapshot.challenger_reward = Some(challenger);
        self.snapshot.opponent_reward = Some(opponent);
        self
    }

    /// Give both monsters the same standard set of actions:
    /// `bite` (attack, 3), `slam` (attack, 6), `guard` (defense, 2)
    pub fn standard_actions(mut self) -> Self {
        let actions = vec![
            ActionOption::new("bite", ActionKind::Attack, 3),
            ActionOption::new("slam", ActionKind::Attack, 6),
            ActionOption::new("guard", ActionKind::Defense, 2),
        ];
        self.snapshot.challenger_actions = actions.clone();
        self.snapshot.opponent_actions = actions;
        self
    }

    pub fn sequence(mut self, sequence: u64) -> Self {
        self.snapshot.sequence = Some(sequence);
        self
    }

    pub fn build(self) -> BattleSnapshot {
        self.snapshot
    }
}
