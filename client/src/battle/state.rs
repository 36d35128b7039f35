use tamer_shared::{ActionId, ActionLog, ActionOption, BattleId, MonsterId, Reward, Role};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleStatus {
    /// No snapshot applied yet
    Loading,
    Active,
    Finished,
    Rejected,
}

/// Outcome of a finished battle from the local monster's point of view
#[derive(Clone, Debug, PartialEq)]
pub struct BattleResult {
    pub win: bool,
    pub winner: MonsterId,
    pub reward: Option<Reward>,
}

/// The local view of a battle, derived from the latest applied snapshot.
///
/// Only [`crate::project`] produces new values of this type; everything else
/// reads it.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalBattleState {
    pub battle_id: BattleId,
    pub self_monster_id: MonsterId,
    pub enemy_monster_id: Option<MonsterId>,
    pub self_role: Option<Role>,
    pub status: BattleStatus,
    pub self_hp: u32,
    pub enemy_hp: u32,
    pub self_stamina: u32,
    pub enemy_stamina: u32,
    pub current_turn: Option<MonsterId>,
    pub is_my_turn: bool,
    pub turn_ends_at_ms: Option<i64>,
    pub turn_time_limit_ms: u64,
    pub last_action: Option<ActionLog>,
    pub my_actions: Vec<ActionOption>,
    pub enemy_actions: Vec<ActionOption>,
    pub result: Option<BattleResult>,
    pub last_sequence: Option<u64>,
}

impl LocalBattleState {
    /// Placeholder state used until the first snapshot arrives
    pub fn new(battle_id: BattleId, self_monster_id: MonsterId) -> Self {
        Self {
            battle_id,
            self_monster_id,
            enemy_monster_id: None,
            self_role: None,
            status: BattleStatus::Loading,
            self_hp: 0,
            enemy_hp: 0,
            self_stamina: 0,
            enemy_stamina: 0,
            current_turn: None,
            is_my_turn: false,
            turn_ends_at_ms: None,
            turn_time_limit_ms: 0,
            last_action: None,
            my_actions: Vec::new(),
            enemy_actions: Vec::new(),
            result: None,
            last_sequence: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == BattleStatus::Loading
    }

    /// True once the battle has finished or the session was rejected
    pub fn is_over(&self) -> bool {
        matches!(self.status, BattleStatus::Finished | BattleStatus::Rejected)
    }

    /// Look up one of the local monster's available actions
    pub fn my_action(&self, action_id: &ActionId) -> Option<&ActionOption> {
        self.my_actions.iter().find(|action| action.id == *action_id)
    }

    /// Milliseconds left in the current turn at the given server time
    pub fn remaining_turn_ms(&self, server_now_ms: i64) -> Option<i64> {
        self.turn_ends_at_ms
            .map(|ends_at_ms| ends_at_ms.saturating_sub(server_now_ms).max(0))
    }

    /// Share of the turn window still left, in `[0, 1]`. Zero when no turn
    /// is running.
    pub fn remaining_turn_fraction(&self, server_now_ms: i64) -> f64 {
        let Some(remaining_ms) = self.remaining_turn_ms(server_now_ms) else {
            return 0.0;
        };
        if self.turn_time_limit_ms == 0 {
            return 0.0;
        }
        (remaining_ms as f64 / self.turn_time_limit_ms as f64).clamp(0.0, 1.0)
    }
}
