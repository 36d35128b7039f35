use tamer_shared::{BattleSnapshot, MonsterId, SnapshotKind};

use crate::battle::state::{BattleResult, BattleStatus, LocalBattleState};

/// Which monster an incoming hit landed on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    SelfMonster { damage: u32 },
    Enemy { damage: u32 },
}

/// Side effects a snapshot calls for, derived alongside the new state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectionSignals {
    /// The snapshot replaced the local state
    pub applied: bool,
    /// First rejection seen for this session
    pub rejected: bool,
    /// First terminal snapshot seen for this session
    pub finished: Option<BattleResult>,
    /// Turn owner differs from the previous state
    pub turn_changed: bool,
    pub hits: Vec<HitTarget>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    pub state: LocalBattleState,
    pub signals: ProjectionSignals,
}

impl Projection {
    fn unchanged(previous: &LocalBattleState) -> Self {
        Self {
            state: previous.clone(),
            signals: ProjectionSignals::default(),
        }
    }
}

/// Fold one snapshot into the local battle state.
///
/// Every applied snapshot is treated as fully authoritative and overwrites
/// the previous state. Snapshots are discarded, leaving the state as is,
/// when:
/// * the session already finished or was rejected (duplicate terminal
///   snapshots are therefore harmless),
/// * the snapshot belongs to a different battle or does not include
///   `self_monster_id`,
/// * both sides carry a sequence number and the snapshot's is not newer.
///
/// Without sequence numbers a stale snapshot that arrives late still wins.
pub fn project(
    previous: &LocalBattleState,
    snapshot: &BattleSnapshot,
    self_monster_id: &MonsterId,
) -> Projection {
    if previous.is_over() {
        return Projection::unchanged(previous);
    }

    if snapshot.kind() == SnapshotKind::Rejected {
        let mut state = previous.clone();
        state.status = BattleStatus::Rejected;
        state.current_turn = None;
        state.is_my_turn = false;
        state.turn_ends_at_ms = None;
        return Projection {
            state,
            signals: ProjectionSignals {
                rejected: true,
                ..ProjectionSignals::default()
            },
        };
    }

    if !previous.battle_id.is_empty() && snapshot.battle_id != previous.battle_id {
        return Projection::unchanged(previous);
    }

    if let (Some(incoming), Some(last)) = (snapshot.sequence, previous.last_sequence) {
        if incoming <= last {
            return Projection::unchanged(previous);
        }
    }

    let Some(self_role) = snapshot.role_of(self_monster_id) else {
        return Projection::unchanged(previous);
    };
    let enemy_role = self_role.other();
    let enemy_monster_id = snapshot.monster_id(enemy_role).clone();

    let terminated = snapshot.kind() == SnapshotKind::Terminated;
    let current_turn = if terminated {
        None
    } else {
        snapshot.current_turn_monster_id.clone()
    };
    let is_my_turn = current_turn.as_ref() == Some(self_monster_id);

    let mut signals = ProjectionSignals {
        applied: true,
        turn_changed: current_turn != previous.current_turn,
        ..ProjectionSignals::default()
    };

    // the first snapshot after joining may carry an action resolved before
    // we arrived; only later changes are animated
    let fresh_action = snapshot
        .last_action_log
        .as_ref()
        .filter(|_| !previous.is_loading());
    if let Some(action) = fresh_action {
        if previous.last_action.as_ref() != Some(action) && action.damage > 0 {
            if action.monster_id == *self_monster_id {
                signals.hits.push(HitTarget::Enemy {
                    damage: action.damage,
                });
            } else if action.monster_id == enemy_monster_id {
                signals.hits.push(HitTarget::SelfMonster {
                    damage: action.damage,
                });
            }
        }
    }

    let result = match &snapshot.winner_monster_id {
        Some(winner) => {
            let result = BattleResult {
                win: winner == self_monster_id,
                winner: winner.clone(),
                reward: snapshot.reward(self_role).cloned(),
            };
            signals.finished = Some(result.clone());
            Some(result)
        }
        None => None,
    };

    let state = LocalBattleState {
        battle_id: snapshot.battle_id.clone(),
        self_monster_id: self_monster_id.clone(),
        enemy_monster_id: Some(enemy_monster_id),
        self_role: Some(self_role),
        status: if terminated {
            BattleStatus::Finished
        } else {
            BattleStatus::Active
        },
        self_hp: snapshot.hp(self_role),
        enemy_hp: snapshot.hp(enemy_role),
        self_stamina: snapshot.stamina(self_role),
        enemy_stamina: snapshot.stamina(enemy_role),
        current_turn,
        is_my_turn,
        turn_ends_at_ms: if terminated {
            None
        } else {
            snapshot.turn_ends_at_ms
        },
        turn_time_limit_ms: snapshot.turn_time_limit_ms,
        last_action: snapshot.last_action_log.clone(),
        my_actions: snapshot.actions(self_role).to_vec(),
        enemy_actions: snapshot.actions(enemy_role).to_vec(),
        result,
        last_sequence: snapshot.sequence.or(previous.last_sequence),
    };

    Projection { state, signals }
}
