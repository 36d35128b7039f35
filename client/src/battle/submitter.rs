use thiserror::Error;

use tamer_shared::{ActionId, ActionKind, SubmitAction};

use crate::battle::state::{BattleStatus, LocalBattleState};

/// Reasons a locally chosen action is refused before reaching the network
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// No snapshot has arrived yet
    #[error("Battle is still loading")]
    Loading,

    /// The battle finished or the session was rejected
    #[error("Battle is over")]
    BattleOver,

    /// Another monster holds the turn
    #[error("It is not your turn")]
    NotYourTurn,

    /// The action id is not in the local monster's available actions
    #[error("Unknown action '{action_id}'")]
    UnknownAction {
        action_id: ActionId,
    },

    /// The action exists but was chosen in the wrong slot
    #[error("Action '{action_id}' cannot be used as {expected:?}")]
    WrongActionKind {
        action_id: ActionId,
        expected: ActionKind,
    },

    /// The chosen actions cost more stamina than the monster has
    #[error("Not enough stamina: actions cost {required}, {available} available")]
    InsufficientStamina {
        required: u64,
        available: u32,
    },
}

/// Check a chosen attack/defense pair against the current battle state and
/// build the request to send.
///
/// Nothing is sent here; a failed check never reaches the transport.
pub fn validate_submission(
    state: &LocalBattleState,
    attack_id: Option<ActionId>,
    defense_id: Option<ActionId>,
) -> Result<SubmitAction, SubmitError> {
    match state.status {
        BattleStatus::Loading => return Err(SubmitError::Loading),
        BattleStatus::Finished | BattleStatus::Rejected => return Err(SubmitError::BattleOver),
        BattleStatus::Active => {}
    }

    if state.current_turn.as_ref() != Some(&state.self_monster_id) {
        return Err(SubmitError::NotYourTurn);
    }

    let mut required: u64 = 0;
    for (action_id, expected) in [
        (&attack_id, ActionKind::Attack),
        (&defense_id, ActionKind::Defense),
    ] {
        let Some(action_id) = action_id else {
            continue;
        };
        let Some(action) = state.my_action(action_id) else {
            return Err(SubmitError::UnknownAction {
                action_id: action_id.clone(),
            });
        };
        if action.kind != expected {
            return Err(SubmitError::WrongActionKind {
                action_id: action_id.clone(),
                expected,
            });
        }
        required += u64::from(action.stamina_cost);
    }

    if required > u64::from(state.self_stamina) {
        return Err(SubmitError::InsufficientStamina {
            required,
            available: state.self_stamina,
        });
    }

    Ok(SubmitAction {
        battle_id: state.battle_id.clone(),
        monster_id: state.self_monster_id.clone(),
        attack_id,
        defense_id,
    })
}
