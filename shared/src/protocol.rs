use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    snapshot::BattleSnapshot,
    types::{ActionId, BattleId, MonsterId},
    wire::error::WireError,
};

/// Event names spoken on the push channel
pub mod events {
    /// Server → client: authoritative battle state
    pub const BATTLE_STATE: &str = "battle_state";
    /// Client → server: join an existing battle or create it
    pub const JOIN_BATTLE: &str = "join_battle";
    /// Client → server: ask the server to resend the current state
    pub const BATTLE_STATUS: &str = "battle_status";
    /// Client → server: attack and/or defend
    pub const SUBMIT_ACTION: &str = "submit_action";
    /// Client → server: typed battle action, currently only PASS
    pub const BATTLE_ACTION: &str = "battle_action";
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinBattle {
    /// `None` asks the server to create the battle
    pub battle_id: Option<BattleId>,
    pub monster_id: MonsterId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusProbe {
    pub battle_id: BattleId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAction {
    pub battle_id: BattleId,
    pub monster_id: MonsterId,
    pub attack_id: Option<ActionId>,
    pub defense_id: Option<ActionId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Pass,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleAction {
    pub battle_id: BattleId,
    pub monster_id: MonsterId,
    pub action_type: ActionType,
    pub action_id: Option<ActionId>,
}

impl BattleAction {
    pub fn pass(battle_id: BattleId, monster_id: MonsterId) -> Self {
        Self {
            battle_id,
            monster_id,
            action_type: ActionType::Pass,
            action_id: None,
        }
    }
}

/// Every message the client may emit. All of them are fire-and-forget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientMessage {
    JoinBattle(JoinBattle),
    StatusProbe(StatusProbe),
    SubmitAction(SubmitAction),
    BattleAction(BattleAction),
}

impl ClientMessage {
    pub fn event_name(&self) -> &'static str {
        match self {
            ClientMessage::JoinBattle(_) => events::JOIN_BATTLE,
            ClientMessage::StatusProbe(_) => events::BATTLE_STATUS,
            ClientMessage::SubmitAction(_) => events::SUBMIT_ACTION,
            ClientMessage::BattleAction(_) => events::BATTLE_ACTION,
        }
    }

    pub fn payload(&self) -> Result<Value, WireError> {
        let result = match self {
            ClientMessage::JoinBattle(inner) => serde_json::to_value(inner),
            ClientMessage::StatusProbe(inner) => serde_json::to_value(inner),
            ClientMessage::SubmitAction(inner) => serde_json::to_value(inner),
            ClientMessage::BattleAction(inner) => serde_json::to_value(inner),
        };
        result.map_err(|err| WireError::EncodeFailed {
            event: self.event_name(),
            reason: err.to_string(),
        })
    }

    /// Parse an emitted message back from its event name and payload
    pub fn decode(event: &str, data: Value) -> Result<Option<Self>, WireError> {
        let message = match event {
            events::JOIN_BATTLE => ClientMessage::JoinBattle(decode_payload(event, data)?),
            events::BATTLE_STATUS => ClientMessage::StatusProbe(decode_payload(event, data)?),
            events::SUBMIT_ACTION => ClientMessage::SubmitAction(decode_payload(event, data)?),
            events::BATTLE_ACTION => ClientMessage::BattleAction(decode_payload(event, data)?),
            _ => return Ok(None),
        };
        Ok(Some(message))
    }
}

/// Push events the client understands. Other gameplay events share the
/// channel and are ignored here.
#[derive(Clone, Debug, PartialEq)]
pub enum ServerMessage {
    BattleState(BattleSnapshot),
}

impl ServerMessage {
    /// Returns `Ok(None)` for event names this client does not handle
    pub fn decode(event: &str, data: Value) -> Result<Option<Self>, WireError> {
        match event {
            events::BATTLE_STATE => Ok(Some(ServerMessage::BattleState(decode_payload(
                event, data,
            )?))),
            _ => Ok(None),
        }
    }

    pub fn event_name(&self) -> &'static str {
        match self {
            ServerMessage::BattleState(_) => events::BATTLE_STATE,
        }
    }

    pub fn payload(&self) -> Result<Value, WireError> {
        match self {
            ServerMessage::BattleState(snapshot) => {
                serde_json::to_value(snapshot).map_err(|err| WireError::EncodeFailed {
                    event: events::BATTLE_STATE,
                    reason: err.to_string(),
                })
            }
        }
    }
}

fn decode_payload<T: for<'de> Deserialize<'de>>(event: &str, data: Value) -> Result<T, WireError> {
    serde_json::from_value(data).map_err(|err| WireError::PayloadDecodeFailed {
        event: event.to_string(),
        reason: err.to_string(),
    })
}
