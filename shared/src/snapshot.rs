use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{actions::ActionOption, types::{BattleId, MonsterId}};

/// Full, self-contained description of a battle as the server currently sees
/// it. Snapshots are never deltas: each one replaces whatever the client held
/// before.
///
/// Every field is optional on the wire so that a bare `{"rejected": true}`
/// decodes; missing or `null` fields take their neutral default.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BattleSnapshot {
    #[serde(deserialize_with = "null_as_default")]
    pub battle_id: BattleId,
    #[serde(deserialize_with = "null_as_default")]
    pub challenger_monster_id: MonsterId,
    #[serde(deserialize_with = "null_as_default")]
    pub opponent_monster_id: MonsterId,
    #[serde(deserialize_with = "null_as_default")]
    pub challenger_hp: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub opponent_hp: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub challenger_stamina: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub opponent_stamina: u32,
    pub current_turn_monster_id: Option<MonsterId>,
    /// Absolute server-clock instant (ms since epoch) at which the current
    /// turn expires
    pub turn_ends_at_ms: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub turn_time_limit_ms: u64,
    pub server_now_ms: Option<i64>,
    pub last_action_log: Option<ActionLog>,
    pub winner_monster_id: Option<MonsterId>,
    #[serde(deserialize_with = "null_as_default")]
    pub rejected: bool,
    pub challenger_reward: Option<Reward>,
    pub opponent_reward: Option<Reward>,
    #[serde(deserialize_with = "null_as_default")]
    pub challenger_actions: Vec<ActionOption>,
    #[serde(deserialize_with = "null_as_default")]
    pub opponent_actions: Vec<ActionOption>,
    /// Monotonic counter, only sent by servers that support ordering
    pub sequence: Option<u64>,
}

/// What a snapshot means. Exactly one applies to any snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotKind {
    Rejected,
    InProgress,
    Terminated,
}

/// The seat a monster occupies in a battle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Challenger,
    Opponent,
}

impl BattleSnapshot {
    pub fn kind(&self) -> SnapshotKind {
        if self.rejected {
            SnapshotKind::Rejected
        } else if self.winner_monster_id.is_some() {
            SnapshotKind::Terminated
        } else {
            SnapshotKind::InProgress
        }
    }

    /// Which seat the given monster occupies, if any
    pub fn role_of(&self, monster_id: &MonsterId) -> Option<Role> {
        if *monster_id == self.challenger_monster_id {
            Some(Role::Challenger)
        } else if *monster_id == self.opponent_monster_id {
            Some(Role::Opponent)
        } else {
            None
        }
    }

    pub fn monster_id(&self, role: Role) -> &MonsterId {
        match role {
            Role::Challenger => &self.challenger_monster_id,
            Role::Opponent => &self.opponent_monster_id,
        }
    }

    pub fn hp(&self, role: Role) -> u32 {
        match role {
            Role::Challenger => self.challenger_hp,
            Role::Opponent => self.opponent_hp,
        }
    }

    pub fn stamina(&self, role: Role) -> u32 {
        match role {
            Role::Challenger => self.challenger_stamina,
            Role::Opponent => self.opponent_stamina,
        }
    }

    pub fn actions(&self, role: Role) -> &[ActionOption] {
        match role {
            Role::Challenger => &self.challenger_actions,
            Role::Opponent => &self.opponent_actions,
        }
    }

    pub fn reward(&self, role: Role) -> Option<&Reward> {
        match role {
            Role::Challenger => self.challenger_reward.as_ref(),
            Role::Opponent => self.opponent_reward.as_ref(),
        }
    }
}

impl Role {
    pub fn other(self) -> Role {
        match self {
            Role::Challenger => Role::Opponent,
            Role::Opponent => Role::Challenger,
        }
    }
}

/// The most recently resolved action in a battle
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionLog {
    #[serde(deserialize_with = "null_as_default")]
    pub monster_id: MonsterId,
    #[serde(deserialize_with = "null_as_default")]
    pub damage: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub stamina_gained: i32,
}

/// Payout granted at the end of a battle. Fields the client does not know
/// about are kept verbatim in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coins: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// `#[serde(default)]` only covers absent fields; servers also send `null`
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
