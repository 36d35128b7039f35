use serde::{Deserialize, Serialize};

use crate::types::ActionId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Attack,
    Defense,
}

/// An action a monster may choose on its turn, as advertised by the server
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOption {
    pub id: ActionId,
    pub kind: ActionKind,
    #[serde(default)]
    pub stamina_cost: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ActionOption {
    pub fn new(id: impl Into<ActionId>, kind: ActionKind, stamina_cost: u32) -> Self {
        Self {
            id: id.into(),
            kind,
            stamina_cost,
            name: None,
        }
    }
}
