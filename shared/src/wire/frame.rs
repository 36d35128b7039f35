use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::WireError;

/// A single named event on the push channel, as carried in one text message:
/// `{"event": "battle_state", "data": {...}}`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

impl Frame {
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }

    pub fn encode(&self) -> Result<String, WireError> {
        serde_json::to_string(self).map_err(|err| WireError::MalformedFrame {
            reason: err.to_string(),
        })
    }

    pub fn decode(text: &str) -> Result<Self, WireError> {
        let frame: Frame = serde_json::from_str(text).map_err(|err| WireError::MalformedFrame {
            reason: err.to_string(),
        })?;
        if frame.event.is_empty() {
            return Err(WireError::MalformedFrame {
                reason: "empty event name".to_string(),
            });
        }
        Ok(frame)
    }
}
