use thiserror::Error;

use tamer_shared::{BattleId, WireError};

use crate::transport::RecvError;

/// Errors surfaced to the application through [`crate::ErrorEvent`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TamerClientError {
    /// The server refused the battle session. The session is abandoned and
    /// will not retry.
    #[error("Server rejected battle session '{battle_id}'")]
    SessionRejected {
        battle_id: BattleId,
    },

    /// A push event could not be decoded
    #[error("Wire error: {0}")]
    Wire(#[from] WireError),

    /// The transport failed while reading pushed events
    #[error("Transport error: {0}")]
    Transport(#[from] RecvError),
}
