use thiserror::Error;

/// Errors that can occur while encoding or decoding frames on the push channel
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// The frame text was not a JSON object of the form `{"event", "data"}`
    #[error("Malformed frame received: {reason}. The peer may be speaking a different protocol")]
    MalformedFrame {
        reason: String,
    },

    /// The frame was well formed but its payload did not match the event's shape
    #[error("Failed to decode payload of '{event}' event: {reason}")]
    PayloadDecodeFailed {
        event: String,
        reason: String,
    },

    /// A payload could not be serialized (should never happen for the client's own types)
    #[error("Failed to encode payload of '{event}' event: {reason}")]
    EncodeFailed {
        event: &'static str,
        reason: String,
    },
}
