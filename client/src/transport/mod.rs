cfg_if! {
    if #[cfg(feature = "transport_ws")] {
        pub mod ws;
    } else {}
}

mod channel;

pub use channel::{Channel, ListenerKey};
pub use inner::{RecvError, SendError, Socket, Transport};

mod inner {

    use tamer_shared::Frame;
    use thiserror::Error;

    /// The frame could not be handed to the underlying socket
    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    #[error("Transport could not send frame: not connected")]
    pub struct SendError;

    /// The underlying socket failed while reading
    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    #[error("Transport failed to receive frame")]
    pub struct RecvError;

    /// Connects to the battle server, attaching the caller's credentials.
    /// Implementations reconnect on their own and never give up.
    pub trait Socket {
        fn connect(self: Box<Self>, token: &str) -> Box<dyn Transport>;
    }

    /// A persistent bidirectional channel to the server
    pub trait Transport {
        /// Point-in-time connection state
        fn is_connected(&self) -> bool;
        /// Hands a frame to the socket. Fire-and-forget: `Ok` does not mean
        /// the server received it.
        fn emit(&mut self, frame: Frame) -> Result<(), SendError>;
        /// Returns the next pushed frame, if any has arrived
        fn receive(&mut self) -> Result<Option<Frame>, RecvError>;
    }
}
