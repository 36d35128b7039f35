use std::collections::HashMap;

use log::{debug, warn};

use tamer_shared::{ClientMessage, Frame};

use super::{RecvError, Socket, Transport};

/// Handle returned by [`Channel::on`], used to unregister the listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerKey(u64);

/// Wraps a [`Transport`] with named event listeners and connection-gated
/// emits.
///
/// Pushed frames are only surfaced for event names that currently have a
/// listener; everything else is dropped on receipt.
pub struct Channel {
    transport: Box<dyn Transport>,
    listeners: HashMap<ListenerKey, String>,
    next_key: u64,
}

impl Channel {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            listeners: HashMap::new(),
            next_key: 0,
        }
    }

    /// Connect the given socket with an auth token and wrap the resulting
    /// transport
    pub fn connect<S: Into<Box<dyn Socket>>>(socket: S, token: &str) -> Self {
        let boxed_socket: Box<dyn Socket> = socket.into();
        Self::new(boxed_socket.connect(token))
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Start surfacing pushed frames named `event`
    pub fn on(&mut self, event: &str) -> ListenerKey {
        let key = ListenerKey(self.next_key);
        self.next_key += 1;
        self.listeners.insert(key, event.to_string());
        key
    }

    /// Unregister a listener. Unknown keys are ignored.
    pub fn off(&mut self, key: ListenerKey) {
        self.listeners.remove(&key);
    }

    pub fn is_listening(&self, event: &str) -> bool {
        self.listeners.values().any(|name| name == event)
    }

    /// Emit a message if the transport is connected. Returns whether the
    /// message was handed to the transport; while disconnected the message is
    /// dropped, never queued.
    pub fn emit(&mut self, message: &ClientMessage) -> bool {
        let event = message.event_name();
        if !self.transport.is_connected() {
            debug!("Dropping '{}' emit: transport not connected", event);
            return false;
        }
        let payload = match message.payload() {
            Ok(payload) => payload,
            Err(err) => {
                warn!("Dropping '{}' emit: {}", event, err);
                return false;
            }
        };
        match self.transport.emit(Frame::new(event, payload)) {
            Ok(()) => {
                debug!("Emitted '{}'", event);
                true
            }
            Err(err) => {
                debug!("Dropping '{}' emit: {}", event, err);
                false
            }
        }
    }

    /// Drain every frame the transport has buffered into `frames`, keeping
    /// only those with a registered listener. Frames read before a transport
    /// error are kept.
    pub fn receive(&mut self, frames: &mut Vec<Frame>) -> Result<(), RecvError> {
        while let Some(frame) = self.transport.receive()? {
            if self.is_listening(&frame.event) {
                frames.push(frame);
            } else {
                debug!("Ignoring '{}' push: no listener", frame.event);
            }
        }
        Ok(())
    }
}
