//! In-memory socket implementation for E2E testing
//! Routes frames between a scripted server and the client without network I/O

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use tamer_client::transport::{RecvError, SendError, Socket, Transport};
use tamer_shared::{BattleSnapshot, ClientMessage, Frame, ServerMessage};

#[derive(Default)]
struct LocalLink {
    connected: bool,
    to_client: VecDeque<Frame>,
    from_client: Vec<Frame>,
    fail_next_receive: bool,
    last_token: Option<String>,
}

type SharedLink = Arc<Mutex<LocalLink>>;

fn lock(link: &SharedLink) -> MutexGuard<'_, LocalLink> {
    link.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Socket handed to `Channel::connect`; records the auth token it was given
pub struct LocalSocket {
    link: SharedLink,
}

impl LocalSocket {
    /// Create a connected socket plus the server end that scripts it
    pub fn pair() -> (Self, LocalServer) {
        let link = Arc::new(Mutex::new(LocalLink {
            connected: true,
            ..LocalLink::default()
        }));
        (Self { link: link.clone() }, LocalServer { link })
    }
}

impl From<LocalSocket> for Box<dyn Socket> {
    fn from(socket: LocalSocket) -> Self {
        Box::new(socket)
    }
}

impl Socket for LocalSocket {
    fn connect(self: Box<Self>, token: &str) -> Box<dyn Transport> {
        lock(&self.link).last_token = Some(token.to_string());
        Box::new(LocalTransport { link: self.link })
    }
}

/// Client end of the in-memory link
pub struct LocalTransport {
    link: SharedLink,
}

impl LocalTransport {
    /// Create a connected transport plus the server end that scripts it
    pub fn pair() -> (Self, LocalServer) {
        let (socket, server) = LocalSocket::pair();
        (Self { link: socket.link }, server)
    }
}

impl Transport for LocalTransport {
    fn is_connected(&self) -> bool {
        lock(&self.link).connected
    }

    fn emit(&mut self, frame: Frame) -> Result<(), SendError> {
        let mut link = lock(&self.link);
        if !link.connected {
            return Err(SendError);
        }
        link.from_client.push(frame);
        Ok(())
    }

    fn receive(&mut self) -> Result<Option<Frame>, RecvError> {
        let mut link = lock(&self.link);
        if link.fail_next_receive {
            link.fail_next_receive = false;
            return Err(RecvError);
        }
        Ok(link.to_client.pop_front())
    }
}

/// Server end of the in-memory link: pushes frames to the client and
/// inspects what the client emitted
#[derive(Clone)]
pub struct LocalServer {
    link: SharedLink,
}

impl LocalServer {
    pub fn set_connected(&self, connected: bool) {
        lock(&self.link).connected = connected;
    }

    pub fn push_snapshot(&self, snapshot: &BattleSnapshot) {
        let message = ServerMessage::BattleState(snapshot.clone());
        let data = message.payload().expect("snapshot should serialize");
        self.push_frame(Frame::new(message.event_name(), data));
    }

    pub fn push_frame(&self, frame: Frame) {
        lock(&self.link).to_client.push_back(frame);
    }

    pub fn fail_next_receive(&self) {
        lock(&self.link).fail_next_receive = true;
    }

    pub fn last_token(&self) -> Option<String> {
        lock(&self.link).last_token.clone()
    }

    /// Raw frames the client emitted, oldest first
    pub fn emitted_frames(&self) -> Vec<Frame> {
        lock(&self.link).from_client.clone()
    }

    /// Emitted frames decoded back into client messages
    pub fn emitted(&self) -> Vec<ClientMessage> {
        self.emitted_frames()
            .into_iter()
            .filter_map(|frame| {
                ClientMessage::decode(&frame.event, frame.data)
                    .expect("client emitted an undecodable frame")
            })
            .collect()
    }

    pub fn emitted_count(&self) -> usize {
        lock(&self.link).from_client.len()
    }

    /// Number of emitted frames with the given event name
    pub fn count_of(&self, event: &str) -> usize {
        lock(&self.link)
            .from_client
            .iter()
            .filter(|frame| frame.event == event)
            .count()
    }

    pub fn clear_emitted(&self) {
        lock(&self.link).from_client.clear();
    }
}
