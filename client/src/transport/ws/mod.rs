//! WebSocket transport. Frames travel as JSON text messages; the connection
//! runs on a background thread with its own single-threaded tokio runtime and
//! reconnects forever with a fixed delay.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use futures_util::{SinkExt, StreamExt};
use log::{error, info, warn};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{
        self,
        client::IntoClientRequest,
        http::{header::AUTHORIZATION, HeaderValue},
        Message,
    },
    MaybeTlsStream, WebSocketStream,
};

use tamer_shared::Frame;

use crate::transport::{RecvError, SendError, Socket as TransportSocket, Transport};

const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Debug)]
pub struct WsConfig {
    /// Pause between a lost connection and the next attempt. Retries never stop.
    pub reconnect_delay: Duration,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
        }
    }
}

// Socket
pub struct Socket {
    url: String,
    config: WsConfig,
}

impl Socket {
    pub fn new(url: &str, config: WsConfig) -> Self {
        Self {
            url: url.to_string(),
            config,
        }
    }
}

impl From<Socket> for Box<dyn TransportSocket> {
    fn from(socket: Socket) -> Self {
        Box::new(socket)
    }
}

impl TransportSocket for Socket {
    fn connect(self: Box<Self>, token: &str) -> Box<dyn Transport> {
        let io = Arc::new(SharedIo::default());
        let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel();

        spawn_connection_task(
            self.url.clone(),
            token.to_string(),
            self.config.clone(),
            io.clone(),
            outbound_receiver,
        );

        Box::new(WsTransport {
            io,
            outbound: outbound_sender,
        })
    }
}

// State shared between the session thread and the connection thread
#[derive(Default)]
struct SharedIo {
    connected: AtomicBool,
    shutdown: AtomicBool,
    inbound: Mutex<VecDeque<Frame>>,
}

impl SharedIo {
    fn push_inbound(&self, frame: Frame) {
        let mut inbound = self
            .inbound
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        inbound.push_back(frame);
    }

    fn pop_inbound(&self) -> Option<Frame> {
        let mut inbound = self
            .inbound
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        inbound.pop_front()
    }
}

// Transport
pub struct WsTransport {
    io: Arc<SharedIo>,
    outbound: mpsc::UnboundedSender<String>,
}

impl Transport for WsTransport {
    fn is_connected(&self) -> bool {
        self.io.connected.load(Ordering::Acquire)
    }

    fn emit(&mut self, frame: Frame) -> Result<(), SendError> {
        if !self.is_connected() {
            return Err(SendError);
        }
        let text = frame.encode().map_err(|err| {
            warn!("Cannot encode '{}' frame: {}", frame.event, err);
            SendError
        })?;
        self.outbound.send(text).map_err(|_| SendError)
    }

    fn receive(&mut self) -> Result<Option<Frame>, RecvError> {
        Ok(self.io.pop_inbound())
    }
}

impl Drop for WsTransport {
    fn drop(&mut self) {
        self.io.shutdown.store(true, Ordering::Release);
    }
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

fn spawn_connection_task(
    url: String,
    token: String,
    config: WsConfig,
    io: Arc<SharedIo>,
    outbound: mpsc::UnboundedReceiver<String>,
) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                error!("Failed to create tokio runtime for WebSocket transport: {}", err);
                return;
            }
        };

        runtime.block_on(run_connection_loop(url, token, config, io, outbound));
    });
}

async fn run_connection_loop(
    url: String,
    token: String,
    config: WsConfig,
    io: Arc<SharedIo>,
    mut outbound: mpsc::UnboundedReceiver<String>,
) {
    loop {
        if io.shutdown.load(Ordering::Acquire) {
            break;
        }

        match open_stream(&url, &token).await {
            Ok(stream) => {
                info!("WebSocket connection established to {}", url);
                io.connected.store(true, Ordering::Release);
                let closed_locally = pump(stream, &io, &mut outbound).await;
                io.connected.store(false, Ordering::Release);
                if closed_locally {
                    info!("WebSocket transport dropped, closing connection to {}", url);
                    break;
                }
                info!("WebSocket connection to {} lost", url);
            }
            Err(err) => {
                warn!("Failed to connect to {}: {}", url, err);
            }
        }

        // Anything emitted during the race with a disconnect is stale by the
        // time we are back
        while outbound.try_recv().is_ok() {}

        tokio::time::sleep(config.reconnect_delay).await;
    }
}

async fn open_stream(url: &str, token: &str) -> Result<WsStream, tungstenite::Error> {
    let mut request = url.into_client_request()?;
    let header = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|err| tungstenite::Error::HttpFormat(err.into()))?;
    request.headers_mut().insert(AUTHORIZATION, header);

    let (stream, _response) = connect_async(request).await?;
    Ok(stream)
}

// Returns true when the transport handle was dropped, false when the
// connection was lost
async fn pump(
    stream: WsStream,
    io: &SharedIo,
    outbound: &mut mpsc::UnboundedReceiver<String>,
) -> bool {
    let (mut sink, mut source) = stream.split();

    loop {
        tokio::select! {
            outgoing = outbound.recv() => match outgoing {
                Some(text) => {
                    if let Err(err) = sink.send(Message::Text(text)).await {
                        warn!("WebSocket send failed: {}", err);
                        return false;
                    }
                }
                None => {
                    let _ = sink.close().await;
                    return true;
                }
            },
            incoming = source.next() => match incoming {
                Some(Ok(Message::Text(text))) => match Frame::decode(&text) {
                    Ok(frame) => io.push_inbound(frame),
                    Err(err) => warn!("Discarding pushed frame: {}", err),
                },
                Some(Ok(Message::Close(_))) | None => return false,
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    warn!("WebSocket receive failed: {}", err);
                    return false;
                }
            },
        }
    }
}
