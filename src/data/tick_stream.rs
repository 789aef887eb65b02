use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::runtime::Runtime;
use tokio::time::sleep;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::config::{DERIV, ws_url};
use crate::domain::Tick;

use super::messages::{FeedMessage, ForgetRequest, TicksSubscribeRequest};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConnectionStatus {
    Connected,
    Connecting,
    Disconnected,
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connected => write!(f, "Live"),
            Self::Connecting => write!(f, "Connecting..."),
            Self::Disconnected => write!(f, "Disconnected"),
        }
    }
}

/// Manages the websocket subscription for live tick updates.
/// Maintains one connection per session with automatic reconnection;
/// decoded ticks are forwarded over an mpsc channel to the engine.
pub struct TickStreamManager {
    status: Arc<Mutex<ConnectionStatus>>,
    shutdown: Arc<AtomicBool>,
    app_id: String,
    tick_tx: Option<Sender<Tick>>,
}

impl TickStreamManager {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            status: Arc::new(Mutex::new(ConnectionStatus::Disconnected)),
            shutdown: Arc::new(AtomicBool::new(false)),
            app_id: app_id.into(),
            tick_tx: None,
        }
    }

    pub fn set_tick_sender(&mut self, tx: Sender<Tick>) {
        self.tick_tx = Some(tx);
    }

    pub fn status(&self) -> ConnectionStatus {
        *self.status.lock().unwrap()
    }

    /// Signals the background loop to unsubscribe and exit. No tick is
    /// forwarded after this returns.
    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Spawns the stream loop on a dedicated thread with its own
    /// runtime. Reconnects forever (with backoff) until `stop`.
    pub fn subscribe(&self, symbol: String) {
        let Some(tick_tx) = self.tick_tx.clone() else {
            log::error!("TickStream: subscribe called before a tick sender was set");
            return;
        };

        let status_arc = self.status.clone();
        let shutdown_arc = self.shutdown.clone();
        let url = ws_url(&self.app_id);

        thread::spawn(move || {
            let rt = Runtime::new().expect("Failed to create runtime");
            rt.block_on(async move {
                run_tick_stream_with_reconnect(&symbol, &url, status_arc, shutdown_arc, tick_tx)
                    .await;
            });
        });
    }
}

async fn run_tick_stream_with_reconnect(
    symbol: &str,
    url: &str,
    status_arc: Arc<Mutex<ConnectionStatus>>,
    shutdown_arc: Arc<AtomicBool>,
    tick_tx: Sender<Tick>,
) {
    let mut reconnect_delay = DERIV.ws.initial_reconnect_delay_sec;

    loop {
        if shutdown_arc.load(Ordering::Relaxed) {
            break;
        }

        *status_arc.lock().unwrap() = ConnectionStatus::Connecting;
        log::info!("TickStream: connecting for {}...", symbol);

        match run_tick_stream(symbol, url, &status_arc, &shutdown_arc, &tick_tx).await {
            Ok(StreamExit::Shutdown) => break,
            Ok(StreamExit::ReceiverGone) => {
                log::info!("TickStream: engine gone, stopping {} stream", symbol);
                break;
            }
            Ok(StreamExit::ServerClosed) => {
                log::warn!("TickStream: connection closed by server. Reconnecting...");
                reconnect_delay = DERIV.ws.initial_reconnect_delay_sec;
            }
            Err(e) => {
                log::error!(
                    "TickStream: connection failed: {}. Retrying in {}s...",
                    e,
                    reconnect_delay
                );
            }
        }

        *status_arc.lock().unwrap() = ConnectionStatus::Disconnected;

        if shutdown_arc.load(Ordering::Relaxed) {
            break;
        }
        sleep(Duration::from_secs(reconnect_delay)).await;
        reconnect_delay = (reconnect_delay * 2).min(DERIV.ws.max_reconnect_delay_sec);
    }

    *status_arc.lock().unwrap() = ConnectionStatus::Disconnected;
}

enum StreamExit {
    ServerClosed,
    Shutdown,
    ReceiverGone,
}

async fn run_tick_stream(
    symbol: &str,
    url: &str,
    status_arc: &Arc<Mutex<ConnectionStatus>>,
    shutdown_arc: &Arc<AtomicBool>,
    tick_tx: &Sender<Tick>,
) -> anyhow::Result<StreamExit> {
    let (ws_stream, _) = connect_async(url).await?;
    *status_arc.lock().unwrap() = ConnectionStatus::Connected;

    let (mut write, mut read) = ws_stream.split();

    let request = TicksSubscribeRequest::new(symbol, 1);
    write
        .send(Message::Text(serde_json::to_string(&request)?.into()))
        .await?;

    let mut subscription_id: Option<String> = None;

    loop {
        // Wake up periodically so a stop request is honored even when
        // the market is quiet.
        let frame = tokio::select! {
            frame = read.next() => frame,
            _ = sleep(Duration::from_secs(1)) => {
                if shutdown_arc.load(Ordering::Relaxed) {
                    unsubscribe(&mut write, subscription_id.take()).await;
                    return Ok(StreamExit::Shutdown);
                }
                continue;
            }
        };

        let msg = match frame {
            Some(msg) => msg?,
            None => return Ok(StreamExit::ServerClosed),
        };

        match msg {
            Message::Text(text) => {
                let Some(decoded) = FeedMessage::decode(&text) else {
                    continue;
                };
                match decoded {
                    FeedMessage::Tick {
                        tick,
                        subscription_id: sid,
                    } => {
                        if sid.is_some() {
                            subscription_id = sid;
                        }
                        if shutdown_arc.load(Ordering::Relaxed) {
                            unsubscribe(&mut write, subscription_id.take()).await;
                            return Ok(StreamExit::Shutdown);
                        }
                        if tick_tx.send(tick).is_err() {
                            unsubscribe(&mut write, subscription_id.take()).await;
                            return Ok(StreamExit::ReceiverGone);
                        }
                    }
                    FeedMessage::ServerError { code, message, .. } => {
                        anyhow::bail!("stream rejected: {} ({})", message, code);
                    }
                    FeedMessage::History { .. } => {}
                }
            }
            Message::Ping(_) | Message::Pong(_) => {}
            Message::Close(_) => return Ok(StreamExit::ServerClosed),
            _ => {}
        }
    }
}

/// Best-effort forget + close; the connection is going away either way.
async fn unsubscribe<S>(write: &mut S, subscription_id: Option<String>)
where
    S: SinkExt<Message> + Unpin,
{
    if let Some(id) = subscription_id {
        let request = ForgetRequest { forget: id };
        if let Ok(payload) = serde_json::to_string(&request) {
            let _ = write.send(Message::Text(payload.into())).await;
        }
    }
    let _ = write.send(Message::Close(None)).await;
}
