use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::time::{sleep, timeout};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::config::{DERIV, ws_url};
use crate::domain::Tick;

use super::messages::{FeedMessage, TicksHistoryRequest};

static NEXT_REQ_ID: AtomicU64 = AtomicU64::new(1);

fn next_req_id() -> u64 {
    NEXT_REQ_ID.fetch_add(1, Ordering::Relaxed)
}

/// Abstract interface for fetching tick history.
#[async_trait]
pub trait TickHistoryProvider: Send + Sync {
    /// Fetch the most recent `count` ticks for a symbol, oldest first.
    async fn fetch_history(&self, symbol: &str, count: usize) -> Result<Vec<Tick>>;
}

pub struct DerivProvider {
    app_id: String,
}

impl DerivProvider {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
        }
    }
}

#[async_trait]
impl TickHistoryProvider for DerivProvider {
    async fn fetch_history(&self, symbol: &str, count: usize) -> Result<Vec<Tick>> {
        let count = count.min(DERIV.limits.max_count);
        let req_id = next_req_id();
        let url = ws_url(&self.app_id);

        let (ws_stream, _) = connect_async(&url).await?;
        let (mut write, mut read) = ws_stream.split();

        let request = TicksHistoryRequest::latest(symbol, count, req_id);
        write
            .send(Message::Text(serde_json::to_string(&request)?.into()))
            .await?;

        let deadline = Duration::from_secs(DERIV.request.timeout_sec);
        loop {
            let frame = timeout(deadline, read.next())
                .await
                .map_err(|_| anyhow!("ticks_history timed out after {:?}", deadline))?;

            let msg = match frame {
                Some(msg) => msg?,
                None => bail!("connection closed before history arrived"),
            };

            let Message::Text(text) = msg else { continue };
            let Some(decoded) = FeedMessage::decode(&text) else {
                continue;
            };

            match decoded {
                // Correlate by req_id; servers omitting it get the
                // benefit of the doubt since only one request is in
                // flight on this connection.
                FeedMessage::History { ticks, req_id: rid } if rid.is_none() || rid == Some(req_id) => {
                    let _ = write.send(Message::Close(None)).await;
                    return Ok(ticks);
                }
                FeedMessage::ServerError { code, message, .. } => {
                    bail!("history request rejected: {} ({})", message, code);
                }
                _ => {}
            }
        }
    }
}

/// Wraps a provider call in the standard retry-with-backoff policy.
/// Every failure is logged and retried until the attempts run out;
/// the last error is returned.
pub async fn fetch_history_with_retry(
    provider: &dyn TickHistoryProvider,
    symbol: &str,
    count: usize,
) -> Result<Vec<Tick>> {
    let mut delay = DERIV.request.initial_retry_delay_sec;

    for attempt in 1..=DERIV.request.retries {
        match provider.fetch_history(symbol, count).await {
            Ok(ticks) => {
                log::info!(
                    "History warmup: {} ticks for {} (attempt {})",
                    ticks.len(),
                    symbol,
                    attempt
                );
                return Ok(ticks);
            }
            Err(e) if attempt == DERIV.request.retries => {
                return Err(e.context(format!("history fetch failed after {} attempts", attempt)));
            }
            Err(e) => {
                log::warn!(
                    "History fetch for {} failed (attempt {}): {}. Retrying in {}s...",
                    symbol,
                    attempt,
                    e,
                    delay
                );
                sleep(Duration::from_secs(delay)).await;
                delay = (delay * 2).min(DERIV.request.max_retry_delay_sec);
            }
        }
    }

    bail!("history fetch for {} never ran (zero retries configured)", symbol)
}
