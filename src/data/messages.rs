//! Wire types for the market-data websocket.
//!
//! Inbound frames are decoded exactly once, here, into the closed
//! [`FeedMessage`] enum. Nothing downstream ever touches raw JSON.

use serde::{Deserialize, Serialize};

use crate::domain::Tick;

/// One-shot request for the most recent `count` ticks of a symbol.
#[derive(Debug, Clone, Serialize)]
pub struct TicksHistoryRequest {
    pub ticks_history: String,
    pub count: usize,
    pub end: &'static str,
    pub style: &'static str,
    pub adjust_start_time: u8,
    pub req_id: u64,
}

impl TicksHistoryRequest {
    pub fn latest(symbol: &str, count: usize, req_id: u64) -> Self {
        Self {
            ticks_history: symbol.to_string(),
            count,
            end: "latest",
            style: "ticks",
            adjust_start_time: 1,
            req_id,
        }
    }
}

/// Subscribes to the live tick stream of a symbol.
#[derive(Debug, Clone, Serialize)]
pub struct TicksSubscribeRequest {
    pub ticks: String,
    pub subscribe: u8,
    pub req_id: u64,
}

impl TicksSubscribeRequest {
    pub fn new(symbol: &str, req_id: u64) -> Self {
        Self {
            ticks: symbol.to_string(),
            subscribe: 1,
            req_id,
        }
    }
}

/// Cancels a live subscription by its server-assigned id.
#[derive(Debug, Clone, Serialize)]
pub struct ForgetRequest {
    pub forget: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// Everything the analyzer consumes from the feed, decoded at the
/// boundary. Frames it has no use for decode to None.
#[derive(Debug, Clone)]
pub enum FeedMessage {
    /// Historical batch, oldest first.
    History {
        ticks: Vec<Tick>,
        req_id: Option<u64>,
    },
    /// One live tick plus the subscription it belongs to.
    Tick {
        tick: Tick,
        subscription_id: Option<String>,
    },
    ServerError {
        code: String,
        message: String,
        req_id: Option<u64>,
    },
}

// The server sends quotes as numbers in tick frames but as strings in
// history frames; accept both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Quote {
    Num(f64),
    Text(String),
}

impl Quote {
    fn as_finite_f64(&self) -> Option<f64> {
        let value = match self {
            Quote::Num(v) => *v,
            Quote::Text(s) => s.parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

#[derive(Debug, Deserialize)]
struct HistoryPayload {
    times: Vec<i64>,
    prices: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct TickPayload {
    epoch: i64,
    quote: Quote,
}

#[derive(Debug, Deserialize)]
struct SubscriptionPayload {
    id: String,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    msg_type: Option<String>,
    error: Option<ApiError>,
    history: Option<HistoryPayload>,
    tick: Option<TickPayload>,
    subscription: Option<SubscriptionPayload>,
    req_id: Option<u64>,
}

impl FeedMessage {
    /// Decodes one raw frame. Returns None for frames the analyzer
    /// does not consume (pings, other subscriptions, unknown types).
    pub fn decode(raw: &str) -> Option<FeedMessage> {
        let envelope: Envelope = match serde_json::from_str(raw) {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Failed to parse feed frame: {}", e);
                return None;
            }
        };

        if let Some(err) = envelope.error {
            return Some(FeedMessage::ServerError {
                code: err.code,
                message: err.message,
                req_id: envelope.req_id,
            });
        }

        match envelope.msg_type.as_deref() {
            Some("history") => {
                let payload = envelope.history?;
                let mut ticks = Vec::with_capacity(payload.prices.len());
                for (time, price) in payload.times.iter().zip(payload.prices.iter()) {
                    match price.as_finite_f64() {
                        Some(quote) => ticks.push(Tick::new(time * 1000, quote)),
                        None => log::warn!("Dropping malformed history quote at epoch {}", time),
                    }
                }
                Some(FeedMessage::History {
                    ticks,
                    req_id: envelope.req_id,
                })
            }
            Some("tick") => {
                let payload = envelope.tick?;
                let quote = match payload.quote.as_finite_f64() {
                    Some(q) => q,
                    None => {
                        log::warn!("Dropping malformed tick quote at epoch {}", payload.epoch);
                        return None;
                    }
                };
                Some(FeedMessage::Tick {
                    tick: Tick::new(payload.epoch * 1000, quote),
                    subscription_id: envelope.subscription.map(|s| s.id),
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_history_with_string_prices() {
        let raw = r#"{
            "msg_type": "history",
            "req_id": 7,
            "history": {
                "times": [1700000001, 1700000002],
                "prices": ["100.01", "100.02"]
            }
        }"#;
        match FeedMessage::decode(raw) {
            Some(FeedMessage::History { ticks, req_id }) => {
                assert_eq!(req_id, Some(7));
                assert_eq!(ticks.len(), 2);
                assert_eq!(ticks[0].epoch_ms, 1_700_000_001_000);
                assert_eq!(ticks[0].quote, 100.01);
            }
            other => panic!("unexpected decode: {:?}", other),
        }
    }

    #[test]
    fn test_decode_history_with_numeric_prices() {
        let raw = r#"{
            "msg_type": "history",
            "history": { "times": [1], "prices": [99.5] }
        }"#;
        match FeedMessage::decode(raw) {
            Some(FeedMessage::History { ticks, .. }) => {
                assert_eq!(ticks[0].quote, 99.5);
            }
            other => panic!("unexpected decode: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_quote_is_dropped_not_propagated() {
        let raw = r#"{
            "msg_type": "history",
            "history": { "times": [1, 2], "prices": ["abc", "100.03"] }
        }"#;
        match FeedMessage::decode(raw) {
            Some(FeedMessage::History { ticks, .. }) => {
                assert_eq!(ticks.len(), 1);
                assert_eq!(ticks[0].quote, 100.03);
            }
            other => panic!("unexpected decode: {:?}", other),
        }
    }

    #[test]
    fn test_decode_tick() {
        let raw = r#"{
            "msg_type": "tick",
            "tick": { "epoch": 1700000003, "quote": 101.27 },
            "subscription": { "id": "abc-123" }
        }"#;
        match FeedMessage::decode(raw) {
            Some(FeedMessage::Tick {
                tick,
                subscription_id,
            }) => {
                assert_eq!(tick.quote, 101.27);
                assert_eq!(tick.epoch_ms, 1_700_000_003_000);
                assert_eq!(subscription_id.as_deref(), Some("abc-123"));
            }
            other => panic!("unexpected decode: {:?}", other),
        }
    }

    #[test]
    fn test_decode_server_error() {
        let raw = r#"{
            "msg_type": "tick",
            "error": { "code": "MarketIsClosed", "message": "This market is closed." }
        }"#;
        match FeedMessage::decode(raw) {
            Some(FeedMessage::ServerError { code, .. }) => {
                assert_eq!(code, "MarketIsClosed");
            }
            other => panic!("unexpected decode: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_frames_are_ignored() {
        assert!(FeedMessage::decode(r#"{"msg_type": "ping"}"#).is_none());
        assert!(FeedMessage::decode("not json at all").is_none());
    }
}
