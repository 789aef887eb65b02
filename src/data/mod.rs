mod messages;
mod provider;
mod tick_stream;

pub use {
    messages::{ApiError, FeedMessage, ForgetRequest, TicksHistoryRequest, TicksSubscribeRequest},
    provider::{DerivProvider, TickHistoryProvider, fetch_history_with_retry},
    tick_stream::{ConnectionStatus, TickStreamManager},
};
