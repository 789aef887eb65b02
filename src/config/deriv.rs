pub struct WsConfig {
    pub base_url: &'static str,
    /// Application id appended to the websocket URL. Override with
    /// --app-id for a registered production id.
    pub default_app_id: &'static str,
    pub initial_reconnect_delay_sec: u64,
    pub max_reconnect_delay_sec: u64,
}

/// Bounds for one-shot requests (ticks_history).
pub struct RequestDefaults {
    pub timeout_sec: u64,
    pub retries: u32,
    pub initial_retry_delay_sec: u64,
    pub max_retry_delay_sec: u64,
}

/// Server-side request constraints.
pub struct HistoryLimits {
    /// Maximum tick count the API serves per ticks_history call.
    pub max_count: usize,
}

pub struct Market {
    pub symbol: &'static str,
    pub label: &'static str,
}

pub const MARKETS: &[Market] = &[
    Market { symbol: "R_100", label: "Volatility 100 Index" },
    Market { symbol: "R_50", label: "Volatility 50 Index" },
    Market { symbol: "R_25", label: "Volatility 25 Index" },
    Market { symbol: "EURUSD", label: "EUR/USD" },
    Market { symbol: "GBPUSD", label: "GBP/USD" },
    Market { symbol: "USDJPY", label: "USD/JPY" },
];

pub struct DerivConfig {
    pub ws: WsConfig,
    pub request: RequestDefaults,
    pub limits: HistoryLimits,
}

pub const DERIV: DerivConfig = DerivConfig {
    ws: WsConfig {
        base_url: "wss://ws.binaryws.com/websockets/v3",
        default_app_id: "1089",
        initial_reconnect_delay_sec: 1,
        max_reconnect_delay_sec: 60,
    },
    request: RequestDefaults {
        timeout_sec: 10,
        retries: 5,
        initial_retry_delay_sec: 2,
        max_retry_delay_sec: 30,
    },
    limits: HistoryLimits { max_count: 1000 },
};

pub fn ws_url(app_id: &str) -> String {
    format!("{}?app_id={}", DERIV.ws.base_url, app_id)
}
