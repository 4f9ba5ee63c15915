// In crates/api-client/src/types.rs

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

/// The client for the Alpaca market data REST API.
#[derive(Debug, Clone)]
pub struct AlpacaClient {
    /// The persistent HTTP client.
    pub http_client: Client,
    /// The Alpaca API key id.
    pub api_key: String,
    /// The Alpaca secret key.
    pub secret_key: String,
    /// The base URL for market data, without a trailing slash.
    pub base_url: String,
    /// The bar feed ("iex" or "sip").
    pub feed: String,
}

/// One page of `GET /v2/stocks/{symbol}/bars`.
#[derive(Debug, Deserialize)]
pub struct BarsPage {
    /// Alpaca sends `null` instead of an empty list when there are no bars.
    #[serde(default)]
    pub bars: Option<Vec<RawBar>>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// A daily bar exactly as Alpaca returns it.
#[derive(Debug, Deserialize)]
pub struct RawBar {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v")]
    pub volume: u64,
    #[serde(rename = "n", default)]
    pub trade_count: Option<u64>,
    #[serde(rename = "vw", default)]
    pub vwap: Option<f64>,
}

/// The error body Alpaca sends with non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    pub message: String,
}
