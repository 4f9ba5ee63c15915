// In crates/api-client/src/lib.rs

use app_config::AlpacaSettings;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use core_types::{BarProvider, PriceBar, Symbol};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

pub mod error;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use types::*;

/// Upper bound Alpaca accepts for `limit` on the bars endpoint.
const PAGE_LIMIT: u32 = 10_000;

impl AlpacaClient {
    /// Constructs a new AlpacaClient from AlpacaSettings.
    pub fn new(settings: &AlpacaSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("sma-scanner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(AlpacaClient {
            http_client,
            api_key: settings.api_key.clone(),
            secret_key: settings.secret_key.clone(),
            base_url: settings.data_base_url.trim_end_matches('/').to_string(),
            feed: settings.feed.clone(),
        })
    }

    /// Fetches every daily bar for `symbol` from `start` onwards, oldest first.
    ///
    /// This corresponds to `GET /v2/stocks/{symbol}/bars`, following
    /// `next_page_token` until the last page.
    pub async fn get_daily_bars(&self, symbol: &Symbol, start: DateTime<Utc>) -> Result<Vec<PriceBar>> {
        let url = format!("{}/v2/stocks/{}/bars", self.base_url, symbol.0);
        let start = start.to_rfc3339_opts(SecondsFormat::Secs, true);
        let limit = PAGE_LIMIT.to_string();

        let mut bars = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("timeframe", "1Day"),
                ("start", start.as_str()),
                ("limit", limit.as_str()),
                ("feed", self.feed.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("page_token", token));
            }

            let response = self
                .http_client
                .get(&url)
                .header("APCA-API-KEY-ID", &self.api_key)
                .header("APCA-API-SECRET-KEY", &self.secret_key)
                .query(&query)
                .send()
                .await
                .map_err(Error::RequestFailed)?;

            let status = response.status();
            let text = response.text().await.map_err(Error::RequestFailed)?;

            if !status.is_success() {
                // Alpaca error bodies are JSON, but proxies may answer with plain text.
                let message = serde_json::from_str::<ApiErrorBody>(&text)
                    .map(|body| body.message)
                    .unwrap_or(text);
                return Err(Error::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let page: BarsPage = serde_json::from_str(&text).map_err(Error::DeserializationFailed)?;
            for raw in page.bars.unwrap_or_default() {
                bars.push(to_price_bar(raw)?);
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(symbol = %symbol, count = bars.len(), "Fetched daily bars.");
        Ok(bars)
    }
}

/// Converts Alpaca's raw bar into the bar the averages are computed from.
fn to_price_bar(raw: RawBar) -> Result<PriceBar> {
    let vwap = raw.vwap.ok_or_else(|| Error::MissingVwap {
        timestamp: raw.timestamp.to_rfc3339(),
    })?;
    let vwap = Decimal::from_f64(vwap).ok_or_else(|| Error::InvalidVwap {
        timestamp: raw.timestamp.to_rfc3339(),
    })?;

    Ok(PriceBar {
        timestamp: raw.timestamp,
        vwap,
    })
}

#[async_trait]
impl BarProvider for AlpacaClient {
    async fn get_bars(&self, symbol: &Symbol, start: DateTime<Utc>) -> core_types::Result<Vec<PriceBar>> {
        self.get_daily_bars(symbol, start)
            .await
            .map_err(|e| e.into_provider_error(symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(vwap: Option<f64>) -> RawBar {
        serde_json::from_value(serde_json::json!({
            "t": "2024-01-02T05:00:00Z",
            "o": 187.15, "h": 188.44, "l": 183.885, "c": 185.64,
            "v": 82488674u64, "n": 1009074u64, "vw": vwap,
        }))
        .unwrap()
    }

    #[test]
    fn raw_bar_keeps_vwap() {
        let bar = to_price_bar(raw(Some(185.881))).unwrap();
        assert_eq!(bar.vwap, Decimal::new(185_881, 3));
        assert_eq!(bar.timestamp.to_rfc3339(), "2024-01-02T05:00:00+00:00");
    }

    #[test]
    fn missing_vwap_is_an_error() {
        assert!(matches!(to_price_bar(raw(None)), Err(Error::MissingVwap { .. })));
    }

    #[test]
    fn provider_error_names_the_symbol() {
        let err = Error::Api { status: 403, message: "forbidden".into() }.into_provider_error(&Symbol::from("AAPL"));
        match err {
            core_types::Error::Provider { symbol, reason } => {
                assert_eq!(symbol, "AAPL");
                assert!(reason.contains("403"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
