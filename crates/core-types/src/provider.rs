//! Interfaces for the collaborators the signal core depends on.

use crate::{PriceBar, Result, Symbol};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A source of historical daily bars.
///
/// Implementations return bars in ascending date order. Any failure (network,
/// auth, rate limit) is reported as `Error::Provider`; callers treat every cause
/// the same way.
#[async_trait]
pub trait BarProvider: Send + Sync {
    /// Fetches daily bars for `symbol` from `start` up to the latest available day.
    async fn get_bars(&self, symbol: &Symbol, start: DateTime<Utc>) -> Result<Vec<PriceBar>>;
}

/// A source of ticker symbols to scan. A failure here is fatal to the whole batch.
pub trait TickerSource: Send + Sync {
    fn get_symbols(&self) -> Result<Vec<Symbol>>;
}
