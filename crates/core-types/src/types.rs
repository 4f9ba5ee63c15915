// In crates/core-types/src/types.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A ticker symbol, e.g. "AAPL".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol(value.to_string())
    }
}

/// One day's aggregated trading summary, reduced to what the averages need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    /// Volume-weighted average price for the day.
    pub vwap: Decimal,
}

/// Fast and slow window averages for a single date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AveragePoint {
    pub timestamp: DateTime<Utc>,
    pub fast: Decimal,
    pub slow: Decimal,
}

/// The decision produced by a strategy or by the aggregate of several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Signal {
    /// The signal could not be computed (insufficient data or provider failure).
    #[default]
    Undecided,
    Hold,
    Buy,
    Sell,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Undecided => "Undecided",
            Signal::Hold => "Hold",
            Signal::Buy => "Buy",
            Signal::Sell => "Sell",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of running one strategy against one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyOutcome {
    pub symbol: Symbol,
    pub succeeded: bool,
    pub signal: Signal,
    /// Date of the latest average point the signal was computed from.
    pub as_of: Option<DateTime<Utc>>,
}

impl StrategyOutcome {
    pub fn decided(symbol: Symbol, signal: Signal, as_of: DateTime<Utc>) -> Self {
        Self {
            symbol,
            succeeded: true,
            signal,
            as_of: Some(as_of),
        }
    }

    pub fn undecided(symbol: Symbol) -> Self {
        Self {
            symbol,
            succeeded: false,
            signal: Signal::Undecided,
            as_of: None,
        }
    }
}

/// The merged decision of every registered strategy for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateOutcome {
    pub symbol: Symbol,
    /// Serialized as its display text ("Buy", "Hold", ...).
    pub signal: Signal,
    /// Agreement behind `signal`, from 0 to 100.
    pub confidence: f64,
    pub as_of: Option<DateTime<Utc>>,
}

impl AggregateOutcome {
    /// True when this is a Buy dated strictly after `cutoff`.
    pub fn is_buy_since(&self, cutoff: DateTime<Utc>) -> bool {
        self.signal == Signal::Buy && self.as_of.is_some_and(|date| date > cutoff)
    }
}

/// How the aggregation engine turns k strategy outcomes into one decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Weighted vote across successful strategies; a tie for the top reports Hold.
    #[default]
    MajorityVote,
    /// The outcome of the last registered strategy wins with confidence 100.
    LatestReport,
}
