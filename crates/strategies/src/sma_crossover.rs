// In crates/strategies/src/sma_crossover.rs

use crate::crossover;
use crate::sma::{self, Windows};
use crate::types::SmaCrossoverSettings;
use crate::Strategy;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use core_types::{BarProvider, Error, Result, Signal, StrategyOutcome, Symbol};
use std::sync::Arc;

/// Daily VWAP moving-average crossover strategy.
///
/// Pulls `lookback_days` of bars from the provider, builds the fast/slow averages
/// and reports the direction of the most recent golden or death cross.
pub struct SmaCrossover {
    settings: SmaCrossoverSettings,
    windows: Windows,
    provider: Arc<dyn BarProvider>,
}

impl SmaCrossover {
    /// Creates a new `SmaCrossover`, rejecting window settings that cannot work.
    pub fn new(settings: SmaCrossoverSettings, provider: Arc<dyn BarProvider>) -> Result<Self> {
        let windows = Windows::new(settings.fast_period as usize, settings.slow_period as usize)?;
        Ok(Self {
            settings,
            windows,
            provider,
        })
    }

    async fn signal_for(&self, symbol: &Symbol) -> Result<(Signal, DateTime<Utc>)> {
        let start = Utc::now() - Duration::days(i64::from(self.settings.lookback_days));
        let bars = self.provider.get_bars(symbol, start).await?;
        tracing::debug!(symbol = %symbol, bars = bars.len(), "Fetched bars.");

        let points = sma::moving_averages(&bars, self.windows)?;
        let signal = crossover::detect(&points)?;
        let as_of = points
            .last()
            .map(|p| p.timestamp)
            .ok_or(Error::InsufficientData { required: 2, available: 0 })?;

        Ok((signal, as_of))
    }
}

#[async_trait]
impl Strategy for SmaCrossover {
    fn name(&self) -> &'static str {
        "SmaCrossover"
    }

    async fn evaluate(&self, symbol: &Symbol) -> StrategyOutcome {
        match self.signal_for(symbol).await {
            Ok((signal, as_of)) => {
                tracing::debug!(symbol = %symbol, %signal, %as_of, "Crossover evaluated.");
                StrategyOutcome::decided(symbol.clone(), signal, as_of)
            }
            Err(e) => {
                tracing::warn!(symbol = %symbol, strategy = self.name(), error = %e, "Strategy could not decide.");
                StrategyOutcome::undecided(symbol.clone())
            }
        }
    }
}
