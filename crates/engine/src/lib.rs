// In crates/engine/src/lib.rs

pub mod aggregator;
pub mod error;
pub mod merge;
pub mod pipeline;

#[cfg(test)]
mod test_support;

pub use aggregator::DecisionEngine;
pub use error::{Error, Result};
pub use pipeline::{BatchReport, TickerPipeline};

use app_config::ScannerSettings;
use core_types::{AggregateOutcome, Symbol};
use std::sync::Arc;
use strategies::WeightedStrategy;

/// Evaluates one symbol against a strategy set with the default merge policy.
pub async fn evaluate(symbol: &Symbol, strategies: Vec<WeightedStrategy>) -> Result<AggregateOutcome> {
    let engine = DecisionEngine::new(strategies)?;
    Ok(engine.evaluate(symbol).await)
}

/// Scans a batch of symbols with `worker_count` workers and default scanner settings.
pub async fn run_batch(
    symbols: Vec<Symbol>,
    strategies: Vec<WeightedStrategy>,
    worker_count: usize,
) -> Result<BatchReport> {
    let engine = Arc::new(DecisionEngine::new(strategies)?);
    let settings = ScannerSettings {
        worker_count,
        ..ScannerSettings::default()
    };
    TickerPipeline::new(engine, &settings)?.run_batch(symbols).await
}
