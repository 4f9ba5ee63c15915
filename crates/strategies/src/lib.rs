// In crates/strategies/src/lib.rs

use async_trait::async_trait;
use core_types::{StrategyOutcome, Symbol};
use std::sync::Arc;

pub mod crossover;
pub mod factory;
pub mod sma;
pub mod sma_crossover;
pub mod types;

pub use factory::create_strategies;
pub use sma_crossover::SmaCrossover;

/// The universal interface for a trading strategy.
///
/// A strategy turns a symbol into a `StrategyOutcome`. It owns whatever it needs
/// to fetch data for that symbol, and it never fails: data or provider problems
/// are reported as an undecided outcome so sibling evaluations keep running.
#[async_trait]
pub trait Strategy: Send + Sync {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    async fn evaluate(&self, symbol: &Symbol) -> StrategyOutcome;
}

/// A strategy registered with the aggregation engine, with its vote weight.
#[derive(Clone)]
pub struct WeightedStrategy {
    pub strategy: Arc<dyn Strategy>,
    pub weight: f64,
}

impl WeightedStrategy {
    pub fn new(strategy: Arc<dyn Strategy>, weight: f64) -> Self {
        Self { strategy, weight }
    }
}

impl From<Arc<dyn Strategy>> for WeightedStrategy {
    fn from(strategy: Arc<dyn Strategy>) -> Self {
        Self::new(strategy, 1.0)
    }
}

impl std::fmt::Debug for WeightedStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeightedStrategy")
            .field("strategy", &self.strategy.name())
            .field("weight", &self.weight)
            .finish()
    }
}
