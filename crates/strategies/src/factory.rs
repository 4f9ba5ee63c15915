use crate::sma_crossover::SmaCrossover;
use crate::types::SmaCrossoverSettings;
use crate::{Strategy, WeightedStrategy};
use anyhow::Result;
use core_types::{BarProvider, StrategyConfig};
use std::sync::Arc;

/// Builds the registered strategy set from the `[[strategies]]` settings entries.
///
/// Every strategy shares the same bar provider. Unknown names and malformed
/// parameter tables are configuration errors.
pub fn create_strategies(
    configs: &[StrategyConfig],
    provider: Arc<dyn BarProvider>,
) -> Result<Vec<WeightedStrategy>> {
    let mut active_strategies = Vec::with_capacity(configs.len());

    for strat_config in configs {
        let strategy: Arc<dyn Strategy> = match strat_config.name.as_str() {
            "sma_crossover" => {
                let settings: SmaCrossoverSettings = strat_config.params.clone().try_into()?;
                Arc::new(SmaCrossover::new(settings, provider.clone())?)
            }
            unknown => anyhow::bail!("Attempted to create unknown strategy: {}", unknown),
        };
        tracing::info!(name = %strat_config.name, weight = strat_config.weight, "Strategy registered.");
        active_strategies.push(WeightedStrategy::new(strategy, strat_config.weight));
    }

    Ok(active_strategies)
}
