// In crates/engine/src/aggregator.rs

use crate::error::{Error, Result};
use crate::merge::{self, Vote};
use core_types::{AggregateOutcome, MergePolicy, StrategyOutcome, Symbol};
use futures::future;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::sync::Arc;
use strategies::{Strategy, WeightedStrategy};

/// A registered strategy with its vote weight converted for exact tallying.
struct Member {
    strategy: Arc<dyn Strategy>,
    weight: Decimal,
}

/// Runs every registered strategy for a symbol concurrently and merges the results.
pub struct DecisionEngine {
    members: Vec<Member>,
    policy: MergePolicy,
}

impl std::fmt::Debug for DecisionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.members.iter().map(|m| (m.strategy.name(), m.weight)).collect();
        f.debug_struct("DecisionEngine")
            .field("strategies", &names)
            .field("policy", &self.policy)
            .finish()
    }
}

impl DecisionEngine {
    /// Creates an engine over a non-empty strategy set.
    ///
    /// An empty set or a weight that is not a positive finite number is a
    /// configuration error.
    pub fn new(strategies: Vec<WeightedStrategy>) -> Result<Self> {
        if strategies.is_empty() {
            return Err(Error::configuration("no strategies to apply in the decision engine"));
        }

        let members = strategies
            .into_iter()
            .map(|ws| -> Result<Member> {
                let weight = Decimal::from_f64(ws.weight)
                    .filter(|w| w.is_sign_positive() && !w.is_zero())
                    .ok_or_else(|| {
                        Error::configuration(format!(
                            "strategy {} has invalid weight {}",
                            ws.strategy.name(),
                            ws.weight
                        ))
                    })?;
                Ok(Member {
                    strategy: ws.strategy,
                    weight,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            members,
            policy: MergePolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    pub fn strategy_count(&self) -> usize {
        self.members.len()
    }

    /// Evaluates `symbol` with every strategy and returns the merged decision.
    ///
    /// Each strategy runs in its own task. The merge starts only once every task
    /// has joined; results are kept in registration order, one slot per strategy.
    pub async fn evaluate(&self, symbol: &Symbol) -> AggregateOutcome {
        let handles: Vec<_> = self
            .members
            .iter()
            .map(|member| {
                let strategy = member.strategy.clone();
                let symbol = symbol.clone();
                tokio::spawn(async move { strategy.evaluate(&symbol).await })
            })
            .collect();

        let joined = future::join_all(handles).await;

        let votes: Vec<Vote> = joined
            .into_iter()
            .zip(&self.members)
            .map(|(result, member)| {
                let outcome = result.unwrap_or_else(|e| {
                    tracing::error!(symbol = %symbol, strategy = member.strategy.name(), error = %e, "Strategy task failed.");
                    StrategyOutcome::undecided(symbol.clone())
                });
                Vote {
                    outcome,
                    weight: member.weight,
                }
            })
            .collect();

        let aggregate = merge::merge(symbol, &votes, self.policy);
        tracing::debug!(
            symbol = %symbol,
            signal = %aggregate.signal,
            confidence = aggregate.confidence,
            strategies = votes.len(),
            "Aggregate decision."
        );
        aggregate
    }
}
