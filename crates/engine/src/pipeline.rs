// In crates/engine/src/pipeline.rs

use crate::aggregator::DecisionEngine;
use crate::error::{Error, Result};
use app_config::ScannerSettings;
use chrono::{Duration, Utc};
use core_types::{AggregateOutcome, Signal, Symbol};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Mutex};

/// What a batch run produced.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Buy decisions dated within the recency window, in completion order.
    pub buys: Vec<AggregateOutcome>,
    /// Number of distinct symbols that went through the engine.
    pub processed: usize,
    /// Symbols whose aggregate decision came out Undecided under the engine's merge policy.
    pub undecided: Vec<Symbol>,
    pub elapsed_ms: u64,
}

/// Fans a batch of symbols out over a fixed pool of workers sharing one queue.
pub struct TickerPipeline {
    engine: Arc<DecisionEngine>,
    worker_count: usize,
    recency_days: u32,
    progress_interval: usize,
}

impl TickerPipeline {
    pub fn new(engine: Arc<DecisionEngine>, settings: &ScannerSettings) -> Result<Self> {
        if settings.worker_count == 0 {
            return Err(Error::configuration("worker_count must be at least 1"));
        }
        Ok(Self {
            engine,
            worker_count: settings.worker_count,
            recency_days: settings.recency_days,
            progress_interval: settings.progress_interval,
        })
    }

    /// Runs every distinct symbol through the engine once and collects the recent buys.
    ///
    /// Returns only after all workers and the collector have finished.
    pub async fn run_batch(&self, symbols: Vec<Symbol>) -> Result<BatchReport> {
        let started = Instant::now();
        let symbols = dedupe(symbols);
        let total = symbols.len();
        let cutoff = Utc::now() - Duration::days(i64::from(self.recency_days));
        let capacity = total.max(1);

        tracing::info!(total, workers = self.worker_count, recency_days = self.recency_days, "Starting batch.");

        // Fill and close the work queue up front; workers stop once it drains.
        let (symbol_tx, symbol_rx) = mpsc::channel::<Symbol>(capacity);
        for symbol in symbols {
            symbol_tx
                .send(symbol)
                .await
                .map_err(|_| Error::configuration("symbol queue closed before the batch started"))?;
        }
        drop(symbol_tx);
        let symbol_rx = Arc::new(Mutex::new(symbol_rx));

        // Sized to the batch, so a worker's send never waits on the collector.
        let (result_tx, mut result_rx) = mpsc::channel::<AggregateOutcome>(capacity);

        let progress_interval = self.progress_interval;
        let collector = tokio::spawn(async move {
            let mut buys = Vec::new();
            let mut undecided = Vec::new();
            let mut processed = 0usize;

            while let Some(outcome) = result_rx.recv().await {
                processed += 1;
                if progress_interval > 0 && processed % progress_interval == 0 {
                    tracing::info!(processed, total, "Progress.");
                }
                if outcome.signal == Signal::Undecided {
                    undecided.push(outcome.symbol.clone());
                }
                if outcome.is_buy_since(cutoff) {
                    buys.push(outcome);
                }
            }

            tracing::info!(processed, buys = buys.len(), "Done processing.");
            (buys, processed, undecided)
        });

        let workers: Vec<_> = (0..self.worker_count)
            .map(|worker_id| {
                let engine = self.engine.clone();
                let queue = symbol_rx.clone();
                let results = result_tx.clone();
                tokio::spawn(async move {
                    loop {
                        // The lock is released before evaluation starts.
                        let next = queue.lock().await.recv().await;
                        let Some(symbol) = next else { break };

                        let outcome = engine.evaluate(&symbol).await;
                        tracing::debug!(worker_id, symbol = %symbol, signal = %outcome.signal, "Evaluated.");
                        if results.send(outcome).await.is_err() {
                            tracing::warn!(worker_id, "Result channel closed, stopping worker.");
                            break;
                        }
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.await?;
        }
        drop(result_tx);

        let (buys, processed, undecided) = collector.await?;

        Ok(BatchReport {
            buys,
            processed,
            undecided,
            elapsed_ms: started.elapsed().as_millis() as u64,
        })
    }
}

fn dedupe(symbols: Vec<Symbol>) -> Vec<Symbol> {
    let mut seen = HashSet::new();
    symbols.into_iter().filter(|s| seen.insert(s.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Scripted;
    use strategies::WeightedStrategy;

    fn settings(worker_count: usize) -> ScannerSettings {
        ScannerSettings {
            worker_count,
            ..ScannerSettings::default()
        }
    }

    fn pipeline_over(strategy: Arc<Scripted>, workers: usize) -> TickerPipeline {
        let engine = DecisionEngine::new(vec![WeightedStrategy::new(strategy, 1.0)]).unwrap();
        TickerPipeline::new(Arc::new(engine), &settings(workers)).unwrap()
    }

    fn symbols(names: &[&str]) -> Vec<Symbol> {
        names.iter().map(|n| Symbol::from(*n)).collect()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn keeps_only_recent_buys() {
        let now = Utc::now();
        let script = Scripted::new([
            ("AAPL", Signal::Buy, now),
            ("MSFT", Signal::Buy, now - Duration::days(60)),
            ("NVDA", Signal::Sell, now),
            ("AMD", Signal::Hold, now),
        ]);
        let pipeline = pipeline_over(script, 2);

        let report = pipeline
            .run_batch(symbols(&["AAPL", "MSFT", "NVDA", "AMD", "TSLA"]))
            .await
            .unwrap();

        assert_eq!(report.processed, 5);
        let buys: Vec<_> = report.buys.iter().map(|o| o.symbol.0.as_str()).collect();
        assert_eq!(buys, ["AAPL"]);
        assert_eq!(report.undecided, symbols(&["TSLA"]));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn each_symbol_is_evaluated_exactly_once() {
        let script = Scripted::empty();
        let pipeline = pipeline_over(script.clone(), 3);
        let names: Vec<String> = (0..40).map(|i| format!("T{i}")).collect();
        let batch: Vec<Symbol> = names.iter().map(|n| Symbol(n.clone())).collect();

        let report = pipeline.run_batch(batch).await.unwrap();

        assert_eq!(report.processed, 40);
        let seen = script.seen.lock().unwrap();
        assert_eq!(seen.len(), 40);
        assert!(seen.values().all(|&n| n == 1));
    }

    #[tokio::test]
    async fn duplicate_symbols_are_processed_once() {
        let script = Scripted::new([("AAPL", Signal::Buy, Utc::now())]);
        let pipeline = pipeline_over(script.clone(), 2);

        let report = pipeline
            .run_batch(symbols(&["AAPL", "AAPL", "MSFT", "AAPL"]))
            .await
            .unwrap();

        assert_eq!(report.processed, 2);
        assert_eq!(report.buys.len(), 1);
        assert_eq!(script.times_seen("AAPL"), 1);
    }

    #[tokio::test]
    async fn empty_batch_completes() {
        let pipeline = pipeline_over(Scripted::empty(), 2);

        let report = pipeline.run_batch(Vec::new()).await.unwrap();

        assert_eq!(report.processed, 0);
        assert!(report.buys.is_empty());
        assert!(report.undecided.is_empty());
    }

    #[tokio::test]
    async fn more_workers_than_symbols() {
        let pipeline = pipeline_over(Scripted::new([("AAPL", Signal::Buy, Utc::now())]), 16);

        let report = pipeline.run_batch(symbols(&["AAPL"])).await.unwrap();

        assert_eq!(report.processed, 1);
        assert_eq!(report.buys.len(), 1);
    }

    #[test]
    fn zero_workers_is_rejected() {
        let engine = DecisionEngine::new(vec![WeightedStrategy::new(Scripted::empty(), 1.0)]).unwrap();
        let engine = Arc::new(engine);

        let err = TickerPipeline::new(engine.clone(), &settings(0)).err().unwrap();
        assert!(matches!(err, Error::Core(core_types::Error::Configuration(_))));
        assert!(TickerPipeline::new(engine, &settings(1)).is_ok());
    }
}
