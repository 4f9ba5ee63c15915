//! Fake strategies shared by the engine's unit tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use core_types::{Signal, StrategyOutcome, Symbol};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use strategies::Strategy;

/// Always reports the same signal, optionally after a delay, counting its calls.
pub struct Fixed {
    pub signal: Signal,
    pub as_of: DateTime<Utc>,
    calls: Arc<AtomicUsize>,
    delay: Duration,
}

impl Fixed {
    pub fn new(signal: Signal) -> Arc<Self> {
        Self::counting(signal, Arc::new(AtomicUsize::new(0)), Duration::ZERO)
    }

    pub fn buy_today() -> Arc<Self> {
        Self::new(Signal::Buy)
    }

    pub fn counting(signal: Signal, calls: Arc<AtomicUsize>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            signal,
            as_of: Utc::now(),
            calls,
            delay,
        })
    }
}

#[async_trait]
impl Strategy for Fixed {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn evaluate(&self, symbol: &Symbol) -> StrategyOutcome {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        StrategyOutcome::decided(symbol.clone(), self.signal, self.as_of)
    }
}

pub struct Panicking;

#[async_trait]
impl Strategy for Panicking {
    fn name(&self) -> &'static str {
        "panicking"
    }

    async fn evaluate(&self, _symbol: &Symbol) -> StrategyOutcome {
        panic!("strategy blew up")
    }
}

/// Replays a scripted outcome per symbol and records how often each symbol was seen.
#[derive(Default)]
pub struct Scripted {
    pub script: HashMap<Symbol, (Signal, DateTime<Utc>)>,
    pub seen: Mutex<HashMap<Symbol, usize>>,
}

impl Scripted {
    pub fn new(script: impl IntoIterator<Item = (&'static str, Signal, DateTime<Utc>)>) -> Arc<Self> {
        Arc::new(Self {
            script: script
                .into_iter()
                .map(|(s, signal, at)| (Symbol::from(s), (signal, at)))
                .collect(),
            seen: Mutex::new(HashMap::new()),
        })
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn times_seen(&self, symbol: &str) -> usize {
        self.seen
            .lock()
            .unwrap()
            .get(&Symbol::from(symbol))
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl Strategy for Scripted {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn evaluate(&self, symbol: &Symbol) -> StrategyOutcome {
        *self.seen.lock().unwrap().entry(symbol.clone()).or_default() += 1;
        match self.script.get(symbol) {
            Some((signal, at)) => StrategyOutcome::decided(symbol.clone(), *signal, *at),
            None => StrategyOutcome::undecided(symbol.clone()),
        }
    }
}
