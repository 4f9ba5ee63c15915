//! Ticker list loading from a JSON file.

use core_types::{Error as CoreError, Result as CoreResult, Symbol, TickerSource};
use std::collections::HashSet;
use std::path::PathBuf;

/// Reads the tickers to scan from a JSON array of strings, e.g. `["AAPL", "MSFT"]`.
#[derive(Debug, Clone)]
pub struct TickerFileReader {
    path: PathBuf,
}

impl TickerFileReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TickerSource for TickerFileReader {
    fn get_symbols(&self) -> CoreResult<Vec<Symbol>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            CoreError::TickerSource(format!("{}: {}", self.path.display(), e))
        })?;
        let raw: Vec<String> = serde_json::from_str(&content).map_err(|e| {
            CoreError::TickerSource(format!("{}: {}", self.path.display(), e))
        })?;

        let symbols = normalize(raw);
        tracing::info!(path = %self.path.display(), count = symbols.len(), "Loaded tickers.");
        Ok(symbols)
    }
}

/// Trims and upper-cases every ticker, dropping blanks and repeats while keeping order.
fn normalize(raw: Vec<String>) -> Vec<Symbol> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .map(Symbol)
        .collect()
}
