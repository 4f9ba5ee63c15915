// In crates/core-types/src/error.rs

use thiserror::Error;

/// The error taxonomy shared by every crate in the workspace.
///
/// `InsufficientData` and `Provider` are recoverable and scoped to a single
/// strategy evaluation. `Configuration` and `TickerSource` are fatal and must
/// stop the affected run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Insufficient data: {required} bars required, {available} available")]
    InsufficientData { required: usize, available: usize },

    #[error("Market data provider failed for {symbol}: {reason}")]
    Provider { symbol: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Failed to read ticker source: {0}")]
    TickerSource(String),
}

impl Error {
    /// Whether this error must abort the run rather than degrade one outcome.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Configuration(_) | Error::TickerSource(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_configuration_and_ticker_source_are_fatal() {
        assert!(Error::Configuration("no strategies".into()).is_fatal());
        assert!(Error::TickerSource("missing file".into()).is_fatal());
        assert!(!Error::InsufficientData { required: 201, available: 3 }.is_fatal());
        assert!(
            !Error::Provider { symbol: "AAPL".into(), reason: "429".into() }.is_fatal()
        );
    }
}
