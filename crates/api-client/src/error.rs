// In crates/api-client/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build the API client: {0}")]
    ClientBuildError(String),
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[from] serde_json::Error),
    #[error("API error: status {status}, message: {message}")]
    Api { status: u16, message: String },
    #[error("Bar at {timestamp} has no volume-weighted average price")]
    MissingVwap { timestamp: String },
    #[error("Bar at {timestamp} has a VWAP that is not a finite number")]
    InvalidVwap { timestamp: String },
}

impl Error {
    /// Wraps this client error as a provider failure for `symbol`.
    pub fn into_provider_error(self, symbol: &core_types::Symbol) -> core_types::Error {
        core_types::Error::Provider {
            symbol: symbol.0.clone(),
            reason: self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
