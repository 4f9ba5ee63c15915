// In crates/app-config/src/types.rs

use serde::Deserialize;
use std::path::PathBuf;

use core_types::{MergePolicy, StrategyConfig};

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Credentials and endpoint for the Alpaca market data API.
    pub alpaca: AlpacaSettings,
    pub server: ServerSettings,
    #[serde(default)]
    pub scanner: ScannerSettings,
    /// The strategies registered with the decision engine, in vote order.
    #[serde(default)]
    pub strategies: Vec<StrategyConfig>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AlpacaSettings {
    /// The API key id for Alpaca.
    pub api_key: String,
    /// The secret key for Alpaca.
    pub secret_key: String,
    /// The market data REST base URL.
    #[serde(default = "default_data_base_url")]
    pub data_base_url: String,
    /// The bar feed to query ("iex" on free plans, "sip" otherwise).
    #[serde(default = "default_feed")]
    pub feed: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Settings for the batch ticker pipeline.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScannerSettings {
    /// Number of concurrent workers pulling symbols off the queue.
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,
    /// Buy signals older than this many calendar days are dropped from the report.
    #[serde(default = "default_recency_days")]
    pub recency_days: u32,
    /// Log progress every this many processed symbols (0 disables it).
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
    /// JSON file holding the array of tickers to scan.
    #[serde(default = "default_tickers_path")]
    pub tickers_path: PathBuf,
    #[serde(default)]
    pub merge_policy: MergePolicy,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            worker_count: default_worker_count(),
            recency_days: default_recency_days(),
            progress_interval: default_progress_interval(),
            tickers_path: default_tickers_path(),
            merge_policy: MergePolicy::default(),
        }
    }
}

/// Helper functions for serde defaults
fn default_log_level() -> String { "info".into() }
fn default_data_base_url() -> String { "https://data.alpaca.markets".into() }
fn default_feed() -> String { "iex".into() }
fn default_port() -> u16 { 4000 }
fn default_worker_count() -> usize { 2 }
fn default_recency_days() -> u32 { 30 }
fn default_progress_interval() -> usize { 10 }
fn default_tickers_path() -> PathBuf { PathBuf::from("config/tickers.json") }
