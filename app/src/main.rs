// In app/src/main.rs

use anyhow::{Context, Result, bail};
use api_client::AlpacaClient;
use app_config::{Settings, TickerFileReader};
use clap::{Parser, Subcommand};
use core_types::{BarProvider, Symbol, TickerSource};
use engine::{DecisionEngine, TickerPipeline};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Scans US equities for moving-average crossover signals.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scans every ticker in the ticker file and prints the recent Buy signals.
    Scan {
        /// JSON file with the tickers to scan; overrides `scanner.tickers_path`.
        #[arg(short, long)]
        tickers: Option<PathBuf>,

        /// Number of concurrent workers; overrides `scanner.worker_count`.
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Evaluates a single symbol and prints the aggregate decision.
    Evaluate {
        /// The ticker to evaluate (e.g., "AAPL").
        symbol: String,
    },

    /// Serves the HTTP API.
    Serve,
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = app_config::load_settings().context("failed to load settings")?;

    let level = tracing::Level::from_str(&settings.app.log_level).unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(
        tracing_subscriber::filter::Targets::new()
            .with_target("hyper", tracing::Level::WARN)
            .with_target("reqwest", tracing::Level::WARN)
            .with_default(level),
    );
    tracing_subscriber::registry().with(fmt_layer).init();

    tracing::info!(environment = %settings.app.environment, "Starting scanner");

    match cli.command {
        Commands::Scan { tickers, workers } => handle_scan(settings, tickers, workers).await?,
        Commands::Evaluate { symbol } => handle_evaluate(settings, symbol).await?,
        Commands::Serve => handle_serve(settings).await?,
    }

    Ok(())
}

/// Wires the Alpaca client into the configured strategies and the decision engine.
fn build_engine(settings: &Settings) -> Result<Arc<DecisionEngine>> {
    if settings.alpaca.api_key.is_empty() || settings.alpaca.secret_key.is_empty() {
        bail!("Alpaca credentials are missing; set APP__ALPACA__API_KEY and APP__ALPACA__SECRET_KEY");
    }

    let client = AlpacaClient::new(&settings.alpaca)?;
    let provider: Arc<dyn BarProvider> = Arc::new(client);

    let strategies = strategies::create_strategies(&settings.strategies, provider)?;
    tracing::info!(count = strategies.len(), policy = ?settings.scanner.merge_policy, "Strategies registered.");

    let engine = DecisionEngine::new(strategies)?.with_policy(settings.scanner.merge_policy);
    Ok(Arc::new(engine))
}

async fn handle_scan(settings: Settings, tickers: Option<PathBuf>, workers: Option<usize>) -> Result<()> {
    let mut scanner = settings.scanner.clone();
    if let Some(path) = tickers {
        scanner.tickers_path = path;
    }
    if let Some(count) = workers {
        scanner.worker_count = count;
    }

    let engine = build_engine(&settings)?;
    let symbols = TickerFileReader::new(&scanner.tickers_path).get_symbols()?;

    let pipeline = TickerPipeline::new(engine, &scanner)?;
    let report = pipeline.run_batch(symbols).await?;

    println!("{}", serde_json::to_string_pretty(&report.buys)?);
    println!(
        "{} buy signal(s) in the last {} days across {} symbols ({} undecided) in {} ms",
        report.buys.len(),
        scanner.recency_days,
        report.processed,
        report.undecided.len(),
        report.elapsed_ms
    );
    Ok(())
}

async fn handle_evaluate(settings: Settings, symbol: String) -> Result<()> {
    let symbol = Symbol(symbol.trim().to_uppercase());
    if symbol.0.is_empty() {
        bail!("symbol must not be empty");
    }

    let engine = build_engine(&settings)?;
    let outcome = engine.evaluate(&symbol).await;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

async fn handle_serve(settings: Settings) -> Result<()> {
    let engine = build_engine(&settings)?;
    let tickers: Arc<dyn TickerSource> = Arc::new(TickerFileReader::new(&settings.scanner.tickers_path));

    let state = web_server::AppState {
        engine,
        scanner: settings.scanner.clone(),
        tickers,
    };
    web_server::run(settings.server, state).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_accepts_overrides() {
        let cli = Cli::try_parse_from(["sma-scanner", "scan", "--tickers", "t.json", "--workers", "8"]).unwrap();
        match cli.command {
            Commands::Scan { tickers, workers } => {
                assert_eq!(tickers, Some(PathBuf::from("t.json")));
                assert_eq!(workers, Some(8));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn evaluate_requires_a_symbol() {
        assert!(Cli::try_parse_from(["sma-scanner", "evaluate"]).is_err());
        assert!(Cli::try_parse_from(["sma-scanner", "evaluate", "AAPL"]).is_ok());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
