// In crates/web-server/src/lib.rs

use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::{get, post},
};
use app_config::{ScannerSettings, types::ServerSettings};
use core_types::{AggregateOutcome, Symbol, TickerSource};
use engine::{BatchReport, DecisionEngine, TickerPipeline};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;

pub mod error;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// The shared application state that is available to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DecisionEngine>,
    pub scanner: ScannerSettings,
    /// Where `POST /api/scans` takes its symbols from when the request names none.
    pub tickers: Arc<dyn TickerSource>,
}

/// Body of `POST /api/scans`.
#[derive(Debug, Default, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub symbols: Vec<String>,
}

/// Creates the main application router with all routes and middleware.
pub fn create_router(app_state: AppState) -> Router {
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    let api_router = Router::new()
        .route("/signals/{symbol}", get(get_signal_handler))
        .route("/scans", post(run_scan_handler));

    Router::new()
        .route("/health", get(health_check_handler))
        .nest("/api", api_router)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

async fn health_check_handler() -> &'static str {
    "OK"
}

/// The handler for `GET /api/signals/{symbol}`.
async fn get_signal_handler(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<AggregateOutcome>> {
    let symbol = parse_symbol(&symbol)?;
    tracing::info!(symbol = %symbol, "Evaluating symbol.");
    Ok(Json(state.engine.evaluate(&symbol).await))
}

/// The handler for `POST /api/scans`.
/// An empty symbol list scans the configured ticker file.
async fn run_scan_handler(
    State(state): State<AppState>,
    body: Option<Json<ScanRequest>>,
) -> Result<Json<BatchReport>> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let symbols = if request.symbols.is_empty() {
        state.tickers.get_symbols()?
    } else {
        request
            .symbols
            .iter()
            .map(|s| parse_symbol(s))
            .collect::<Result<Vec<_>>>()?
    };

    let pipeline = TickerPipeline::new(state.engine.clone(), &state.scanner)?;
    let report = pipeline.run_batch(symbols).await?;
    Ok(Json(report))
}

/// Upper-cases a ticker and rejects anything that is not a plausible symbol.
fn parse_symbol(raw: &str) -> Result<Symbol> {
    let symbol = raw.trim().to_uppercase();
    let valid = !symbol.is_empty()
        && symbol.len() <= 12
        && symbol.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    if !valid {
        return Err(Error::BadRequest(format!("invalid symbol {raw:?}")));
    }
    Ok(Symbol(symbol))
}

/// The main entry point for running the web server.
///
/// Runs until the process is terminated.
pub async fn run(settings: ServerSettings, app_state: AppState) -> Result<()> {
    let app = create_router(app_state);

    let address = format!("{}:{}", settings.host, settings.port);
    tracing::info!("Web server listening on {}", address);

    let listener = TcpListener::bind(&address).await.map_err(Error::ServerBindError)?;

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(Error::ServeError)?;

    Ok(())
}
