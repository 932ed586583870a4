//! Health check endpoint
//!
//! Reports uptime, reference corpus size, and the last analysis failure.

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::types::Polarity;
use crate::AppState;

/// Exemplar counts per polarity
#[derive(Debug, Serialize)]
pub struct CorpusSize {
    pub positive: usize,
    pub negative: usize,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok", or "degraded" when a polarity has no exemplars
    pub status: String,
    /// Module name ("journal-ai")
    pub module: String,
    /// Crate version from Cargo.toml
    pub version: String,
    /// Seconds since service started
    pub uptime_seconds: u64,
    pub corpus: CorpusSize,
    /// Last analysis failure, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);
    let uptime_seconds = uptime.num_seconds().max(0) as u64;

    let corpus = state.tagger.corpus();
    let size = CorpusSize {
        positive: corpus.len(Polarity::Positive),
        negative: corpus.len(Polarity::Negative),
    };
    // Every analysis fails while either side is empty
    let status = if size.positive == 0 || size.negative == 0 {
        "degraded"
    } else {
        "ok"
    };

    let last_error = state.last_error.read().await.clone();

    Json(HealthResponse {
        status: status.to_string(),
        module: "journal-ai".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
        corpus: size,
        last_error,
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
