//! journal-ai library interface
//!
//! Mood tagging pipeline, its model adapters, and the HTTP surface. The
//! binaries (`journal-ai` server, `journal-cli`) are thin wrappers around
//! `bootstrap` + `build_router`.

pub mod adapters;
pub mod api;
pub mod bootstrap;
pub mod corpus;
pub mod error;
pub mod lexicon;
pub mod pipeline;
pub mod types;

pub use crate::error::{ApiError, ApiResult};
pub use crate::pipeline::{MoodTagger, PipelineError, PipelineSettings};

use axum::Router;
use chrono::{DateTime, Utc};
use journal_common::journal::JournalStore;
use journal_common::time::JournalClock;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Mood tagger (immutable after startup)
    pub tagger: Arc<MoodTagger>,
    /// Journal file store
    pub journal: Arc<JournalStore>,
    /// Timestamp formatter for saved entries
    pub clock: JournalClock,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last analysis failure for diagnostics
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(tagger: Arc<MoodTagger>, journal: Arc<JournalStore>, clock: JournalClock) -> Self {
        Self {
            tagger,
            journal,
            clock,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::entry_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
