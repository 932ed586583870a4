//! Journal entry endpoints
//!
//! **Request:** `{"text": "..."}` for both POST routes. A missing `text` field
//! is treated the same as an empty one. Bodies that fail to parse are
//! reported through the same error envelope as every other failure.

use crate::types::{AnalysisResult, MoodTags};
use crate::{ApiError, ApiResult, AppState};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::{get, post},
    Json, Router,
};
use journal_common::journal::{JournalEntry, DEFAULT_RECENT_COUNT};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Body of `POST /analyze` and `POST /add`
#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: MoodTags,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub saved: JournalEntry,
}

#[derive(Debug, Serialize)]
pub struct EntriesResponse {
    pub entries: Vec<JournalEntry>,
}

/// Query string of `GET /last`
#[derive(Debug, Deserialize)]
pub struct LastQuery {
    pub n: Option<usize>,
}

/// Run the tagger, tracking the latest adapter failure for `/health`
///
/// A successful analysis clears the recorded failure.
async fn analyze_text(state: &AppState, text: &str) -> ApiResult<MoodTags> {
    match state.tagger.analyze(text).await {
        Ok(AnalysisResult::Tags(tags)) => {
            let mut last_error = state.last_error.write().await;
            if last_error.take().is_some() {
                info!("Analysis recovered");
            }
            Ok(tags)
        }
        Ok(AnalysisResult::Rejected { .. }) => Err(ApiError::EmptyInput),
        Err(e) => {
            warn!(error = %e, "Analysis failed");
            *state.last_error.write().await = Some(e.to_string());
            Err(e.into())
        }
    }
}

/// POST /analyze
///
/// Tags an entry without saving it.
pub async fn analyze_entry(
    State(state): State<AppState>,
    payload: Result<Json<EntryRequest>, JsonRejection>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let Json(request) = payload?;
    let analysis = analyze_text(&state, &request.text).await?;
    Ok(Json(AnalyzeResponse { analysis }))
}

/// POST /add
///
/// Tags an entry and appends it to the journal. Nothing is written when the
/// text is empty or analysis fails.
pub async fn add_entry(
    State(state): State<AppState>,
    payload: Result<Json<EntryRequest>, JsonRejection>,
) -> ApiResult<Json<SaveResponse>> {
    let Json(request) = payload?;
    let tags = analyze_text(&state, &request.text).await?;

    let entry = JournalEntry {
        timestamp: state.clock.stamp(),
        text: request.text,
        tags,
    };
    state.journal.append(entry.clone()).await?;

    info!(
        sentiment = %entry.tags.sentiment,
        emotion = %entry.tags.emotion,
        "Journal entry saved"
    );
    Ok(Json(SaveResponse { saved: entry }))
}

/// GET /last?n=N
///
/// Most recent N entries (default 3), oldest first.
pub async fn last_entries(
    State(state): State<AppState>,
    Query(query): Query<LastQuery>,
) -> ApiResult<Json<EntriesResponse>> {
    let n = query.n.unwrap_or(DEFAULT_RECENT_COUNT);
    let entries = state.journal.last(n).await?;
    Ok(Json(EntriesResponse { entries }))
}

/// GET /all
pub async fn all_entries(State(state): State<AppState>) -> ApiResult<Json<EntriesResponse>> {
    let entries = state.journal.all().await?;
    Ok(Json(EntriesResponse { entries }))
}

/// Build journal entry routes
pub fn entry_routes() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze_entry))
        .route("/add", post(add_entry))
        .route("/last", get(last_entries))
        .route("/all", get(all_entries))
}
