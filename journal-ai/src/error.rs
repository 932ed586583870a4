//! Error types for journal-ai
//!
//! Every handler failure is rendered as `{"error": {"code", "message"}}`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::pipeline::PipelineError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Entry text missing or whitespace-only (400)
    #[error("No entry text provided.")]
    EmptyInput,

    /// Request body missing, malformed, or of the wrong content type
    #[error("Invalid request body: {message}")]
    InvalidBody { status: StatusCode, message: String },

    /// Classification, embedding, or corpus failure (503)
    #[error("Analysis unavailable: {0}")]
    AnalysisUnavailable(String),

    /// journal-common error (journal file, config)
    #[error("Common error: {0}")]
    Common(#[from] journal_common::Error),
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        ApiError::AnalysisUnavailable(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::EmptyInput => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody { status, .. } => *status,
            ApiError::AnalysisUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Common(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::EmptyInput => "EMPTY_INPUT",
            ApiError::InvalidBody { .. } => "INVALID_BODY",
            ApiError::AnalysisUnavailable(_) => "ANALYSIS_UNAVAILABLE",
            ApiError::Common(_) => "COMMON_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::InvalidBody { message, .. } => message.clone(),
            ApiError::AnalysisUnavailable(msg) => msg.clone(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AdapterError;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::EmptyInput.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::AnalysisUnavailable("down".into()).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        assert_eq!(
            ApiError::from(journal_common::Error::from(io)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_pipeline_error_maps_to_unavailable() {
        let err: ApiError = PipelineError::from(AdapterError::Network("timed out".into())).into();
        assert_eq!(err.code(), "ANALYSIS_UNAVAILABLE");
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_invalid_body_keeps_rejection_status() {
        let err = ApiError::InvalidBody {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            message: "Expected request with `Content-Type: application/json`".into(),
        };
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(err.code(), "INVALID_BODY");
    }
}
