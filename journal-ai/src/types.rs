//! Core Types and Trait Definitions for journal-ai
//!
//! Defines the capability seams of the mood-tagging pipeline:
//! - **ClassificationAdapter:** binary sentiment + single-label emotion
//! - **Embedder:** text → normalized vector
//! - **CorpusSource:** labelled exemplar provider, consumed once at startup
//!
//! Each seam is a trait so alternative model backends (or test fakes) can be
//! substituted without touching pipeline logic.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use journal_common::models::{Level, MoodTags, Sentiment};

// ============================================================================
// Common Types
// ============================================================================

/// Label + confidence returned by a classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSignal {
    /// Normalized (lower-case) label
    pub label: String,
    /// Confidence score (0.0-1.0)
    pub score: f32,
}

impl ClassifierSignal {
    /// Create new signal with lower-cased label and clamped score (0.0-1.0)
    pub fn new(label: impl AsRef<str>, score: f32) -> Self {
        let score = if score.is_finite() { score.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            label: label.as_ref().trim().to_lowercase(),
            score,
        }
    }
}

/// Tone of a reference exemplar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Positive => f.write_str("positive"),
            Polarity::Negative => f.write_str("negative"),
        }
    }
}

/// One exemplar text produced by a corpus source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelledExample {
    pub text: String,
    pub polarity: Polarity,
}

impl LabelledExample {
    pub fn new(text: impl Into<String>, polarity: Polarity) -> Self {
        Self {
            text: text.into(),
            polarity,
        }
    }
}

/// Why an entry was rejected without analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    #[serde(rename = "empty input")]
    EmptyInput,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::EmptyInput => f.write_str("empty input"),
        }
    }
}

/// Outcome of analysing one entry
///
/// Serializes as the bare tags object, or as `{"error": "empty input"}`.
/// Callers must branch on the variant before reading tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Tags(MoodTags),
    Rejected { error: RejectReason },
}

impl AnalysisResult {
    pub fn empty_input() -> Self {
        AnalysisResult::Rejected {
            error: RejectReason::EmptyInput,
        }
    }

    pub fn tags(&self) -> Option<&MoodTags> {
        match self {
            AnalysisResult::Tags(tags) => Some(tags),
            AnalysisResult::Rejected { .. } => None,
        }
    }

    pub fn into_tags(self) -> Option<MoodTags> {
        match self {
            AnalysisResult::Tags(tags) => Some(tags),
            AnalysisResult::Rejected { .. } => None,
        }
    }

    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            AnalysisResult::Tags(_) => None,
            AnalysisResult::Rejected { error } => Some(*error),
        }
    }
}

// ============================================================================
// Adapter Traits
// ============================================================================

/// Sentiment + emotion classification capability
///
/// Implementations normalize whatever shape the backend returns into a single
/// `ClassifierSignal`. Errors are not retried.
#[async_trait::async_trait]
pub trait ClassificationAdapter: Send + Sync {
    /// Binary sentiment; label is "positive" or "negative"
    async fn classify_sentiment(&self, text: &str) -> Result<ClassifierSignal, AdapterError>;

    /// Highest-confidence emotion label (e.g. joy, sadness, anger, fear,
    /// surprise, disgust, neutral)
    async fn classify_emotion(&self, text: &str) -> Result<ClassifierSignal, AdapterError>;
}

/// Text embedding capability
#[async_trait::async_trait]
pub trait Embedder: Send + Sync {
    /// Embed one text into an L2-normalized vector
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AdapterError>;

    /// Embed many texts, preserving order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, AdapterError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }
}

/// Provider of labelled exemplars for the reference corpus
#[async_trait::async_trait]
pub trait CorpusSource: Send + Sync {
    /// Source name for diagnostics
    fn name(&self) -> String;

    /// Load all examples in source order
    async fn load(&self) -> Result<Vec<LabelledExample>, SourceError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Classification / embedding backend failure
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Network communication error (includes timeouts)
    #[error("Network error: {0}")]
    Network(String),

    /// Backend returned a non-success status
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Response did not match any known shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Adapter could not be constructed
    #[error("Adapter configuration error: {0}")]
    Config(String),
}

/// Corpus source failure (recovered by skipping the source)
#[derive(Debug, Error)]
pub enum SourceError {
    /// Source file or service not present
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
