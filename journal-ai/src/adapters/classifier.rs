//! Text classification adapters
//!
//! Text-classification backends answer in several shapes depending on the
//! model and on `top_k`:
//! - `[{"label": "POSITIVE", "score": 0.99}]`
//! - `[[{"label": "joy", "score": 0.91}, {"label": "surprise", "score": 0.05}]]`
//! - `{"label": "joy", "score": 0.91}`
//!
//! `normalize_classification` collapses all of them into the single
//! highest-scoring `ClassifierSignal`.

use crate::adapters::InferenceClient;
use crate::types::{AdapterError, ClassificationAdapter, ClassifierSignal};
use journal_common::config::BackendConfig;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct RawLabel {
    label: String,
    #[serde(default)]
    score: f32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawClassification {
    Nested(Vec<Vec<RawLabel>>),
    Flat(Vec<RawLabel>),
    Single(RawLabel),
}

/// Reduce any supported response shape to the top label
pub fn normalize_classification(raw: &Value) -> Result<ClassifierSignal, AdapterError> {
    let parsed: RawClassification = serde_json::from_value(raw.clone())
        .map_err(|e| AdapterError::Parse(format!("Unrecognized classifier response: {}", e)))?;

    let candidates: Vec<RawLabel> = match parsed {
        RawClassification::Nested(rows) => rows.into_iter().next().unwrap_or_default(),
        RawClassification::Flat(labels) => labels,
        RawClassification::Single(label) => vec![label],
    };

    candidates
        .into_iter()
        .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal))
        .map(|best| ClassifierSignal::new(best.label, best.score))
        .ok_or_else(|| AdapterError::Parse("Classifier returned no labels".to_string()))
}

/// One hosted text-classification model
pub struct HfTextClassifier {
    client: InferenceClient,
    model: String,
}

impl HfTextClassifier {
    pub fn new(client: InferenceClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub async fn classify(&self, text: &str) -> Result<ClassifierSignal, AdapterError> {
        let raw = self.client.infer(&self.model, Value::from(text)).await?;
        let signal = normalize_classification(&raw)?;
        debug!(
            model = %self.model,
            label = %signal.label,
            score = signal.score,
            "Classification complete"
        );
        Ok(signal)
    }
}

/// Sentiment + emotion adapter backed by two hosted models
pub struct HfClassificationAdapter {
    sentiment: HfTextClassifier,
    emotion: HfTextClassifier,
}

impl HfClassificationAdapter {
    pub fn new(config: &BackendConfig) -> Result<Self, AdapterError> {
        let client = InferenceClient::new(config)?;
        Ok(Self {
            sentiment: HfTextClassifier::new(client.clone(), &config.sentiment_model),
            emotion: HfTextClassifier::new(client, &config.emotion_model),
        })
    }
}

#[async_trait::async_trait]
impl ClassificationAdapter for HfClassificationAdapter {
    async fn classify_sentiment(&self, text: &str) -> Result<ClassifierSignal, AdapterError> {
        self.sentiment.classify(text).await
    }

    async fn classify_emotion(&self, text: &str) -> Result<ClassifierSignal, AdapterError> {
        self.emotion.classify(text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_list_sentiment() {
        let raw = json!([{ "label": "POSITIVE", "score": 0.9987 }]);
        let signal = normalize_classification(&raw).unwrap();
        assert_eq!(signal.label, "positive");
        assert!((signal.score - 0.9987).abs() < 1e-6);
    }

    #[test]
    fn test_nested_list_picks_highest_score() {
        let raw = json!([[
            { "label": "surprise", "score": 0.05 },
            { "label": "Joy", "score": 0.91 },
            { "label": "neutral", "score": 0.04 }
        ]]);
        let signal = normalize_classification(&raw).unwrap();
        assert_eq!(signal.label, "joy");
    }

    #[test]
    fn test_single_object_without_score() {
        let raw = json!({ "label": "FEAR" });
        let signal = normalize_classification(&raw).unwrap();
        assert_eq!(signal.label, "fear");
        assert_eq!(signal.score, 0.0);
    }

    #[test]
    fn test_empty_list_is_parse_error() {
        assert!(matches!(
            normalize_classification(&json!([])),
            Err(AdapterError::Parse(_))
        ));
        assert!(matches!(
            normalize_classification(&json!([[]])),
            Err(AdapterError::Parse(_))
        ));
    }

    #[test]
    fn test_error_payload_is_parse_error() {
        let raw = json!({ "error": "Model is currently loading" });
        assert!(matches!(
            normalize_classification(&raw),
            Err(AdapterError::Parse(_))
        ));
    }
}
