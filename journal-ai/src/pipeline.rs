//! Mood tagging pipeline
//!
//! Turns one journal entry into a `MoodTags` value:
//!
//! 1. Validation: trimmed text must be non-empty
//! 2. Clause selection: text after the first `" but "` carries the tone
//! 3. Baseline classification: sentiment + emotion labels
//! 4. Semantic refinement: similarity margin against the reference corpus
//! 5. Lexicon override: slang phrases force the sentiment
//! 6. Derived metrics: stress and energy lookups
//!
//! The stages run strictly in order with no retries. Adapter and corpus
//! failures propagate to the caller; only empty input is reported as a
//! regular `AnalysisResult`.

use crate::corpus::{CorpusError, ReferenceCorpus};
use crate::lexicon::SlangLexicon;
use crate::types::{
    AdapterError, AnalysisResult, ClassificationAdapter, Embedder, Level, MoodTags, Polarity,
    Sentiment,
};
use journal_common::config::TaggingConfig;
use std::borrow::Cow;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Contrastive conjunction used for clause selection
const CLAUSE_SEPARATOR: &str = " but ";

/// Pipeline failure (analysis unavailable)
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Classification or embedding backend failed
    #[error("Adapter failure: {0}")]
    Adapter(#[from] AdapterError),

    /// Reference corpus unusable
    #[error("Corpus failure: {0}")]
    Corpus(#[from] CorpusError),
}

/// Tunable constants of the refinement stage
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    /// Similarity margin below which sentiment is neutral
    pub neutral_threshold: f32,
    /// Substrings that force a neutral sentiment (lower-case)
    pub low_affect_markers: Vec<String>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&TaggingConfig::default())
    }
}

impl From<&TaggingConfig> for PipelineSettings {
    fn from(config: &TaggingConfig) -> Self {
        Self {
            neutral_threshold: config.neutral_threshold,
            low_affect_markers: config
                .low_affect_markers
                .iter()
                .map(|m| m.to_lowercase())
                .filter(|m| !m.trim().is_empty())
                .collect(),
        }
    }
}

/// Pick the span of `trimmed` that represents the entry's tone
///
/// If `" but "` occurs (case-insensitively), the lower-cased remainder after
/// its first occurrence is returned, provided it is non-empty after trimming.
/// Otherwise `trimmed` is returned unchanged.
pub fn select_clause(trimmed: &str) -> Cow<'_, str> {
    let lowered = trimmed.to_lowercase();
    match lowered.split_once(CLAUSE_SEPARATOR) {
        Some((_, after)) if !after.trim().is_empty() => Cow::Owned(after.trim().to_string()),
        _ => Cow::Borrowed(trimmed),
    }
}

/// Stress from final sentiment and emotion
pub fn infer_stress(sentiment: Sentiment, emotion: &str) -> Level {
    match emotion {
        "fear" | "sadness" | "anger" => Level::High,
        _ if sentiment == Sentiment::Negative => Level::Medium,
        _ => Level::Low,
    }
}

/// Energy from emotion alone
pub fn infer_energy(emotion: &str) -> Level {
    match emotion {
        "joy" | "surprise" => Level::High,
        "fear" | "sadness" => Level::Low,
        _ => Level::Medium,
    }
}

/// The mood-tagging orchestrator
///
/// Holds only immutable collaborators, so one instance can serve any number
/// of concurrent callers.
pub struct MoodTagger {
    classifier: Arc<dyn ClassificationAdapter>,
    embedder: Arc<dyn Embedder>,
    corpus: Arc<ReferenceCorpus>,
    lexicon: SlangLexicon,
    settings: PipelineSettings,
}

impl MoodTagger {
    pub fn new(
        classifier: Arc<dyn ClassificationAdapter>,
        embedder: Arc<dyn Embedder>,
        corpus: Arc<ReferenceCorpus>,
        lexicon: SlangLexicon,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            classifier,
            embedder,
            corpus,
            lexicon,
            settings,
        }
    }

    pub fn corpus(&self) -> &ReferenceCorpus {
        &self.corpus
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Analyse one journal entry
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, PipelineError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("Rejecting empty entry");
            return Ok(AnalysisResult::empty_input());
        }

        let selected = select_clause(trimmed);
        let lowered = selected.to_lowercase();

        let sentiment_signal = self.classifier.classify_sentiment(&selected).await?;
        let emotion_signal = self.classifier.classify_emotion(&selected).await?;
        debug!(
            baseline_sentiment = %sentiment_signal.label,
            sentiment_score = sentiment_signal.score,
            emotion = %emotion_signal.label,
            emotion_score = emotion_signal.score,
            "Baseline classification"
        );

        let refined = self.refine_sentiment(&selected, &lowered).await?;

        let sentiment = match self.lexicon.override_for(&lowered) {
            Some(forced) => {
                debug!(refined = %refined, forced = %forced, "Lexicon override applied");
                forced
            }
            None => refined,
        };

        let emotion = emotion_signal.label;
        let stress = infer_stress(sentiment, &emotion);
        let energy = infer_energy(&emotion);

        Ok(AnalysisResult::Tags(MoodTags {
            sentiment,
            emotion,
            stress,
            energy,
        }))
    }

    /// Replace the binary baseline with positive / negative / neutral
    async fn refine_sentiment(&self, text: &str, lowered: &str) -> Result<Sentiment, PipelineError> {
        let embedding = self.embedder.embed(text).await?;
        let pos_sim = self.corpus.max_similarity(&embedding, Polarity::Positive)?;
        let neg_sim = self.corpus.max_similarity(&embedding, Polarity::Negative)?;
        let diff = (pos_sim - neg_sim).abs();

        let low_affect = self
            .settings
            .low_affect_markers
            .iter()
            .any(|m| lowered.contains(m.as_str()));

        debug!(pos_sim, neg_sim, diff, low_affect, "Semantic refinement");

        if diff < self.settings.neutral_threshold || low_affect {
            return Ok(Sentiment::Neutral);
        }
        Ok(if pos_sim > neg_sim {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_clause_takes_remainder_after_but() {
        assert_eq!(select_clause("I'm tired but I'm proud"), "i'm proud");
        assert_eq!(
            select_clause("Long day BUT it was worth it but I'm wiped"),
            "it was worth it but i'm wiped"
        );
    }

    #[test]
    fn test_select_clause_keeps_text_without_separator() {
        let selected = select_clause("Butterflies before the exam");
        assert!(matches!(selected, Cow::Borrowed(_)));
        assert_eq!(selected, "Butterflies before the exam");
    }

    #[test]
    fn test_select_clause_empty_remainder_keeps_text() {
        assert_eq!(select_clause("fine but   "), "fine but   ");
        assert_eq!(select_clause("fine but   ok"), "ok");
    }

    #[test]
    fn test_stress_table() {
        for emotion in ["fear", "sadness", "anger"] {
            assert_eq!(infer_stress(Sentiment::Positive, emotion), Level::High);
        }
        assert_eq!(infer_stress(Sentiment::Negative, "disgust"), Level::Medium);
        assert_eq!(infer_stress(Sentiment::Neutral, "neutral"), Level::Low);
        assert_eq!(infer_stress(Sentiment::Positive, "joy"), Level::Low);
    }

    #[test]
    fn test_energy_table() {
        assert_eq!(infer_energy("joy"), Level::High);
        assert_eq!(infer_energy("surprise"), Level::High);
        assert_eq!(infer_energy("fear"), Level::Low);
        assert_eq!(infer_energy("sadness"), Level::Low);
        assert_eq!(infer_energy("anger"), Level::Medium);
        assert_eq!(infer_energy("neutral"), Level::Medium);
    }

    #[test]
    fn test_settings_from_config_lowercases_markers() {
        let config = TaggingConfig {
            neutral_threshold: 0.1,
            low_affect_markers: vec!["MEH".to_string(), "".to_string()],
        };
        let settings = PipelineSettings::from(&config);
        assert_eq!(settings.low_affect_markers, vec!["meh".to_string()]);
        assert_eq!(settings.neutral_threshold, 0.1);
    }
}
