//! Reference corpus of positive/negative exemplars
//!
//! Built exactly once at startup, then shared read-only (`Arc<ReferenceCorpus>`)
//! by every pipeline invocation. No locking is needed because nothing mutates
//! it after construction.
//!
//! # Construction
//! 1. Load each source in priority order
//! 2. Keep at most `sample_cap` examples per polarity from each source
//! 3. Concatenate, then embed every exemplar once
//!
//! Unavailable sources are skipped with a warning. Only an embedding failure
//! aborts construction.

pub mod sources;

pub use sources::{build_sources, EmotionTaggedFileSource, InlineSource, LabelledFileSource};

use crate::types::{AdapterError, CorpusSource, Embedder, Polarity};
use thiserror::Error;
use tracing::{info, warn};

/// Reference corpus error
#[derive(Debug, Error)]
pub enum CorpusError {
    /// No exemplars of the requested polarity were loaded
    #[error("Reference corpus has no {0} exemplars; configure at least one corpus source")]
    EmptyPolarity(Polarity),

    /// Embedding the exemplars failed
    #[error("Failed to embed reference corpus: {0}")]
    Embedding(#[from] AdapterError),

    /// Texts and embeddings are not parallel
    #[error("Corpus has {texts} {polarity} texts but {embeddings} embeddings")]
    LengthMismatch {
        polarity: Polarity,
        texts: usize,
        embeddings: usize,
    },
}

/// Immutable exemplar texts and their embeddings
#[derive(Debug, Clone, Default)]
pub struct ReferenceCorpus {
    positive_texts: Vec<String>,
    negative_texts: Vec<String>,
    positive_embeddings: Vec<Vec<f32>>,
    negative_embeddings: Vec<Vec<f32>>,
}

/// Compute cosine similarity between two vectors
///
/// Mismatched or zero-length vectors score 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

impl ReferenceCorpus {
    /// Assemble a corpus from precomputed parts, checking the parallel-list invariant
    pub fn from_parts(
        positive_texts: Vec<String>,
        positive_embeddings: Vec<Vec<f32>>,
        negative_texts: Vec<String>,
        negative_embeddings: Vec<Vec<f32>>,
    ) -> Result<Self, CorpusError> {
        if positive_texts.len() != positive_embeddings.len() {
            return Err(CorpusError::LengthMismatch {
                polarity: Polarity::Positive,
                texts: positive_texts.len(),
                embeddings: positive_embeddings.len(),
            });
        }
        if negative_texts.len() != negative_embeddings.len() {
            return Err(CorpusError::LengthMismatch {
                polarity: Polarity::Negative,
                texts: negative_texts.len(),
                embeddings: negative_embeddings.len(),
            });
        }

        Ok(Self {
            positive_texts,
            negative_texts,
            positive_embeddings,
            negative_embeddings,
        })
    }

    /// Load, cap, and embed all configured sources
    pub async fn build(
        sources: &[Box<dyn CorpusSource>],
        sample_cap: usize,
        embedder: &dyn Embedder,
    ) -> Result<Self, CorpusError> {
        let mut positive_texts = Vec::new();
        let mut negative_texts = Vec::new();

        for source in sources {
            let examples = match source.load().await {
                Ok(examples) => examples,
                Err(e) => {
                    warn!(source = %source.name(), error = %e, "Corpus source unavailable, skipping");
                    continue;
                }
            };

            let mut kept_positive = 0usize;
            let mut kept_negative = 0usize;
            for example in examples {
                match example.polarity {
                    Polarity::Positive if kept_positive < sample_cap => {
                        positive_texts.push(example.text);
                        kept_positive += 1;
                    }
                    Polarity::Negative if kept_negative < sample_cap => {
                        negative_texts.push(example.text);
                        kept_negative += 1;
                    }
                    _ => {}
                }
            }

            info!(
                source = %source.name(),
                positive = kept_positive,
                negative = kept_negative,
                "Corpus source loaded"
            );
        }

        if positive_texts.is_empty() || negative_texts.is_empty() {
            warn!(
                positive = positive_texts.len(),
                negative = negative_texts.len(),
                "Reference corpus is missing a polarity; analysis will fail until sources are configured"
            );
        }

        let positive_embeddings = embedder.embed_batch(&positive_texts).await?;
        let negative_embeddings = embedder.embed_batch(&negative_texts).await?;

        let corpus = Self::from_parts(
            positive_texts,
            positive_embeddings,
            negative_texts,
            negative_embeddings,
        )?;

        info!(
            positive = corpus.len(Polarity::Positive),
            negative = corpus.len(Polarity::Negative),
            "Reference corpus ready"
        );
        Ok(corpus)
    }

    /// Number of exemplars of a polarity
    pub fn len(&self, polarity: Polarity) -> usize {
        match polarity {
            Polarity::Positive => self.positive_texts.len(),
            Polarity::Negative => self.negative_texts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positive_texts.is_empty() && self.negative_texts.is_empty()
    }

    /// Exemplar texts of a polarity, in corpus order
    pub fn texts(&self, polarity: Polarity) -> &[String] {
        match polarity {
            Polarity::Positive => &self.positive_texts,
            Polarity::Negative => &self.negative_texts,
        }
    }

    fn embeddings(&self, polarity: Polarity) -> &[Vec<f32>] {
        match polarity {
            Polarity::Positive => &self.positive_embeddings,
            Polarity::Negative => &self.negative_embeddings,
        }
    }

    /// Highest cosine similarity between `query` and any exemplar of `polarity`
    ///
    /// Linear in corpus size. Fails fast if the polarity has no exemplars.
    pub fn max_similarity(&self, query: &[f32], polarity: Polarity) -> Result<f32, CorpusError> {
        let embeddings = self.embeddings(polarity);
        if embeddings.is_empty() {
            return Err(CorpusError::EmptyPolarity(polarity));
        }

        Ok(embeddings
            .iter()
            .map(|e| cosine_similarity(query, e))
            .fold(f32::NEG_INFINITY, f32::max))
    }
}
