//! Test doubles for the adapter traits
//!
//! The fake embedder maps text onto a 2-D plane by keyword so similarity
//! margins are predictable: "positive" words point along x, "negative" words
//! along y, anything else along the diagonal (zero margin).

#![allow(dead_code)]

use journal_ai::corpus::ReferenceCorpus;
use journal_ai::lexicon::SlangLexicon;
use journal_ai::types::{AdapterError, ClassificationAdapter, ClassifierSignal, Embedder};
use journal_ai::{MoodTagger, PipelineSettings};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub const POSITIVE_WORDS: &[&str] = &["proud", "great", "happy", "love", "killing"];
pub const NEGATIVE_WORDS: &[&str] = &["awful", "sad", "hate", "done", "tired", "scared"];

/// Classifier returning a fixed emotion and recording every input
pub struct FakeClassifier {
    emotion: String,
    seen: Mutex<Vec<String>>,
}

impl FakeClassifier {
    pub fn new(emotion: &str) -> Self {
        Self {
            emotion: emotion.to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Texts passed to either classifier, in call order
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ClassificationAdapter for FakeClassifier {
    async fn classify_sentiment(&self, text: &str) -> Result<ClassifierSignal, AdapterError> {
        self.seen.lock().unwrap().push(text.to_string());
        // Always "negative" so tests show the baseline label is discarded
        Ok(ClassifierSignal::new("NEGATIVE", 0.99))
    }

    async fn classify_emotion(&self, text: &str) -> Result<ClassifierSignal, AdapterError> {
        self.seen.lock().unwrap().push(text.to_string());
        Ok(ClassifierSignal::new(&self.emotion, 0.9))
    }
}

/// Classifier whose backend is down
pub struct UnavailableClassifier;

#[async_trait::async_trait]
impl ClassificationAdapter for UnavailableClassifier {
    async fn classify_sentiment(&self, _text: &str) -> Result<ClassifierSignal, AdapterError> {
        Err(AdapterError::Api {
            status: 503,
            body: "model is loading".to_string(),
        })
    }

    async fn classify_emotion(&self, _text: &str) -> Result<ClassifierSignal, AdapterError> {
        Err(AdapterError::Network("connection refused".to_string()))
    }
}

/// Classifier that fails its first call, then behaves like `FakeClassifier`
pub struct FlakyClassifier {
    failed_once: AtomicBool,
    inner: FakeClassifier,
}

impl FlakyClassifier {
    pub fn new(emotion: &str) -> Self {
        Self {
            failed_once: AtomicBool::new(false),
            inner: FakeClassifier::new(emotion),
        }
    }
}

#[async_trait::async_trait]
impl ClassificationAdapter for FlakyClassifier {
    async fn classify_sentiment(&self, text: &str) -> Result<ClassifierSignal, AdapterError> {
        if !self.failed_once.swap(true, Ordering::SeqCst) {
            return Err(AdapterError::Api {
                status: 503,
                body: "model is loading".to_string(),
            });
        }
        self.inner.classify_sentiment(text).await
    }

    async fn classify_emotion(&self, text: &str) -> Result<ClassifierSignal, AdapterError> {
        self.inner.classify_emotion(text).await
    }
}

/// Embedder returning the same vector for every text
pub struct FixedEmbedder(pub Vec<f32>);

#[async_trait::async_trait]
impl Embedder for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, AdapterError> {
        Ok(self.0.clone())
    }
}

/// Keyword embedder described in the module docs
pub struct KeywordEmbedder;

#[async_trait::async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AdapterError> {
        let lowered = text.to_lowercase();
        let pos = POSITIVE_WORDS.iter().filter(|w| lowered.contains(**w)).count() as f32;
        let neg = NEGATIVE_WORDS.iter().filter(|w| lowered.contains(**w)).count() as f32;
        let v = if pos == 0.0 && neg == 0.0 {
            vec![1.0, 1.0]
        } else {
            vec![pos, neg]
        };
        Ok(journal_ai::adapters::l2_normalize(v))
    }
}

/// One exemplar per polarity, on the axes
pub fn axis_corpus() -> ReferenceCorpus {
    ReferenceCorpus::from_parts(
        vec!["what a great day".to_string()],
        vec![vec![1.0, 0.0]],
        vec!["what an awful day".to_string()],
        vec![vec![0.0, 1.0]],
    )
    .unwrap()
}

pub fn tagger_with(
    classifier: Arc<dyn ClassificationAdapter>,
    corpus: ReferenceCorpus,
) -> MoodTagger {
    MoodTagger::new(
        classifier,
        Arc::new(KeywordEmbedder),
        Arc::new(corpus),
        SlangLexicon::builtin(),
        PipelineSettings::default(),
    )
}

/// Tagger over `axis_corpus` with an explicit embedder and settings
pub fn tagger_with_embedder(embedder: Arc<dyn Embedder>, settings: PipelineSettings) -> MoodTagger {
    MoodTagger::new(
        Arc::new(FakeClassifier::new("neutral")),
        embedder,
        Arc::new(axis_corpus()),
        SlangLexicon::builtin(),
        settings,
    )
}

pub fn tagger(emotion: &str) -> MoodTagger {
    tagger_with(Arc::new(FakeClassifier::new(emotion)), axis_corpus())
}
