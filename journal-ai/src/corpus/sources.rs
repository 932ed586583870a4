//! Corpus sources
//!
//! # Formats
//! - **Labelled file:** `sentence<TAB>label`, label `1` = positive, anything
//!   else negative (Amazon/IMDB/Yelp sentiment-labelled sentences, SST-2 TSV)
//! - **Emotion-tagged file:** `text<TAB>labels[<TAB>extra...]` (GoEmotions
//!   `train.tsv` layout); labels are comma-separated names or numeric ids into
//!   the label-name table. A row counts as positive and/or negative depending
//!   on which label sets its emotions fall into
//! - **Inline:** example lists written directly in the config file
//!
//! Labelled lines are split on the last tab, emotion-tagged lines on the first
//! two fields. Malformed lines are skipped.

use crate::types::{CorpusSource, LabelledExample, Polarity, SourceError};
use journal_common::config::{CorpusSourceConfig, RootFolderInitializer};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// GoEmotions label names, indexed by numeric label id
pub const GO_EMOTIONS_LABELS: &[&str] = &[
    "admiration",
    "amusement",
    "anger",
    "annoyance",
    "approval",
    "caring",
    "confusion",
    "curiosity",
    "desire",
    "disappointment",
    "disapproval",
    "disgust",
    "embarrassment",
    "excitement",
    "fear",
    "gratitude",
    "grief",
    "joy",
    "love",
    "nervousness",
    "optimism",
    "pride",
    "realization",
    "relief",
    "remorse",
    "sadness",
    "surprise",
    "neutral",
];

/// Emotions treated as positive evidence in emotion-tagged sources
pub const DEFAULT_POSITIVE_EMOTIONS: &[&str] = &["admiration", "amusement", "joy"];

/// Emotions treated as negative evidence in emotion-tagged sources
pub const DEFAULT_NEGATIVE_EMOTIONS: &[&str] = &[
    "anger",
    "annoyance",
    "disappointment",
    "disgust",
    "fear",
    "sadness",
];

async fn read_source_file(path: &Path) -> Result<String, SourceError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(SourceError::Unavailable(
            format!("Missing corpus file: {}", path.display()),
        )),
        Err(e) => Err(e.into()),
    }
}

fn warn_if_empty(path: &Path, examples: &[LabelledExample]) {
    if examples.is_empty() {
        warn!(
            path = %path.display(),
            "Corpus file contains no usable examples; check its column layout and labels"
        );
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn data_lines(content: &str, has_header: bool) -> impl Iterator<Item = &str> {
    content
        .lines()
        .skip(usize::from(has_header))
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// `sentence<TAB>label` file
pub struct LabelledFileSource {
    path: PathBuf,
    has_header: bool,
}

impl LabelledFileSource {
    pub fn new(path: impl Into<PathBuf>, has_header: bool) -> Self {
        Self {
            path: path.into(),
            has_header,
        }
    }

    fn parse(&self, content: &str) -> Vec<LabelledExample> {
        data_lines(content, self.has_header)
            .filter_map(|line| line.rsplit_once('\t'))
            .map(|(sentence, label)| {
                let polarity = if label.trim() == "1" {
                    Polarity::Positive
                } else {
                    Polarity::Negative
                };
                LabelledExample::new(sentence.trim(), polarity)
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl CorpusSource for LabelledFileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Vec<LabelledExample>, SourceError> {
        let content = read_source_file(&self.path).await?;
        let examples = self.parse(&content);
        warn_if_empty(&self.path, &examples);
        debug!(path = %self.path.display(), examples = examples.len(), "Parsed labelled file");
        Ok(examples)
    }
}

/// `text<TAB>labels[<TAB>comment_id]` file
pub struct EmotionTaggedFileSource {
    path: PathBuf,
    has_header: bool,
    positive_labels: HashSet<String>,
    negative_labels: HashSet<String>,
    label_names: Vec<String>,
}

impl EmotionTaggedFileSource {
    pub fn new(path: impl Into<PathBuf>, has_header: bool) -> Self {
        Self::with_labels(
            path,
            has_header,
            to_strings(DEFAULT_POSITIVE_EMOTIONS),
            to_strings(DEFAULT_NEGATIVE_EMOTIONS),
        )
    }

    pub fn with_labels(
        path: impl Into<PathBuf>,
        has_header: bool,
        positive_labels: Vec<String>,
        negative_labels: Vec<String>,
    ) -> Self {
        let normalize = |labels: Vec<String>| -> HashSet<String> {
            labels.into_iter().map(|l| l.trim().to_lowercase()).collect()
        };
        Self {
            path: path.into(),
            has_header,
            positive_labels: normalize(positive_labels),
            negative_labels: normalize(negative_labels),
            label_names: to_strings(GO_EMOTIONS_LABELS),
        }
    }

    /// Replace the id → name table used for numeric labels
    pub fn with_label_names(mut self, label_names: Vec<String>) -> Self {
        self.label_names = label_names
            .into_iter()
            .map(|l| l.trim().to_lowercase())
            .collect();
        self
    }

    /// Emotion name for one label token (numeric id or name)
    fn emotion_name(&self, token: &str) -> Option<String> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        match token.parse::<usize>() {
            Ok(id) => self.label_names.get(id).cloned(),
            Err(_) => Some(token.to_lowercase()),
        }
    }

    fn parse(&self, content: &str) -> Vec<LabelledExample> {
        let mut examples = Vec::new();
        for line in data_lines(content, self.has_header) {
            let mut fields = line.split('\t');
            let (Some(text), Some(labels)) = (fields.next(), fields.next()) else {
                continue;
            };
            let emotions: Vec<String> = labels
                .split(',')
                .filter_map(|token| self.emotion_name(token))
                .collect();

            // A row may contribute to both polarities
            if emotions.iter().any(|e| self.positive_labels.contains(e)) {
                examples.push(LabelledExample::new(text.trim(), Polarity::Positive));
            }
            if emotions.iter().any(|e| self.negative_labels.contains(e)) {
                examples.push(LabelledExample::new(text.trim(), Polarity::Negative));
            }
        }
        examples
    }
}

#[async_trait::async_trait]
impl CorpusSource for EmotionTaggedFileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Vec<LabelledExample>, SourceError> {
        let content = read_source_file(&self.path).await?;
        let examples = self.parse(&content);
        warn_if_empty(&self.path, &examples);
        debug!(path = %self.path.display(), examples = examples.len(), "Parsed emotion-tagged file");
        Ok(examples)
    }
}

/// Examples supplied in memory
pub struct InlineSource {
    name: String,
    positive: Vec<String>,
    negative: Vec<String>,
}

impl InlineSource {
    pub fn new(name: impl Into<String>, positive: Vec<String>, negative: Vec<String>) -> Self {
        Self {
            name: name.into(),
            positive,
            negative,
        }
    }
}

#[async_trait::async_trait]
impl CorpusSource for InlineSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn load(&self) -> Result<Vec<LabelledExample>, SourceError> {
        let positive = self
            .positive
            .iter()
            .map(|t| LabelledExample::new(t.as_str(), Polarity::Positive));
        let negative = self
            .negative
            .iter()
            .map(|t| LabelledExample::new(t.as_str(), Polarity::Negative));
        Ok(positive.chain(negative).collect())
    }
}

/// Instantiate configured sources, resolving relative paths against the root folder
pub fn build_sources(
    configs: &[CorpusSourceConfig],
    root: &RootFolderInitializer,
) -> Vec<Box<dyn CorpusSource>> {
    configs
        .iter()
        .enumerate()
        .map(|(index, config)| -> Box<dyn CorpusSource> {
            match config {
                CorpusSourceConfig::LabelledFile { path, has_header } => Box::new(
                    LabelledFileSource::new(root.resolve_path(path), *has_header),
                ),
                CorpusSourceConfig::EmotionTaggedFile {
                    path,
                    has_header,
                    positive_labels,
                    negative_labels,
                    label_names,
                } => {
                    let source = EmotionTaggedFileSource::with_labels(
                        root.resolve_path(path),
                        *has_header,
                        positive_labels
                            .clone()
                            .unwrap_or_else(|| to_strings(DEFAULT_POSITIVE_EMOTIONS)),
                        negative_labels
                            .clone()
                            .unwrap_or_else(|| to_strings(DEFAULT_NEGATIVE_EMOTIONS)),
                    );
                    Box::new(match label_names {
                        Some(names) => source.with_label_names(names.clone()),
                        None => source,
                    })
                }
                CorpusSourceConfig::Inline { positive, negative } => Box::new(InlineSource::new(
                    format!("inline[{}]", index),
                    positive.clone(),
                    negative.clone(),
                )),
            }
        })
        .collect()
}
