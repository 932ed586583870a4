//! Mood tagging pipeline behaviour with fake adapters

mod helpers;

use helpers::{
    axis_corpus, tagger, tagger_with, tagger_with_embedder, FakeClassifier, FixedEmbedder,
    KeywordEmbedder, UnavailableClassifier,
};
use journal_ai::bootstrap::build_tagger;
use journal_ai::corpus::{CorpusError, ReferenceCorpus};
use journal_ai::types::{AnalysisResult, Level, MoodTags, Polarity, RejectReason, Sentiment};
use journal_ai::{PipelineError, PipelineSettings};
use journal_common::config::{CorpusSourceConfig, RootFolderInitializer, TomlConfig};
use std::sync::Arc;
use tempfile::TempDir;

async fn tags_for(emotion: &str, text: &str) -> MoodTags {
    tagger(emotion)
        .analyze(text)
        .await
        .unwrap()
        .into_tags()
        .expect("expected tags")
}

#[tokio::test]
async fn test_empty_input_is_rejected_without_calling_adapters() {
    let classifier = Arc::new(FakeClassifier::new("joy"));
    let tagger = tagger_with(classifier.clone(), axis_corpus());

    for text in ["", "   ", "\n\t"] {
        let result = tagger.analyze(text).await.unwrap();
        assert_eq!(result.reject_reason(), Some(RejectReason::EmptyInput));
    }
    assert!(classifier.seen().is_empty());
}

#[tokio::test]
async fn test_clause_after_but_is_what_gets_analysed() {
    let classifier = Arc::new(FakeClassifier::new("joy"));
    let tagger = tagger_with(classifier.clone(), axis_corpus());

    let tags = tagger
        .analyze("I'm tired but I'm proud")
        .await
        .unwrap()
        .into_tags()
        .unwrap();

    assert_eq!(classifier.seen(), vec!["i'm proud", "i'm proud"]);
    assert_eq!(tags.sentiment, Sentiment::Positive);
    assert_eq!(tags.emotion, "joy");
    assert_eq!(tags.stress, Level::Low);
    assert_eq!(tags.energy, Level::High);
}

#[tokio::test]
async fn test_clause_selection_equivalence() {
    let with_clause = tags_for("surprise", "I was sad but Great News came").await;
    let remainder_only = tags_for("surprise", "great news came").await;
    assert_eq!(with_clause, remainder_only);
}

#[tokio::test]
async fn test_baseline_label_is_discarded() {
    // The fake classifier always answers "negative"
    let tags = tags_for("joy", "So happy with how the day went").await;
    assert_eq!(tags.sentiment, Sentiment::Positive);
}

#[tokio::test]
async fn test_low_affect_marker_forces_neutral() {
    let tags = tags_for("neutral", "Today was fine. Nothing big happened.").await;
    assert_eq!(tags.sentiment, Sentiment::Neutral);
    assert_eq!(tags.stress, Level::Low);
    assert_eq!(tags.energy, Level::Medium);

    // Even with a clear similarity margin
    let tags = tags_for("joy", "Had a great lunch, feeling fine").await;
    assert_eq!(tags.sentiment, Sentiment::Neutral);
}

#[tokio::test]
async fn test_small_margin_is_neutral() {
    let tags = tags_for("neutral", "Went for a walk along the river").await;
    assert_eq!(tags.sentiment, Sentiment::Neutral);
}

/// Sentiment for a plain entry whose embedding is fixed to `vector`
async fn sentiment_at(vector: [f32; 2], settings: PipelineSettings) -> Sentiment {
    let tagger = tagger_with_embedder(Arc::new(FixedEmbedder(vector.to_vec())), settings);
    tagger
        .analyze("Went for a walk along the river")
        .await
        .unwrap()
        .into_tags()
        .unwrap()
        .sentiment
}

#[tokio::test]
async fn test_default_threshold_is_four_hundredths() {
    assert_eq!(PipelineSettings::default().neutral_threshold, 0.04);

    // margin ≈ 0.030
    assert_eq!(
        sentiment_at([0.72, 0.69], PipelineSettings::default()).await,
        Sentiment::Neutral
    );
    // margin ≈ 0.050
    assert_eq!(
        sentiment_at([0.73, 0.68], PipelineSettings::default()).await,
        Sentiment::Positive
    );
    assert_eq!(
        sentiment_at([0.68, 0.73], PipelineSettings::default()).await,
        Sentiment::Negative
    );
}

#[tokio::test]
async fn test_configured_threshold_is_honoured() {
    let wide = PipelineSettings {
        neutral_threshold: 0.5,
        ..PipelineSettings::default()
    };
    // margin = 0.2
    assert_eq!(sentiment_at([0.8, 0.6], wide).await, Sentiment::Neutral);
    assert_eq!(
        sentiment_at([0.8, 0.6], PipelineSettings::default()).await,
        Sentiment::Positive
    );
}

#[tokio::test]
async fn test_margin_equal_to_threshold_is_not_neutral() {
    let settings = PipelineSettings {
        neutral_threshold: 1.0,
        ..PipelineSettings::default()
    };
    // margin = 1.0 exactly
    assert_eq!(sentiment_at([1.0, 0.0], settings).await, Sentiment::Positive);
}

#[tokio::test]
async fn test_negative_similarity_wins() {
    let tags = tags_for("sadness", "I feel awful about it").await;
    assert_eq!(tags.sentiment, Sentiment::Negative);
    assert_eq!(tags.stress, Level::High);
    assert_eq!(tags.energy, Level::Low);
}

#[tokio::test]
async fn test_positive_slang_overrides_refinement() {
    assert_eq!(
        tags_for("joy", "I'm killing it today").await.sentiment,
        Sentiment::Positive
    );
    // Equal keyword weight leaves refinement neutral; the lexicon decides
    assert_eq!(
        tags_for("neutral", "so tired, still killing it").await.sentiment,
        Sentiment::Positive
    );
}

#[tokio::test]
async fn test_negative_slang_overrides_refinement() {
    let tags = tags_for("disgust", "bro I'm DONE with today").await;
    assert_eq!(tags.sentiment, Sentiment::Negative);
    assert_eq!(tags.stress, Level::Medium);

    let tags = tags_for("neutral", "great weather, but today was an L").await;
    assert_eq!(tags.sentiment, Sentiment::Negative);
}

#[tokio::test]
async fn test_positive_slang_wins_over_negative_slang() {
    let tags = tags_for("neutral", "feeling good and burnt out").await;
    assert_eq!(tags.sentiment, Sentiment::Positive);
}

#[tokio::test]
async fn test_fear_means_high_stress_low_energy() {
    let tags = tags_for("fear", "I'm scared about the exam tomorrow").await;
    assert_eq!(tags.emotion, "fear");
    assert_eq!(tags.stress, Level::High);
    assert_eq!(tags.energy, Level::Low);
}

#[tokio::test]
async fn test_analysis_is_idempotent() {
    let tagger = tagger("anger");
    let first = tagger.analyze("I hate waiting in line").await.unwrap();
    let second = tagger.analyze("I hate waiting in line").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_adapter_failure_propagates() {
    let tagger = tagger_with(Arc::new(UnavailableClassifier), axis_corpus());
    let result = tagger.analyze("anything at all").await;
    assert!(matches!(result, Err(PipelineError::Adapter(_))));
}

#[tokio::test]
async fn test_empty_corpus_polarity_fails() {
    let tagger = tagger_with(
        Arc::new(FakeClassifier::new("joy")),
        ReferenceCorpus::default(),
    );
    let result = tagger.analyze("what a great day").await;
    assert!(matches!(
        result,
        Err(PipelineError::Corpus(CorpusError::EmptyPolarity(Polarity::Positive)))
    ));
}

#[tokio::test]
async fn test_build_tagger_from_config_sources() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("reviews.txt"),
        "Love this place.\t1\nAwful service.\t0\nGreat food.\t1\n",
    )
    .unwrap();

    let mut config = TomlConfig::default();
    config.corpus.sample_cap = 1;
    config.corpus.sources = vec![
        CorpusSourceConfig::LabelledFile {
            path: "reviews.txt".into(),
            has_header: false,
        },
        CorpusSourceConfig::LabelledFile {
            path: "missing.txt".into(),
            has_header: false,
        },
        CorpusSourceConfig::Inline {
            positive: vec![],
            negative: vec!["so sad".to_string()],
        },
    ];
    let root = RootFolderInitializer::new(dir.path().to_path_buf());

    let tagger = build_tagger(
        &config,
        &root,
        Arc::new(FakeClassifier::new("joy")),
        Arc::new(KeywordEmbedder),
    )
    .await
    .unwrap();

    let corpus = tagger.corpus();
    assert_eq!(corpus.texts(Polarity::Positive), &["Love this place."]);
    assert_eq!(corpus.texts(Polarity::Negative), &["Awful service.", "so sad"]);

    let result = tagger.analyze("a great, happy day").await.unwrap();
    assert!(matches!(
        result,
        AnalysisResult::Tags(MoodTags {
            sentiment: Sentiment::Positive,
            ..
        })
    ));
}
