//! Startup wiring shared by the server and the CLI
//!
//! 1. Load TOML config (CLI path → `JOURNAL_CONFIG` → default location)
//! 2. Resolve and create the root folder
//! 3. Construct model adapters
//! 4. Load corpus sources and embed the reference corpus
//! 5. Assemble the `MoodTagger` and `AppState`

use crate::adapters::{HfClassificationAdapter, HfEmbeddingClient};
use crate::corpus::{build_sources, ReferenceCorpus};
use crate::lexicon::SlangLexicon;
use crate::pipeline::{MoodTagger, PipelineSettings};
use crate::types::{ClassificationAdapter, Embedder};
use crate::AppState;
use anyhow::{Context, Result};
use journal_common::config::{
    default_config_path, load_toml_config, RootFolderInitializer, RootFolderResolver, TomlConfig,
};
use journal_common::journal::JournalStore;
use journal_common::time::JournalClock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Resolved configuration plus the initialized root folder
pub struct Startup {
    pub config_path: PathBuf,
    pub config: TomlConfig,
    pub root: RootFolderInitializer,
}

impl Startup {
    /// Load configuration and prepare the root folder
    pub fn load(config_path: Option<&Path>, root_folder: Option<&Path>) -> Result<Self> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(default_config_path);
        let mut config = load_toml_config(&config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?;
        config.apply_env_overrides();

        let root = RootFolderInitializer::new(
            RootFolderResolver::new("journal-ai").resolve(root_folder, &config),
        );
        root.ensure_directory_exists()
            .context("Failed to initialize root folder")?;

        Ok(Self {
            config_path,
            config,
            root,
        })
    }

    pub fn journal(&self) -> JournalStore {
        JournalStore::new(self.root.journal_path())
    }

    pub fn clock(&self) -> Result<JournalClock> {
        Ok(JournalClock::new(&self.config.timestamp)?)
    }

    /// Build the tagger against the configured inference backend
    pub async fn tagger(&self) -> Result<MoodTagger> {
        let classifier: Arc<dyn ClassificationAdapter> = Arc::new(
            HfClassificationAdapter::new(&self.config.backend)
                .context("Failed to create classification adapter")?,
        );
        let embedder: Arc<dyn Embedder> = Arc::new(
            HfEmbeddingClient::new(&self.config.backend)
                .context("Failed to create embedding adapter")?,
        );
        build_tagger(&self.config, &self.root, classifier, embedder).await
    }

    /// Full server state
    pub async fn app_state(&self) -> Result<AppState> {
        let tagger = self.tagger().await?;
        Ok(AppState::new(
            Arc::new(tagger),
            Arc::new(self.journal()),
            self.clock()?,
        ))
    }
}

/// Build the reference corpus and tagger from explicit adapters
pub async fn build_tagger(
    config: &TomlConfig,
    root: &RootFolderInitializer,
    classifier: Arc<dyn ClassificationAdapter>,
    embedder: Arc<dyn Embedder>,
) -> Result<MoodTagger> {
    let sources = build_sources(&config.corpus.sources, root);
    info!(
        sources = sources.len(),
        sample_cap = config.corpus.sample_cap,
        "Building reference corpus"
    );

    let corpus = ReferenceCorpus::build(&sources, config.corpus.sample_cap, embedder.as_ref())
        .await
        .context("Failed to build reference corpus")?;

    Ok(MoodTagger::new(
        classifier,
        embedder,
        Arc::new(corpus),
        SlangLexicon::from_config(&config.lexicon),
        PipelineSettings::from(&config.tagging),
    ))
}
