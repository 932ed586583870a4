//! Configuration loading and root folder resolution
//!
//! Bootstrap configuration lives in a single TOML file (`journal.toml`).
//! Every section is optional; missing values fall back to compiled defaults
//! and a missing file is not an error.
//!
//! # Settings Sources Priority
//!
//! 1. Command-line arguments (--root-folder, --port, --config)
//! 2. Environment variables (JOURNAL_ROOT_FOLDER, JOURNAL_API_TOKEN, ...)
//! 3. TOML configuration file
//! 4. Compiled defaults

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the root folder
pub const ROOT_FOLDER_ENV: &str = "JOURNAL_ROOT_FOLDER";

/// Environment variable naming the TOML config file
pub const CONFIG_PATH_ENV: &str = "JOURNAL_CONFIG";

/// Environment variable carrying the inference API token
pub const API_TOKEN_ENV: &str = "JOURNAL_API_TOKEN";

/// File name of the journal inside the root folder
pub const JOURNAL_FILE_NAME: &str = "journal_entries.json";

/// Default HTTP port for the journal service
pub const DEFAULT_PORT: u16 = 8000;

/// Largest accepted `timestamp.utc_offset_minutes` magnitude (under 24 hours)
pub const MAX_UTC_OFFSET_MINUTES: u32 = 23 * 60 + 59;

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Root folder holding the journal file and corpus data
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub corpus: CorpusConfig,

    #[serde(default)]
    pub tagging: TaggingConfig,

    #[serde(default)]
    pub lexicon: LexiconConfig,

    #[serde(default)]
    pub timestamp: TimestampConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Inference backend configuration (classification + embedding models)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of a Hugging Face-style inference endpoint
    #[serde(default = "default_backend_url")]
    pub base_url: String,

    /// Binary sentiment model (positive/negative)
    #[serde(default = "default_sentiment_model")]
    pub sentiment_model: String,

    /// Single-label emotion model
    #[serde(default = "default_emotion_model")]
    pub emotion_model: String,

    /// Sentence embedding model
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Bearer token for the inference endpoint
    #[serde(default)]
    pub api_token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            sentiment_model: default_sentiment_model(),
            emotion_model: default_emotion_model(),
            embedding_model: default_embedding_model(),
            api_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Reference corpus configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Maximum examples kept per polarity from each source
    #[serde(default = "default_sample_cap")]
    pub sample_cap: usize,

    /// Sources in priority order
    #[serde(default = "default_corpus_sources")]
    pub sources: Vec<CorpusSourceConfig>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            sample_cap: default_sample_cap(),
            sources: default_corpus_sources(),
        }
    }
}

/// One configured corpus source
///
/// Relative paths are resolved against the root folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CorpusSourceConfig {
    /// `sentence<TAB>label` lines, label `1` = positive
    LabelledFile {
        path: PathBuf,
        #[serde(default)]
        has_header: bool,
    },
    /// `text<TAB>labels[<TAB>id]` lines mapped to polarity via label sets;
    /// numeric labels index `label_names` (GoEmotions order when unset)
    EmotionTaggedFile {
        path: PathBuf,
        #[serde(default)]
        has_header: bool,
        #[serde(default)]
        positive_labels: Option<Vec<String>>,
        #[serde(default)]
        negative_labels: Option<Vec<String>>,
        #[serde(default)]
        label_names: Option<Vec<String>>,
    },
    /// Examples listed directly in the config file
    Inline {
        #[serde(default)]
        positive: Vec<String>,
        #[serde(default)]
        negative: Vec<String>,
    },
}

/// Tuning for the similarity-based neutrality detector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggingConfig {
    /// Similarity margin below which an entry is considered neutral
    #[serde(default = "default_neutral_threshold")]
    pub neutral_threshold: f32,

    /// Hedging words that force a neutral sentiment
    #[serde(default = "default_low_affect_markers")]
    pub low_affect_markers: Vec<String>,
}

impl Default for TaggingConfig {
    fn default() -> Self {
        Self {
            neutral_threshold: default_neutral_threshold(),
            low_affect_markers: default_low_affect_markers(),
        }
    }
}

/// Replacement slang lexicons (built-in lists are used when absent)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconConfig {
    #[serde(default)]
    pub positive: Option<Vec<String>>,
    #[serde(default)]
    pub negative: Option<Vec<String>>,
}

/// Zone used when stamping journal entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimestampConfig {
    /// Offset east of UTC in minutes (Pacific standard time is -480)
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,

    #[serde(default = "default_zone_label")]
    pub zone_label: String,
}

impl Default for TimestampConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: default_utc_offset_minutes(),
            zone_label: default_zone_label(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_backend_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_sentiment_model() -> String {
    "distilbert/distilbert-base-uncased-finetuned-sst-2-english".to_string()
}

fn default_emotion_model() -> String {
    "j-hartmann/emotion-english-distilroberta-base".to_string()
}

fn default_embedding_model() -> String {
    "sentence-transformers/all-MiniLM-L6-v2".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_sample_cap() -> usize {
    200
}

fn default_corpus_sources() -> Vec<CorpusSourceConfig> {
    vec![
        CorpusSourceConfig::LabelledFile {
            path: PathBuf::from("data/sst2_train.tsv"),
            has_header: true,
        },
        CorpusSourceConfig::EmotionTaggedFile {
            path: PathBuf::from("data/go_emotions_train.tsv"),
            has_header: false,
            positive_labels: None,
            negative_labels: None,
            label_names: None,
        },
        CorpusSourceConfig::LabelledFile {
            path: PathBuf::from("data/amazon_cells_labelled.txt"),
            has_header: false,
        },
        CorpusSourceConfig::LabelledFile {
            path: PathBuf::from("data/imdb_labelled.txt"),
            has_header: false,
        },
        CorpusSourceConfig::LabelledFile {
            path: PathBuf::from("data/yelp_labelled.txt"),
            has_header: false,
        },
    ]
}

fn default_neutral_threshold() -> f32 {
    0.04
}

fn default_low_affect_markers() -> Vec<String> {
    ["fine", "meh", "okay", "neutral", "alright"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_utc_offset_minutes() -> i32 {
    -8 * 60
}

fn default_zone_label() -> String {
    "PST".to_string()
}

impl TomlConfig {
    /// Apply environment overrides that sit above the TOML tier
    pub fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var(API_TOKEN_ENV) {
            if !token.trim().is_empty() {
                self.backend.api_token = Some(token);
            }
        }
    }

    /// Validate values that serde cannot check
    pub fn validate(&self) -> Result<()> {
        if self.corpus.sample_cap == 0 {
            return Err(Error::Config("corpus.sample_cap must be at least 1".to_string()));
        }
        if !self.tagging.neutral_threshold.is_finite() || self.tagging.neutral_threshold < 0.0 {
            return Err(Error::Config(format!(
                "tagging.neutral_threshold must be a non-negative number, got {}",
                self.tagging.neutral_threshold
            )));
        }
        if self.timestamp.utc_offset_minutes.unsigned_abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(Error::Config(format!(
                "timestamp.utc_offset_minutes must be within ±{}, got {}",
                MAX_UTC_OFFSET_MINUTES, self.timestamp.utc_offset_minutes
            )));
        }
        if self.backend.base_url.trim().is_empty() {
            return Err(Error::Config("backend.base_url must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Load TOML configuration with graceful degradation
///
/// A missing file yields defaults with a warning; a malformed file is an error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!(
            "Config file not found at {}, using built-in defaults",
            path.display()
        );
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read TOML failed: {}", e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;
    config.validate()?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Default config file location
///
/// `JOURNAL_CONFIG` wins; otherwise `<config dir>/mood-journal/journal.toml`.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .map(|d| d.join("mood-journal").join("journal.toml"))
        .unwrap_or_else(|| PathBuf::from("journal.toml"))
}

/// OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("mood-journal"))
        .unwrap_or_else(|| PathBuf::from("./journal_data"))
}

/// Root folder resolution: CLI → environment → TOML → compiled default
pub struct RootFolderResolver {
    module_name: String,
}

impl RootFolderResolver {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
        }
    }

    pub fn resolve(&self, cli_arg: Option<&Path>, toml: &TomlConfig) -> PathBuf {
        if let Some(path) = cli_arg {
            info!(module = %self.module_name, "Root folder from command line: {}", path.display());
            return path.to_path_buf();
        }

        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if !path.trim().is_empty() {
                info!(module = %self.module_name, "Root folder from {}: {}", ROOT_FOLDER_ENV, path);
                return PathBuf::from(path);
            }
        }

        if let Some(path) = &toml.root_folder {
            info!(module = %self.module_name, "Root folder from TOML config: {}", path.display());
            return path.clone();
        }

        let path = default_root_folder();
        info!(module = %self.module_name, "Root folder from compiled default: {}", path.display());
        path
    }
}

/// Creates the root folder and locates files inside it
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }

    /// Create the root folder if missing
    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_folder.exists() {
            std::fs::create_dir_all(&self.root_folder)?;
            info!("Created root folder: {}", self.root_folder.display());
        }
        Ok(())
    }

    /// Path of the JSON journal
    pub fn journal_path(&self) -> PathBuf {
        self.root_folder.join(JOURNAL_FILE_NAME)
    }

    /// Resolve a configured path (absolute paths are kept as-is)
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_folder.join(path)
        }
    }
}
