//! Append-only journal persisted as a JSON array
//!
//! The file is a pretty-printed array of `{timestamp, text, tags}` records,
//! oldest first. Writes go to a uniquely named temp file which is then renamed
//! over the journal, so a crash mid-write never leaves a truncated journal
//! behind.
//!
//! Appends hold `<journal>.lock`, created exclusively, for the whole
//! read-modify-write. The server and the CLI can therefore write the same
//! journal at once without losing entries. A lock file older than
//! `STALE_LOCK_AGE` is treated as left behind by a crashed writer and removed.

use crate::models::MoodTags;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Number of entries returned by `last` when the caller has no preference
pub const DEFAULT_RECENT_COUNT: usize = 3;

/// How long `append` waits for another writer's lock by default
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(10);

/// Lock files older than this are reclaimed
pub const STALE_LOCK_AGE: Duration = Duration::from_secs(60);

const LOCK_RETRY_INTERVAL: Duration = Duration::from_millis(20);

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// One saved journal entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Human-readable wall-clock timestamp
    pub timestamp: String,
    /// Entry text as submitted
    pub text: String,
    pub tags: MoodTags,
}

/// JSON-file journal store
///
/// Appends are serialized in-process by a mutex and across processes by the
/// lock file. Reads take no lock; they always see a complete file.
pub struct JournalStore {
    path: PathBuf,
    write_lock: Mutex<()>,
    lock_timeout: Duration,
}

impl JournalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }

    /// Override how long `append` waits for the lock file
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries, oldest first (empty if the journal does not exist yet)
    pub async fn all(&self) -> Result<Vec<JournalEntry>> {
        load_entries(&self.path).await
    }

    /// The most recent `n` entries, oldest first
    pub async fn last(&self, n: usize) -> Result<Vec<JournalEntry>> {
        let mut entries = load_entries(&self.path).await?;
        let skip = entries.len().saturating_sub(n);
        Ok(entries.split_off(skip))
    }

    /// Append one entry to the end of the journal
    pub async fn append(&self, entry: JournalEntry) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        ensure_parent_dir(&self.path).await?;
        let _file_lock = JournalLock::acquire(&self.path, self.lock_timeout).await?;

        let mut entries = load_entries(&self.path).await?;
        entries.push(entry);
        save_entries(&self.path, &entries).await?;

        debug!(
            path = %self.path.display(),
            count = entries.len(),
            "Journal entry appended"
        );
        Ok(())
    }
}

async fn load_entries(path: &Path) -> Result<Vec<JournalEntry>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            if bytes.iter().all(|b| b.is_ascii_whitespace()) {
                return Ok(Vec::new());
            }
            Ok(serde_json::from_slice(&bytes)?)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

/// `path` with `suffix` appended to its file name
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

async fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

async fn save_entries(path: &Path, entries: &[JournalEntry]) -> Result<()> {
    let json = serde_json::to_vec_pretty(entries)?;
    let temp_path = sibling_path(
        path,
        &format!(
            ".{}.{}.tmp",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ),
    );

    if let Err(e) = tokio::fs::write(&temp_path, json).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e.into());
    }
    tokio::fs::rename(&temp_path, path).await?;
    Ok(())
}

/// Exclusive write lock on a journal, released on drop
struct JournalLock {
    path: PathBuf,
}

impl JournalLock {
    async fn acquire(journal: &Path, timeout: Duration) -> Result<Self> {
        let path = sibling_path(journal, ".lock");
        let started = Instant::now();

        loop {
            let created = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await;

            match created {
                Ok(_) => return Ok(Self { path }),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    if lock_is_stale(&path).await {
                        warn!(path = %path.display(), "Removing stale journal lock");
                        match tokio::fs::remove_file(&path).await {
                            Ok(()) => continue,
                            Err(e) if e.kind() == ErrorKind::NotFound => continue,
                            Err(e) => return Err(e.into()),
                        }
                    }
                    if started.elapsed() >= timeout {
                        return Err(Error::Io(std::io::Error::new(
                            ErrorKind::TimedOut,
                            format!("journal is locked by another writer: {}", path.display()),
                        )));
                    }
                    tokio::time::sleep(LOCK_RETRY_INTERVAL).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl Drop for JournalLock {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "Failed to release journal lock");
        }
    }
}

async fn lock_is_stale(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .and_then(|m| m.modified())
        .ok()
        .and_then(|modified| modified.elapsed().ok())
        .map_or(false, |age| age > STALE_LOCK_AGE)
}
