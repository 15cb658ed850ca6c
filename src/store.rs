use std::fmt;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::best_effort::{self, SideEffect};
use crate::models::UserEntry;

const SNAPSHOT_LABEL: &str = "Submission snapshot write";

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Json(err)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "File error: {}", e),
            StoreError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

/// Append-only log of accepted submissions, mirrored to a JSON snapshot file.
///
/// Appends and snapshot writes happen under one lock, so concurrent requests
/// never interleave their writes.
pub struct SubmissionStore {
    entries: Mutex<Vec<UserEntry>>,
    path: Option<PathBuf>,
}

impl SubmissionStore {
    /// A store with no snapshot file.
    pub fn in_memory() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            path: None,
        }
    }

    /// A store mirrored to `path`, starting from the snapshot already there.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = if path.exists() {
            match load_snapshot(&path) {
                Ok(entries) => {
                    log::info!("Loaded {} submissions from {}", entries.len(), path.display());
                    entries
                }
                Err(e) => {
                    log::error!("Could not read snapshot {}: {} (starting empty)", path.display(), e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };
        Self {
            entries: Mutex::new(entries),
            path: Some(path),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append an entry and rewrite the snapshot. Returns the new entry count and
    /// the outcome of the (best-effort) file write.
    pub async fn append(&self, entry: UserEntry) -> (usize, SideEffect) {
        let mut entries = self.entries.lock().await;
        entries.push(entry);
        let count = entries.len();
        let persisted = match &self.path {
            Some(path) => best_effort::from_result(SNAPSHOT_LABEL, write_snapshot(path, &entries).await),
            None => best_effort::skipped(SNAPSHOT_LABEL, "no snapshot file configured"),
        };
        (count, persisted)
    }

    pub async fn entries(&self) -> Vec<UserEntry> {
        self.entries.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

/// Read a snapshot file back into entries.
pub fn load_snapshot(path: &Path) -> Result<Vec<UserEntry>, StoreError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Write the whole collection to a sibling temp file, then rename it into place.
async fn write_snapshot(path: &Path, entries: &[UserEntry]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(entries)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
