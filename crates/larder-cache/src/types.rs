//! Request and result types for the cache store.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Request to restore paths for a cache key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreRequest {
    /// Primary cache key.
    pub key: String,
    /// Fallback keys, tried in order as prefixes after an exact miss.
    #[serde(default)]
    pub restore_keys: Vec<String>,
    /// Paths the caller expects back. Recorded for the router; the
    /// archive itself determines what gets written on extraction.
    pub paths: Vec<PathBuf>,
    /// Report hit/miss without extracting anything.
    #[serde(default)]
    pub lookup_only: bool,
}

impl RestoreRequest {
    pub fn new(key: impl Into<String>, paths: Vec<PathBuf>) -> Self {
        Self {
            key: key.into(),
            restore_keys: Vec::new(),
            paths,
            lookup_only: false,
        }
    }

    pub fn with_restore_keys(mut self, restore_keys: Vec<String>) -> Self {
        self.restore_keys = restore_keys;
        self
    }

    pub fn lookup_only(mut self) -> Self {
        self.lookup_only = true;
        self
    }
}

/// Request to save paths under a cache key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRequest {
    /// Cache key.
    pub key: String,
    /// Paths to bundle into the entry. Must be non-empty.
    pub paths: Vec<PathBuf>,
}

/// Result of a restore operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreResult {
    /// Key that matched: the request key verbatim on an exact hit, a
    /// filename-derived display key on a prefix hit, `None` on a miss.
    pub matched_key: Option<String>,
    /// Whether the hit was on the primary key.
    pub exact: bool,
}

impl RestoreResult {
    pub fn miss() -> Self {
        Self {
            matched_key: None,
            exact: false,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.matched_key.is_some()
    }
}

/// Result of a save operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResult {
    /// Where the entry was written.
    pub path: PathBuf,
    /// Entry size in bytes.
    pub size_bytes: u64,
}
