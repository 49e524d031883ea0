//! Cache store trait and the local filesystem implementation.

use crate::archiver;
use crate::keys::{self, ARCHIVE_SUFFIX};
use crate::types::{RestoreRequest, RestoreResult, SaveRequest, SaveResult};
use async_trait::async_trait;
use larder_core::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Storage backend consumed by the remote-or-local cache router.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Restore the best-matching entry for a key.
    async fn restore(&self, req: &RestoreRequest) -> Result<RestoreResult>;

    /// Save paths under a key, overwriting any colliding entry.
    async fn save(&self, req: &SaveRequest) -> Result<SaveResult>;
}

/// Cache store backed by a flat directory of `.tar.gz` entries.
///
/// One file per entry, named after the normalized key. No expiry
/// metadata is kept; existence of the file is the only state, and
/// cleanup is an external concern.
pub struct LocalStore {
    base_dir: PathBuf,
    work_dir: PathBuf,
}

impl LocalStore {
    /// `base_dir` holds the entries; `work_dir` is where relative save
    /// paths resolve and where restored entries extract.
    pub fn new(base_dir: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            work_dir: work_dir.into(),
        }
    }

    /// Store that extracts into the process working directory.
    pub fn from_current_dir(base_dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        Ok(Self::new(base_dir, std::env::current_dir()?))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(keys::entry_file_name(key))
    }

    async fn extract_entry(&self, entry: &Path) -> Result<()> {
        info!(entry = %entry.display(), "extracting cache entry");
        let src = entry.to_path_buf();
        let work_dir = self.work_dir.clone();
        tokio::task::spawn_blocking(move || archiver::extract(&src, &work_dir))
            .await
            .map_err(|e| Error::ArchiveExtraction {
                path: entry.to_path_buf(),
                source: std::io::Error::other(e),
            })??;
        debug!("cache entry extracted");
        Ok(())
    }

    /// Entry filenames in `base_dir`, in directory listing order.
    ///
    /// Listing order is whatever the filesystem reports. When several
    /// entries share a restore-key prefix, which one wins depends on
    /// that order.
    async fn list_entries(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut dir = tokio::fs::read_dir(&self.base_dir)
            .await
            .map_err(|e| Error::StorageAccess {
                path: self.base_dir.clone(),
                source: e,
            })?;
        while let Some(entry) = dir.next_entry().await.map_err(|e| Error::StorageAccess {
            path: self.base_dir.clone(),
            source: e,
        })? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(ARCHIVE_SUFFIX) {
                names.push(name);
            }
        }
        Ok(names)
    }
}

#[async_trait]
impl CacheStore for LocalStore {
    async fn restore(&self, req: &RestoreRequest) -> Result<RestoreResult> {
        if !self.base_dir.exists() {
            info!(base_dir = %self.base_dir.display(), "cache directory does not exist");
            return Ok(RestoreResult::miss());
        }

        // Exact match on the primary key.
        let entry = self.entry_path(&req.key);
        if entry.exists() {
            info!(key = %req.key, "cache hit on primary key");
            if req.lookup_only {
                debug!(key = %req.key, "lookup only, entry can be restored");
            } else {
                self.extract_entry(&entry).await?;
            }
            return Ok(RestoreResult {
                matched_key: Some(req.key.clone()),
                exact: true,
            });
        }

        if !req.restore_keys.is_empty() {
            debug!("no exact match, trying restore keys as prefixes");
            let names = self.list_entries().await?;
            for restore_key in &req.restore_keys {
                let prefix = keys::normalize(restore_key);
                let Some(name) = names.iter().find(|n| n.starts_with(&prefix)) else {
                    continue;
                };
                let matched_key = keys::display_key(name);
                info!(
                    restore_key = %restore_key,
                    matched = %matched_key,
                    "cache hit on restore key"
                );
                if req.lookup_only {
                    debug!(matched = %matched_key, "lookup only, entry can be restored");
                } else {
                    self.extract_entry(&self.base_dir.join(name)).await?;
                }
                return Ok(RestoreResult {
                    matched_key: Some(matched_key),
                    exact: false,
                });
            }
        }

        info!(key = %req.key, "cache miss");
        Ok(RestoreResult::miss())
    }

    async fn save(&self, req: &SaveRequest) -> Result<SaveResult> {
        tokio::fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| Error::StorageAccess {
                path: self.base_dir.clone(),
                source: e,
            })?;

        let file_name = keys::entry_file_name(&req.key);
        let dest = self.base_dir.join(&file_name);
        info!(key = %req.key, dest = %dest.display(), "saving cache entry");

        // Archive into a partial file and rename into place, so a
        // concurrent reader never observes a half-written entry.
        let partial = self.base_dir.join(format!("{file_name}.partial"));
        let paths = req.paths.clone();
        let work_dir = self.work_dir.clone();
        let partial_for_task = partial.clone();
        let archived = tokio::task::spawn_blocking(move || {
            archiver::create(&paths, &partial_for_task, &work_dir)
        })
        .await
        .map_err(|e| Error::ArchiveCreation {
            path: dest.clone(),
            source: std::io::Error::other(e),
        })?;
        if let Err(e) = archived {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(e);
        }
        tokio::fs::rename(&partial, &dest)
            .await
            .map_err(|e| Error::StorageAccess {
                path: dest.clone(),
                source: e,
            })?;

        let size_bytes = tokio::fs::metadata(&dest)
            .await
            .map_err(|e| Error::StorageAccess {
                path: dest.clone(),
                source: e,
            })?
            .len();
        let size_mib = size_bytes as f64 / (1024.0 * 1024.0);
        info!(size_bytes, size_mib = %format!("{size_mib:.2}"), "cache entry saved");

        Ok(SaveResult {
            path: dest,
            size_bytes,
        })
    }
}
