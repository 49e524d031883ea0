//! Error types for Larder.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Archive engine errors
    #[error("Archive creation failed at {}: {source}", .path.display())]
    ArchiveCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Archive extraction failed for {}: {source}", .path.display())]
    ArchiveExtraction {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Storage errors
    #[error("Storage access failed at {}: {source}", .path.display())]
    StorageAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
