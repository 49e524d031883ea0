//! Local filesystem artifact cache.
//!
//! Each cache entry is one gzip-compressed tar archive in a flat base
//! directory, named after the normalized cache key. Restore resolves an
//! exact key first, then falls back through ordered restore keys used
//! as prefixes over the stored entry names.

pub mod archiver;
pub mod keys;
pub mod store;
pub mod types;

pub use keys::normalize;
pub use store::{CacheStore, LocalStore};
pub use types::{RestoreRequest, RestoreResult, SaveRequest, SaveResult};
