//! Larder Core
//!
//! Error taxonomy shared across the Larder crates. This crate has
//! minimal dependencies and defines the failure vocabulary the cache
//! store and its callers speak.

pub mod error;

pub use error::{Error, Result};
