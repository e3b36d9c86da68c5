//! Error types for thrust-core
//!
//! Evaluation never fails: checks and transformations absorb type mismatches.
//! These errors come from building and looking up shared assets.

use crate::AssetId;
use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("{kind} not found: {id}")]
    AssetNotFound { kind: &'static str, id: AssetId },

    #[error("Duplicate {kind}: {id}")]
    DuplicateAsset { kind: &'static str, id: AssetId },

    #[error("Invalid asset {id}: {reason}")]
    InvalidAsset { id: AssetId, reason: String },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
