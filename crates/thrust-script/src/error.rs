//! Error types for thrust-script

use thrust_core::AssetId;
use thiserror::Error;

/// Asset loading error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Duplicate definition: {0}")]
    DuplicateDefinition(AssetId),

    #[error("Failed to resolve {asset}: {source}")]
    Resolve {
        asset: AssetId,
        #[source]
        source: thrust_core::Error,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
