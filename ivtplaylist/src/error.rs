//! Error types for playlist acquisition.

/// Errors raised while acquiring playlist entries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("manifest request failed: {0}")]
    ManifestFetch(#[from] reqwest::Error),

    #[error("manifest is not valid JSON: {0}")]
    ManifestParse(#[from] serde_json::Error),

    #[error("manifest has no \"videos\" array")]
    ManifestShape,

    #[error("folder scan failed: {0}")]
    FolderScan(#[from] std::io::Error),
}

/// Result type specialized for playlist operations.
pub type Result<T> = std::result::Result<T, Error>;
