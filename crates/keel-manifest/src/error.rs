//! Error types for manifest loading.

use std::path::PathBuf;

use keel_core::ResolveError;

/// Errors that can occur while reading project or target files.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading or writing manifest files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest file not found.
    #[error("manifest file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Project-level problem outside the descriptor taxonomy.
    #[error("invalid manifest: {detail}")]
    Invalid {
        /// Description of the problem.
        detail: String,
    },

    /// A descriptor, version, or registration failure.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Result type for manifest operations.
pub type Result<T> = std::result::Result<T, ManifestError>;
