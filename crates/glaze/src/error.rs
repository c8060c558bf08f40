//! Error types for the glaze command.

use std::io;
use std::path::PathBuf;

use glaze_tokens::CatalogError;
use thiserror::Error;

/// Errors raised while configuring or running a rewrite.
///
/// Configuration and catalog errors abort the run. I/O errors on individual files are
/// reported and skipped by the run loop.
#[derive(Debug, Error)]
pub enum GlazeError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The recipe catalog failed validation.
    #[error("invalid recipe catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// Reading or writing a source file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file being read or written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

impl GlazeError {
    /// Wrap `source` with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
