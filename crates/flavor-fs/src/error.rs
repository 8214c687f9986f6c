//! Error types for flavor-fs

use std::path::PathBuf;

/// Result type for flavor-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading from a byte source
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No mounted source provides {id}")]
    NotFound { id: String },

    #[error("Unsupported scheme: {scheme}")]
    UnsupportedScheme { scheme: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path escapes the mount root: {name}")]
    PathEscapesRoot { name: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound { id: id.to_string() }
    }
}
