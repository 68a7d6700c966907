//! Error types for cutlist conversion and saved-project storage.

use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of a [`CutlistError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Filesystem or transport failure.
    Io,
    /// Stored document could not be encoded or decoded.
    Serialization,
    /// A referenced folder or project does not exist.
    NotFound,
    /// Caller supplied an unusable value (e.g. blank name).
    InvalidInput,
    /// The store refused or could not serve the request.
    Unavailable,
}

/// Main error type for the cutlist library.
#[derive(Debug, Error)]
pub enum CutlistError {
    #[error("Folder not found: {id}")]
    FolderNotFound { id: String },

    #[error("Project not found: {id}")]
    ProjectNotFound { id: String },

    #[error("Invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    #[error("Store unavailable: {message}")]
    Unavailable { message: String },

    #[error("Corrupt store document {path}: {source}")]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CutlistError {
    /// Shorthand for a blank or otherwise unusable name.
    pub fn blank_name(field: &str) -> Self {
        CutlistError::InvalidInput {
            field: field.to_string(),
            message: "must not be empty".to_string(),
        }
    }

    /// Get the classification for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CutlistError::FolderNotFound { .. } => ErrorCode::NotFound,
            CutlistError::ProjectNotFound { .. } => ErrorCode::NotFound,
            CutlistError::InvalidInput { .. } => ErrorCode::InvalidInput,
            CutlistError::Unavailable { .. } => ErrorCode::Unavailable,
            CutlistError::CorruptStore { .. } => ErrorCode::Serialization,
            CutlistError::Json(_) => ErrorCode::Serialization,
            CutlistError::Io(_) => ErrorCode::Io,
        }
    }
}

/// Result type alias for cutlist operations.
pub type Result<T> = std::result::Result<T, CutlistError>;
