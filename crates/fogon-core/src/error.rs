//! Error types for the cooking guide library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all guide operations.
///
/// The progression engine itself is infallible: navigation and the
/// derivation pipeline absorb boundary and malformed-input cases by
/// clamping and defaulting. Errors are reserved for the edges: storage,
/// recipe lookup, and content import.
#[derive(Error, Debug)]
pub enum GuideError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Recipe not found for the given identifier
    #[error("Recipe '{id}' not found")]
    RecipeNotFound { id: String },
    /// Imported recipe content is unusable even after coercion
    #[error("Recipe content is unusable: {reason}")]
    UnusableContent { reason: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl GuideError {
    /// Creates a new database error with additional context.
    pub fn database_error(message: &str, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.to_string(),
            source,
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| GuideError::database_error(message, e))
    }
}

/// Result type alias for guide operations
pub type Result<T> = std::result::Result<T, GuideError>;
