use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying database.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// A merge-update targeted a document that does not exist. Callers rely on
    /// this being distinct from [`StorageError::Unavailable`] so they can
    /// surface a not-found error instead of a retry hint.
    #[error("no document `{key}` in collection `{collection}`")]
    Missing {
        collection: &'static str,
        key: String,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Construct a missing-document error for a merge-update against an absent key.
    pub fn missing(collection: &'static str, key: impl Into<String>) -> Self {
        StorageError::Missing {
            collection,
            key: key.into(),
        }
    }
}
