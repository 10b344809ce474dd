use mongodb::error::Error as MongoError;
use thiserror::Error;

use crate::dao::storage::StorageError;

/// Result alias for MongoDB DAO operations.
pub type MongoResult<T> = Result<T, MongoDaoError>;

/// Errors raised by the MongoDB backend.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        uri: String,
        #[source]
        source: MongoError,
    },
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping failed during initial connection after {attempts} attempt(s)")]
    InitialPing {
        attempts: u32,
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping health check failed")]
    HealthPing {
        #[source]
        source: MongoError,
    },
    #[error("failed to ensure index `{index}` on collection `{collection}`")]
    EnsureIndex {
        collection: &'static str,
        index: &'static str,
        #[source]
        source: MongoError,
    },
    #[error("{op} failed on collection `{collection}`")]
    Query {
        collection: &'static str,
        op: &'static str,
        #[source]
        source: MongoError,
    },
    #[error("document `{key}` in collection `{collection}` holds an invalid id")]
    InvalidId {
        collection: &'static str,
        key: String,
        #[source]
        source: uuid::Error,
    },
    #[error("failed to encode document for collection `{collection}`")]
    Encode {
        collection: &'static str,
        #[source]
        source: mongodb::bson::error::Error,
    },
    #[error("no document `{key}` in collection `{collection}`")]
    Missing {
        collection: &'static str,
        key: String,
    },
}

impl From<MongoDaoError> for StorageError {
    fn from(err: MongoDaoError) -> Self {
        match err {
            MongoDaoError::Missing { collection, key } => StorageError::missing(collection, key),
            other => StorageError::unavailable(other.to_string(), other),
        }
    }
}
