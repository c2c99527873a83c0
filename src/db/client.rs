use async_trait::async_trait;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Failures raised while reading from a document store.
///
/// Every variant means the same thing to callers (the fetch failed); the
/// variant only records which layer it came from.
#[derive(Debug, Error)]
pub enum DBError {
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("malformed document in collection {collection}: {source}")]
    Document {
        collection: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported database type: {0}")]
    UnsupportedType(String),
    #[error("database connection lock poisoned")]
    Poisoned,
    #[error("blocking database task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// The DBClient trait defines the read interface over a document store.
#[async_trait]
pub trait DBClient: Send + Sync {
    /// Short backend name used in logs.
    fn kind(&self) -> &'static str;

    /// Returns every document in `collection`, in the order the store yields them.
    /// An unknown or empty collection yields an empty list.
    async fn get_documents(&self, collection: &str) -> Result<Vec<JsonValue>, DBError>;

    /// Releases backend resources. Further calls may fail.
    async fn close(&self) -> Result<(), DBError> {
        Ok(())
    }
}
