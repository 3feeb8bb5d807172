//! Persistence error types

/// Errors from a favorites backing store.
///
/// These never escape the favorites API; they are logged and the
/// favorites set falls back to what it holds in memory.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(bincode::Error),
    #[error("deserialization error: {0}")]
    Deserialization(bincode::Error),
}
