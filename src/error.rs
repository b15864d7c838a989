use thiserror::Error;

/// Failures while reading or writing the durable records
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("could not encode or decode record '{key}': {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("migration failed: {0}")]
    Migration(String),
}

/// Failures of profile store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("profile name must not be empty")]
    EmptyName,
    #[error("no profile with id {0}")]
    ProfileNotFound(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
