// src/error/types.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted slot value could not be decoded into an image,
    /// or the slot document itself is malformed.
    #[error("Persisted image decode error: {0}")]
    Codec(#[from] serde_json::Error),

    /// The store handle was discarded by `reset_store`; open a new
    /// repository to continue.
    #[error("Store has been reset")]
    StoreReset,

    #[error("Other error: {0}")]
    Other(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
