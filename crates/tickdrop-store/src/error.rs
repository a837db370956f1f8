use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("batch serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
