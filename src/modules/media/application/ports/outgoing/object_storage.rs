use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Access denied")]
    AccessDenied,

    #[error("Bucket not found")]
    BucketNotFound,

    #[error("Object not found")]
    ObjectNotFound,

    #[error("Network problem occurred")]
    NetworkInterrupted,

    #[error("Storage infrastructure error: {0}")]
    Infrastructure(String),
}

/// Raw object operations on one bucket-addressed store.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Overwrites any existing object under `key`.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError>;
}
