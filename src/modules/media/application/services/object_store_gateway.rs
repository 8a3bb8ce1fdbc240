use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::Arc;

use crate::media::application::domain::entities::ProcessedImage;
use crate::media::application::domain::storage_config::StorageConfig;
use crate::media::application::ports::outgoing::{ObjectStorage, StorageError};

const KEY_SUFFIX_LEN: usize = 6;

/// Uploads images under generated keys and maps keys to public URLs and back.
pub struct ObjectStoreGateway {
    storage: Arc<dyn ObjectStorage + Send + Sync>,
    config: StorageConfig,
}

impl ObjectStoreGateway {
    pub fn new(storage: Arc<dyn ObjectStorage + Send + Sync>, config: StorageConfig) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Stores the image under `{prefix}/{unix_millis}-{random}.{ext}` and
    /// returns its public URL.
    pub async fn upload(&self, image: &ProcessedImage, prefix: &str) -> Result<String, StorageError> {
        let key = object_key(prefix, image.extension());

        self.storage
            .put_object(
                &self.config.bucket,
                &key,
                image.bytes.clone(),
                image.content_type(),
            )
            .await
            .inspect_err(|e| {
                tracing::error!(key = %key, error = %e, "Object upload failed");
            })?;

        tracing::info!(key = %key, size = image.size(), "Object uploaded");
        Ok(self.public_url(&key))
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.config.public_base_url, self.config.bucket, key)
    }

    /// Inverse of [`public_url`](Self::public_url). URLs of other hosts or
    /// buckets yield `None`.
    pub fn deletion_key_from_url(&self, url: &str) -> Option<String> {
        let prefix = format!("{}/{}/", self.config.public_base_url, self.config.bucket);
        let key = url.trim().strip_prefix(&prefix)?;

        if key.is_empty()
            || key.contains(['?', '#'])
            || key.split('/').any(|segment| segment.is_empty() || segment == "..")
        {
            return None;
        }

        Some(key.to_string())
    }

    pub async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage.delete_object(&self.config.bucket, key).await?;
        tracing::info!(key = %key, "Object removed");
        Ok(())
    }
}

pub fn object_key(prefix: &str, extension: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(KEY_SUFFIX_LEN)
        .map(char::from)
        .collect();

    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("{millis}-{suffix}.{extension}")
    } else {
        format!("{prefix}/{millis}-{suffix}.{extension}")
    }
}
