use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::media::application::ports::outgoing::{ObjectStorage, StorageError};

/// google-cloud-storage addresses buckets as `projects/_/buckets/{bucket}`.
fn bucket_resource(bucket: &str) -> String {
    format!("projects/_/buckets/{}", bucket)
}

fn map_storage_error(msg: &str) -> StorageError {
    let m = msg.to_lowercase();

    if m.contains("permission") || m.contains("forbidden") || m.contains("denied") {
        StorageError::AccessDenied
    } else if m.contains("bucket") && (m.contains("not found") || m.contains("404")) {
        StorageError::BucketNotFound
    } else if m.contains("404") || m.contains("not found") || m.contains("no such object") {
        StorageError::ObjectNotFound
    } else if m.contains("timeout")
        || m.contains("dns")
        || m.contains("connection")
        || m.contains("network")
        || m.contains("tcp")
    {
        StorageError::NetworkInterrupted
    } else {
        StorageError::Infrastructure(msg.to_string())
    }
}

/// Seam over the google-cloud-storage clients so the adapter is testable
/// without their request builders.
#[async_trait]
trait GcsClient: Send + Sync {
    async fn write_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), String>;

    async fn delete_object(&self, bucket_resource: &str, object_name: &str) -> Result<(), String>;
}

#[cfg(test)]
struct ArcGcsClient(Arc<dyn GcsClient>);

#[cfg(test)]
#[async_trait]
impl GcsClient for ArcGcsClient {
    async fn write_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), String> {
        self.0
            .write_object(bucket_resource, object_name, bytes, content_type)
            .await
    }

    async fn delete_object(&self, bucket_resource: &str, object_name: &str) -> Result<(), String> {
        self.0.delete_object(bucket_resource, object_name).await
    }
}

/// Production `ObjectStorage` on Google Cloud Storage.
#[derive(Clone)]
pub struct GcsObjectStorage {
    client: Arc<OnceCell<Box<dyn GcsClient>>>,
}

impl Default for GcsObjectStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl GcsObjectStorage {
    /// The client is built lazily on first use.
    pub fn new() -> Self {
        Self {
            client: Arc::new(OnceCell::new()),
        }
    }

    async fn get_client(&self) -> Result<&dyn GcsClient, Box<dyn std::error::Error + Send + Sync>> {
        self.client
            .get_or_try_init(|| async {
                let real_client = RealGcsClient::new().await?;
                Ok(Box::new(real_client) as Box<dyn GcsClient>)
            })
            .await
            .map(|boxed| &**boxed)
    }

    #[cfg(test)]
    fn with_client(client: Arc<dyn GcsClient>) -> Self {
        let once = OnceCell::new();
        let _ = once.set(Box::new(ArcGcsClient(client)) as Box<dyn GcsClient>);

        Self {
            client: Arc::new(once),
        }
    }
}

#[async_trait]
impl ObjectStorage for GcsObjectStorage {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let client = self.get_client().await.map_err(|e| {
            tracing::error!(error = %e, "GCS client unavailable");
            StorageError::Infrastructure(e.to_string())
        })?;

        client
            .write_object(&bucket_resource(bucket), key, bytes, content_type)
            .await
            .map_err(|e| map_storage_error(&e))
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        let client = self.get_client().await.map_err(|e| {
            tracing::error!(error = %e, "GCS client unavailable");
            StorageError::Infrastructure(e.to_string())
        })?;

        client
            .delete_object(&bucket_resource(bucket), key)
            .await
            .map_err(|e| map_storage_error(&e))
    }
}

// ============================================================================
// Real Google Cloud Storage client (google-cloud-storage)
// ============================================================================

struct RealGcsClient {
    storage: google_cloud_storage::client::Storage,
    control: google_cloud_storage::client::StorageControl,
}

impl RealGcsClient {
    async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!("Initializing GCS client...");

        let storage = google_cloud_storage::client::Storage::builder()
            .build()
            .await
            .map_err(|e| {
                tracing::error!("Failed to build GCS storage client: {:?}", e);
                e
            })?;

        let control = google_cloud_storage::client::StorageControl::builder()
            .build()
            .await
            .map_err(|e| {
                tracing::error!("Failed to build GCS control client: {:?}", e);
                e
            })?;

        tracing::info!("GCS clients created");

        Ok(Self { storage, control })
    }
}

#[async_trait]
impl GcsClient for RealGcsClient {
    async fn write_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), String> {
        self.storage
            .write_object(
                bucket_resource.to_string(),
                object_name.to_string(),
                bytes::Bytes::from(bytes),
            )
            .set_content_type(content_type.to_string())
            .send_unbuffered()
            .await
            .map_err(|e| e.to_string())?;

        Ok(())
    }

    async fn delete_object(&self, bucket_resource: &str, object_name: &str) -> Result<(), String> {
        self.control
            .delete_object()
            .set_bucket(bucket_resource.to_string())
            .set_object(object_name.to_string())
            .send()
            .await
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeGcsClient {
        last_write: Mutex<Option<(String, String, usize, String)>>,
        last_delete: Mutex<Option<(String, String)>>,
        write_result: Mutex<Option<String>>,
        delete_result: Mutex<Option<String>>,
    }

    impl FakeGcsClient {
        fn fail_writes(&self, msg: &str) {
            *self.write_result.lock().unwrap() = Some(msg.to_string());
        }

        fn fail_deletes(&self, msg: &str) {
            *self.delete_result.lock().unwrap() = Some(msg.to_string());
        }
    }

    #[async_trait]
    impl GcsClient for FakeGcsClient {
        async fn write_object(
            &self,
            bucket_resource: &str,
            object_name: &str,
            bytes: Vec<u8>,
            content_type: &str,
        ) -> Result<(), String> {
            *self.last_write.lock().unwrap() = Some((
                bucket_resource.to_string(),
                object_name.to_string(),
                bytes.len(),
                content_type.to_string(),
            ));
            match self.write_result.lock().unwrap().clone() {
                Some(msg) => Err(msg),
                None => Ok(()),
            }
        }

        async fn delete_object(
            &self,
            bucket_resource: &str,
            object_name: &str,
        ) -> Result<(), String> {
            *self.last_delete.lock().unwrap() =
                Some((bucket_resource.to_string(), object_name.to_string()));
            match self.delete_result.lock().unwrap().clone() {
                Some(msg) => Err(msg),
                None => Ok(()),
            }
        }
    }

    #[tokio::test]
    async fn test_put_uses_bucket_resource_and_content_type() {
        let fake = Arc::new(FakeGcsClient::default());
        let storage = GcsObjectStorage::with_client(fake.clone());

        storage
            .put_object("blog-images", "editor/1-abc.jpg", vec![1, 2, 3], "image/jpeg")
            .await
            .unwrap();

        let call = fake.last_write.lock().unwrap().clone().unwrap();
        assert_eq!(call.0, "projects/_/buckets/blog-images");
        assert_eq!(call.1, "editor/1-abc.jpg");
        assert_eq!(call.2, 3);
        assert_eq!(call.3, "image/jpeg");
    }

    #[tokio::test]
    async fn test_put_maps_access_denied() {
        let fake = Arc::new(FakeGcsClient::default());
        fake.fail_writes("Permission denied on resource");
        let storage = GcsObjectStorage::with_client(fake);

        let err = storage
            .put_object("b", "k", vec![], "image/jpeg")
            .await
            .unwrap_err();

        assert_eq!(err, StorageError::AccessDenied);
    }

    #[tokio::test]
    async fn test_delete_uses_bucket_resource() {
        let fake = Arc::new(FakeGcsClient::default());
        let storage = GcsObjectStorage::with_client(fake.clone());

        storage.delete_object("blog-images", "thumbnails/old.jpg").await.unwrap();

        let call = fake.last_delete.lock().unwrap().clone().unwrap();
        assert_eq!(call.0, "projects/_/buckets/blog-images");
        assert_eq!(call.1, "thumbnails/old.jpg");
    }

    #[tokio::test]
    async fn test_delete_maps_object_not_found() {
        let fake = Arc::new(FakeGcsClient::default());
        fake.fail_deletes("No such object: blog-images/x.jpg (404)");
        let storage = GcsObjectStorage::with_client(fake);

        let err = storage.delete_object("blog-images", "x.jpg").await.unwrap_err();

        assert_eq!(err, StorageError::ObjectNotFound);
    }

    #[test]
    fn test_error_mapping() {
        assert_eq!(map_storage_error("Bucket not found (404)"), StorageError::BucketNotFound);
        assert_eq!(map_storage_error("connection reset"), StorageError::NetworkInterrupted);
        assert_eq!(map_storage_error("403 Forbidden"), StorageError::AccessDenied);
        assert_eq!(
            map_storage_error("quota exceeded"),
            StorageError::Infrastructure("quota exceeded".to_string())
        );
    }
}
