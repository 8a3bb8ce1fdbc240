use async_trait::async_trait;

use crate::shared_image::application::domain::entities::{EntityType, SharedImage};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SharedImageRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Invalid stored row: {0}")]
    InvalidRow(String),
}

/// Insert payload for a linked entity. Unlinked owners never reach the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSharedImage {
    pub entity_type: EntityType,
    pub entity_id: i64,
    pub image_url: String,
    pub original_filename: String,
    pub file_size: i64,
}

#[async_trait]
pub trait SharedImageRepository: Send + Sync {
    /// Inserts an active row, or refreshes the existing active row for the same
    /// `(entity_type, entity_id, image_url)`. Inactive rows are never revived.
    async fn upsert_active(
        &self,
        image: NewSharedImage,
    ) -> Result<SharedImage, SharedImageRepositoryError>;

    /// Flags matching active rows inactive and returns how many changed.
    async fn deactivate(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        image_url: &str,
    ) -> Result<u64, SharedImageRepositoryError>;

    /// Same as `deactivate` for legacy rows of `entity_type` whose entity id is
    /// NULL or `0`.
    async fn deactivate_unlinked(
        &self,
        entity_type: EntityType,
        image_url: &str,
    ) -> Result<u64, SharedImageRepositoryError>;
}
