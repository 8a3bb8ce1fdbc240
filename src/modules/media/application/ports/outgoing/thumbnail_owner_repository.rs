use async_trait::async_trait;

use crate::shared_image::application::domain::entities::EntityType;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThumbnailOwnerError {
    #[error("Entity not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Blog posts and portfolio projects as owners of one thumbnail URL each.
#[async_trait]
pub trait ThumbnailOwnerRepository: Send + Sync {
    async fn current_thumbnail(
        &self,
        entity_type: EntityType,
        id: i64,
    ) -> Result<Option<String>, ThumbnailOwnerError>;

    async fn set_thumbnail(
        &self,
        entity_type: EntityType,
        id: i64,
        url: &str,
    ) -> Result<(), ThumbnailOwnerError>;
}
