use async_trait::async_trait;

use crate::shared_image::application::domain::entities::{EntityRef, EntityType};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeactivateSharedImageError {
    #[error("image url is required")]
    MissingImageUrl,
    #[error("repository error: {0}")]
    RepositoryError(String),
}

/// Rows a deactivation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeactivationTarget {
    Entity(EntityRef),
    /// Legacy rows of this type stored with a NULL or `0` entity id.
    Unlinked(EntityType),
}

#[async_trait]
pub trait DeactivateSharedImageUseCase: Send + Sync {
    /// Returns the number of rows switched off. Zero is a success.
    async fn execute(
        &self,
        target: DeactivationTarget,
        image_url: &str,
    ) -> Result<u64, DeactivateSharedImageError>;
}
