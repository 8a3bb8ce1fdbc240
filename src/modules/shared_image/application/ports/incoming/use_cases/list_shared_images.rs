use async_trait::async_trait;

use crate::shared_image::application::domain::entities::{
    EntityRef, EntityType, SharedImageListing,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ListScope {
    /// Images of one entity. `Unlinked` lists nothing.
    Entity(EntityRef),
    /// Admin view over the whole library, optionally narrowed.
    All {
        entity_type: Option<EntityType>,
        entity_id: Option<i64>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListSharedImagesQuery {
    pub scope: ListScope,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListSharedImagesError {
    #[error("repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ListSharedImagesUseCase: Send + Sync {
    async fn execute(
        &self,
        query: ListSharedImagesQuery,
    ) -> Result<Vec<SharedImageListing>, ListSharedImagesError>;
}
