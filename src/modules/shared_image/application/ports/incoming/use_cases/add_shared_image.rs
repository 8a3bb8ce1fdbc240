use async_trait::async_trait;

use crate::shared_image::application::domain::entities::{EntityRef, SharedImage};

#[derive(Debug, Clone, PartialEq)]
pub struct AddSharedImageCommand {
    pub entity: EntityRef,
    pub image_url: String,
    pub original_filename: Option<String>,
    pub file_size: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AddSharedImageError {
    #[error("entity must be saved before images can be registered")]
    UnlinkedEntity,
    #[error("image url is required")]
    MissingImageUrl,
    #[error("repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait AddSharedImageUseCase: Send + Sync {
    async fn execute(&self, command: AddSharedImageCommand)
        -> Result<SharedImage, AddSharedImageError>;
}
