use async_trait::async_trait;

use crate::media::application::domain::entities::IncomingImage;
use crate::media::application::domain::image_policy::ImageValidationError;
use crate::media::application::ports::incoming::use_cases::ProcessImageError;
use crate::media::application::ports::outgoing::StorageError;
use crate::shared_image::application::domain::entities::EntityRef;

#[derive(Debug, Clone)]
pub struct ReplaceThumbnailCommand {
    pub entity: EntityRef,
    pub image: IncomingImage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailReplaced {
    pub thumbnail_url: String,
    pub previous_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReplaceThumbnailError {
    #[error("Thumbnails can only be set on a saved blog post or portfolio project")]
    UnlinkedEntity,

    #[error("{0} not found")]
    EntityNotFound(EntityRef),

    #[error(transparent)]
    Invalid(#[from] ImageValidationError),

    #[error(transparent)]
    Processing(#[from] ProcessImageError),

    #[error("Upload failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait ReplaceThumbnailUseCase: Send + Sync {
    async fn execute(
        &self,
        command: ReplaceThumbnailCommand,
    ) -> Result<ThumbnailReplaced, ReplaceThumbnailError>;
}
