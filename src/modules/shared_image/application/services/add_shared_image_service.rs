use async_trait::async_trait;

use crate::shared_image::application::domain::entities::SharedImage;
use crate::shared_image::application::ports::incoming::use_cases::{
    AddSharedImageCommand, AddSharedImageError, AddSharedImageUseCase,
};
use crate::shared_image::application::ports::outgoing::{NewSharedImage, SharedImageRepository};

const UNKNOWN_FILENAME: &str = "unknown";

pub struct AddSharedImageService<R>
where
    R: SharedImageRepository,
{
    repository: R,
}

impl<R> AddSharedImageService<R>
where
    R: SharedImageRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> AddSharedImageUseCase for AddSharedImageService<R>
where
    R: SharedImageRepository + Send + Sync,
{
    async fn execute(
        &self,
        command: AddSharedImageCommand,
    ) -> Result<SharedImage, AddSharedImageError> {
        let Some((entity_type, entity_id)) = command.entity.linked() else {
            return Err(AddSharedImageError::UnlinkedEntity);
        };

        let image_url = command.image_url.trim();
        if image_url.is_empty() {
            return Err(AddSharedImageError::MissingImageUrl);
        }

        let original_filename = command
            .original_filename
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(UNKNOWN_FILENAME)
            .to_string();

        let image = self
            .repository
            .upsert_active(NewSharedImage {
                entity_type,
                entity_id,
                image_url: image_url.to_string(),
                original_filename,
                file_size: command.file_size.unwrap_or(0).max(0),
            })
            .await
            .map_err(|e| AddSharedImageError::RepositoryError(e.to_string()))?;

        tracing::info!(
            image_id = image.id,
            entity = %command.entity,
            "Shared image registered"
        );

        Ok(image)
    }
}
