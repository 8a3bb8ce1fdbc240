use async_trait::async_trait;

use crate::shared_image::application::ports::incoming::use_cases::{
    DeactivateSharedImageError, DeactivateSharedImageUseCase, DeactivationTarget,
};
use crate::shared_image::application::ports::outgoing::SharedImageRepository;

pub struct DeactivateSharedImageService<R>
where
    R: SharedImageRepository,
{
    repository: R,
}

impl<R> DeactivateSharedImageService<R>
where
    R: SharedImageRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> DeactivateSharedImageUseCase for DeactivateSharedImageService<R>
where
    R: SharedImageRepository + Send + Sync,
{
    async fn execute(
        &self,
        target: DeactivationTarget,
        image_url: &str,
    ) -> Result<u64, DeactivateSharedImageError> {
        let image_url = image_url.trim();
        if image_url.is_empty() {
            return Err(DeactivateSharedImageError::MissingImageUrl);
        }

        let result = match target {
            DeactivationTarget::Entity(entity) => {
                // unsaved items own no rows
                let Some((entity_type, entity_id)) = entity.linked() else {
                    tracing::debug!(image_url, "Deactivate on unlinked entity, nothing to do");
                    return Ok(0);
                };
                self.repository
                    .deactivate(entity_type, entity_id, image_url)
                    .await
            }
            DeactivationTarget::Unlinked(entity_type) => {
                self.repository
                    .deactivate_unlinked(entity_type, image_url)
                    .await
            }
        };

        let changed =
            result.map_err(|e| DeactivateSharedImageError::RepositoryError(e.to_string()))?;

        tracing::info!(owner = ?target, image_url, changed, "Shared image deactivated");
        Ok(changed)
    }
}
