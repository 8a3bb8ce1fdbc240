use async_trait::async_trait;
use std::sync::Arc;

use crate::media::application::domain::entities::ImageTarget;
use crate::media::application::ports::incoming::use_cases::{
    ProcessImageUseCase, ReplaceThumbnailCommand, ReplaceThumbnailError, ReplaceThumbnailUseCase,
    ThumbnailReplaced,
};
use crate::media::application::ports::outgoing::{ThumbnailOwnerError, ThumbnailOwnerRepository};
use crate::media::application::services::ObjectStoreGateway;

/// Uploads a new thumbnail, points the owner at it, then drops the old object.
///
/// Removing the previous object is best-effort: a failure is logged and the
/// replacement still counts as done.
pub struct ReplaceThumbnailService {
    processor: Arc<dyn ProcessImageUseCase + Send + Sync>,
    gateway: Arc<ObjectStoreGateway>,
    owners: Arc<dyn ThumbnailOwnerRepository + Send + Sync>,
}

impl ReplaceThumbnailService {
    pub fn new(
        processor: Arc<dyn ProcessImageUseCase + Send + Sync>,
        gateway: Arc<ObjectStoreGateway>,
        owners: Arc<dyn ThumbnailOwnerRepository + Send + Sync>,
    ) -> Self {
        Self {
            processor,
            gateway,
            owners,
        }
    }

    async fn cleanup_previous(&self, previous_url: &str) {
        let Some(key) = self.gateway.deletion_key_from_url(previous_url) else {
            tracing::warn!(url = %previous_url, "Previous thumbnail is not in our bucket, leaving it");
            return;
        };

        if let Err(e) = self.gateway.remove(&key).await {
            tracing::warn!(key = %key, error = %e, "Failed to remove previous thumbnail");
        }
    }
}

fn map_owner_error(e: ThumbnailOwnerError, command: &ReplaceThumbnailCommand) -> ReplaceThumbnailError {
    match e {
        ThumbnailOwnerError::NotFound => ReplaceThumbnailError::EntityNotFound(command.entity),
        ThumbnailOwnerError::DatabaseError(msg) => ReplaceThumbnailError::RepositoryError(msg),
    }
}

#[async_trait]
impl ReplaceThumbnailUseCase for ReplaceThumbnailService {
    async fn execute(
        &self,
        command: ReplaceThumbnailCommand,
    ) -> Result<ThumbnailReplaced, ReplaceThumbnailError> {
        let Some((entity_type, id)) = command.entity.linked() else {
            return Err(ReplaceThumbnailError::UnlinkedEntity);
        };

        self.processor.validate(&command.image)?;

        let previous_url = self
            .owners
            .current_thumbnail(entity_type, id)
            .await
            .map_err(|e| map_owner_error(e, &command))?;

        let processed = self
            .processor
            .process(command.image.clone(), ImageTarget::Thumbnail)
            .await?;

        let thumbnail_url = self
            .gateway
            .upload(&processed, &self.gateway.config().thumbnail_prefix)
            .await?;

        if let Err(e) = self
            .owners
            .set_thumbnail(entity_type, id, &thumbnail_url)
            .await
        {
            // the new object is now orphaned
            self.cleanup_previous(&thumbnail_url).await;
            return Err(map_owner_error(e, &command));
        }

        tracing::info!(
            entity = %command.entity,
            thumbnail_url = %thumbnail_url,
            "Thumbnail replaced"
        );

        if let Some(previous) = previous_url.as_deref().filter(|p| *p != thumbnail_url) {
            self.cleanup_previous(previous).await;
        }

        Ok(ThumbnailReplaced {
            thumbnail_url,
            previous_url,
        })
    }
}
