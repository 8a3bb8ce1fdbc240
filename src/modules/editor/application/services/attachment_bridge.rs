use async_trait::async_trait;
use std::sync::Arc;

use crate::editor::application::ports::incoming::use_cases::{
    AttachImageError, AttachImageUseCase, Attachment, AttachmentOutcome,
};
use crate::media::application::domain::entities::{ImageTarget, IncomingImage};
use crate::media::application::ports::incoming::use_cases::ProcessImageUseCase;
use crate::media::application::services::ObjectStoreGateway;
use crate::shared_image::application::domain::entities::{EntityRef, TemporaryImage};
use crate::shared_image::application::ports::incoming::use_cases::{
    AddSharedImageCommand, AddSharedImageUseCase,
};

const EXTERNAL_FILENAME: &str = "external-image";

/// Processor, object store and library behind one editor insertion.
///
/// Validation, processing and upload failures abort the insertion. A failed
/// library write does not: the image is already public and the document can
/// reference it.
pub struct AttachmentBridge {
    processor: Arc<dyn ProcessImageUseCase + Send + Sync>,
    gateway: Arc<ObjectStoreGateway>,
    registry: Arc<dyn AddSharedImageUseCase + Send + Sync>,
}

impl AttachmentBridge {
    pub fn new(
        processor: Arc<dyn ProcessImageUseCase + Send + Sync>,
        gateway: Arc<ObjectStoreGateway>,
        registry: Arc<dyn AddSharedImageUseCase + Send + Sync>,
    ) -> Self {
        Self {
            processor,
            gateway,
            registry,
        }
    }

    fn prefix_for(&self, target: ImageTarget) -> &str {
        let config = self.gateway.config();
        match target {
            ImageTarget::Thumbnail => &config.thumbnail_prefix,
            ImageTarget::EditorImage => &config.editor_prefix,
        }
    }

    async fn stage_or_sync(
        &self,
        entity: EntityRef,
        url: String,
        filename: String,
        file_size: i64,
    ) -> Attachment {
        let outcome = if entity.is_persisted() {
            let result = self
                .registry
                .execute(AddSharedImageCommand {
                    entity,
                    image_url: url.clone(),
                    original_filename: Some(filename.clone()),
                    file_size: Some(file_size),
                })
                .await;

            match result {
                Ok(image) => AttachmentOutcome::Synced(image),
                Err(e) => {
                    tracing::warn!(
                        entity = %entity,
                        url = %url,
                        error = %e,
                        "Image uploaded but not added to the shared library"
                    );
                    AttachmentOutcome::SyncFailed
                }
            }
        } else {
            AttachmentOutcome::Staged(TemporaryImage {
                url: url.clone(),
                filename: filename.clone(),
                file_size,
            })
        };

        Attachment {
            url,
            filename,
            file_size,
            outcome,
        }
    }
}

/// Last path segment of `url`, without query or fragment.
fn filename_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let path = match path.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map(|(_, p)| p).unwrap_or(""),
        None => path,
    };

    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(EXTERNAL_FILENAME)
        .to_string()
}

#[async_trait]
impl AttachImageUseCase for AttachmentBridge {
    async fn attach_file(
        &self,
        entity: EntityRef,
        image: IncomingImage,
        target: ImageTarget,
    ) -> Result<Attachment, AttachImageError> {
        self.processor.validate(&image)?;

        let processed = self.processor.process(image, target).await?;
        let url = self.gateway.upload(&processed, self.prefix_for(target)).await?;

        tracing::info!(
            entity = %entity,
            target = %target,
            strategy = processed.strategy.unwrap_or("compress"),
            "Image attached"
        );

        Ok(self
            .stage_or_sync(entity, url, processed.filename.clone(), processed.size() as i64)
            .await)
    }

    async fn attach_url(&self, entity: EntityRef, url: &str) -> Result<Attachment, AttachImageError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AttachImageError::MissingUrl);
        }

        Ok(self
            .stage_or_sync(entity, url.to_string(), filename_from_url(url), 0)
            .await)
    }
}
