use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use crate::editor::application::domain::markdown::ImageReferences;
use crate::shared_image::application::ports::incoming::use_cases::{
    AddSharedImageCommand, AddSharedImageUseCase, AttachTemporaryImagesCommand,
    AttachTemporaryImagesError, AttachTemporaryImagesUseCase, AttachmentSummary,
};

/// Registers staged images once their entity has been saved.
///
/// Only images the saved document still references are registered. A failed
/// registration is logged and counted, the rest still run.
pub struct AttachTemporaryImagesService {
    add: Arc<dyn AddSharedImageUseCase + Send + Sync>,
}

impl AttachTemporaryImagesService {
    pub fn new(add: Arc<dyn AddSharedImageUseCase + Send + Sync>) -> Self {
        Self { add }
    }
}

#[async_trait]
impl AttachTemporaryImagesUseCase for AttachTemporaryImagesService {
    async fn execute(
        &self,
        command: AttachTemporaryImagesCommand,
    ) -> Result<AttachmentSummary, AttachTemporaryImagesError> {
        if !command.entity.is_persisted() {
            return Err(AttachTemporaryImagesError::UnlinkedEntity);
        }

        let references = ImageReferences::parse(&command.document_content);
        let mut seen = HashSet::new();
        let mut summary = AttachmentSummary::default();

        for temp in command.images {
            if !seen.insert(temp.url.clone()) || !references.contains(&temp.url) {
                tracing::debug!(url = %temp.url, "Staged image no longer referenced, skipping");
                summary.skipped += 1;
                continue;
            }

            let result = self
                .add
                .execute(AddSharedImageCommand {
                    entity: command.entity,
                    image_url: temp.url.clone(),
                    original_filename: Some(temp.filename),
                    file_size: Some(temp.file_size),
                })
                .await;

            match result {
                Ok(_) => summary.attached += 1,
                Err(e) => {
                    tracing::warn!(
                        url = %temp.url,
                        entity = %command.entity,
                        error = %e,
                        "Failed to register staged image"
                    );
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            entity = %command.entity,
            attached = summary.attached,
            skipped = summary.skipped,
            failed = summary.failed,
            "Staged images attached"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::shared_image::application::domain::entities::{
        EntityRef, SharedImage, TemporaryImage,
    };
    use crate::shared_image::application::ports::incoming::use_cases::AddSharedImageError;
    use crate::shared_image::application::services::AddSharedImageService;
    use crate::tests::support::fixtures::shared_image;
    use crate::tests::support::in_memory_store::InMemorySharedImageStore;

    fn temp(url: &str) -> TemporaryImage {
        TemporaryImage {
            url: url.to_string(),
            filename: url.rsplit('/').next().unwrap_or(url).to_string(),
            file_size: 100,
        }
    }

    /// Fails for URLs containing "bad", records everything else.
    struct FlakyAdd {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AddSharedImageUseCase for FlakyAdd {
        async fn execute(
            &self,
            command: AddSharedImageCommand,
        ) -> Result<SharedImage, AddSharedImageError> {
            self.seen.lock().unwrap().push(command.image_url.clone());
            if command.image_url.contains("bad") {
                return Err(AddSharedImageError::RepositoryError("insert failed".into()));
            }
            Ok(shared_image(1, command.entity, &command.image_url))
        }
    }

    #[tokio::test]
    async fn test_only_referenced_images_are_registered() {
        let store = InMemorySharedImageStore::new();
        let service =
            AttachTemporaryImagesService::new(Arc::new(AddSharedImageService::new(store.clone())));

        let content = "Intro\n\n![a.jpg](https://cdn/a.jpg)\n\nMore text";
        let summary = service
            .execute(AttachTemporaryImagesCommand {
                entity: EntityRef::Blog(10),
                document_content: content.to_string(),
                images: vec![temp("https://cdn/a.jpg"), temp("https://cdn/removed.jpg")],
            })
            .await
            .unwrap();

        assert_eq!(
            summary,
            AttachmentSummary {
                attached: 1,
                skipped: 1,
                failed: 0
            }
        );
        assert_eq!(store.active_urls(EntityRef::Blog(10)), vec!["https://cdn/a.jpg"]);
    }

    #[tokio::test]
    async fn test_one_failure_does_not_stop_the_rest() {
        let add = Arc::new(FlakyAdd {
            seen: Mutex::new(Vec::new()),
        });
        let service = AttachTemporaryImagesService::new(add.clone());

        let content = "![x](https://cdn/bad.jpg)\n\n![y](https://cdn/good.jpg)";
        let summary = service
            .execute(AttachTemporaryImagesCommand {
                entity: EntityRef::Portfolio(2),
                document_content: content.to_string(),
                images: vec![temp("https://cdn/bad.jpg"), temp("https://cdn/good.jpg")],
            })
            .await
            .unwrap();

        assert_eq!(summary.attached, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(add.seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_staged_urls_registered_once() {
        let store = InMemorySharedImageStore::new();
        let service =
            AttachTemporaryImagesService::new(Arc::new(AddSharedImageService::new(store.clone())));

        let summary = service
            .execute(AttachTemporaryImagesCommand {
                entity: EntityRef::Blog(1),
                document_content: "![a](https://cdn/a.jpg)".to_string(),
                images: vec![temp("https://cdn/a.jpg"), temp("https://cdn/a.jpg")],
            })
            .await
            .unwrap();

        assert_eq!(summary.attached, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(store.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_unlinked_entity_rejected() {
        let service = AttachTemporaryImagesService::new(Arc::new(AddSharedImageService::new(
            InMemorySharedImageStore::new(),
        )));

        let result = service
            .execute(AttachTemporaryImagesCommand {
                entity: EntityRef::Unlinked,
                document_content: String::new(),
                images: vec![],
            })
            .await;

        assert_eq!(result, Err(AttachTemporaryImagesError::UnlinkedEntity));
    }
}
