use async_trait::async_trait;
use serde::Serialize;

use crate::shared_image::application::domain::entities::{EntityRef, TemporaryImage};

#[derive(Debug, Clone, PartialEq)]
pub struct AttachTemporaryImagesCommand {
    pub entity: EntityRef,
    /// Markdown body as saved.
    pub document_content: String,
    pub images: Vec<TemporaryImage>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttachmentSummary {
    pub attached: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttachTemporaryImagesError {
    #[error("entity must be saved before staged images can be attached")]
    UnlinkedEntity,
}

/// Moves images staged while an entity was new into the library once it has an id.
#[async_trait]
pub trait AttachTemporaryImagesUseCase: Send + Sync {
    async fn execute(
        &self,
        command: AttachTemporaryImagesCommand,
    ) -> Result<AttachmentSummary, AttachTemporaryImagesError>;
}
