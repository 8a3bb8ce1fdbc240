use async_trait::async_trait;

use crate::media::application::domain::entities::{ImageTarget, IncomingImage};
use crate::media::application::domain::image_policy::ImageValidationError;
use crate::media::application::ports::incoming::use_cases::ProcessImageError;
use crate::media::application::ports::outgoing::StorageError;
use crate::shared_image::application::domain::entities::{EntityRef, SharedImage, TemporaryImage};

/// What happened to an image after it reached object storage.
#[derive(Debug, Clone, PartialEq)]
pub enum AttachmentOutcome {
    /// The entity has no id yet. The caller keeps the image until it is saved.
    Staged(TemporaryImage),
    Synced(SharedImage),
    /// Uploaded and usable, but the library row could not be written.
    SyncFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub url: String,
    pub filename: String,
    pub file_size: i64,
    pub outcome: AttachmentOutcome,
}

impl Attachment {
    pub fn is_staged(&self) -> bool {
        matches!(self.outcome, AttachmentOutcome::Staged(_))
    }

    pub fn is_synced(&self) -> bool {
        matches!(self.outcome, AttachmentOutcome::Synced(_))
    }

    pub fn temporary_image(&self) -> Option<&TemporaryImage> {
        match &self.outcome {
            AttachmentOutcome::Staged(temp) => Some(temp),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttachImageError {
    #[error(transparent)]
    Invalid(#[from] ImageValidationError),

    #[error(transparent)]
    Processing(#[from] ProcessImageError),

    #[error("Upload failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Image url is required")]
    MissingUrl,
}

/// Gets an image into a document's entity: upload when it is a file, then
/// register it in the library or stage it until the entity is saved.
#[async_trait]
pub trait AttachImageUseCase: Send + Sync {
    async fn attach_file(
        &self,
        entity: EntityRef,
        image: IncomingImage,
        target: ImageTarget,
    ) -> Result<Attachment, AttachImageError>;

    /// External URLs are neither processed nor uploaded.
    async fn attach_url(&self, entity: EntityRef, url: &str) -> Result<Attachment, AttachImageError>;
}
