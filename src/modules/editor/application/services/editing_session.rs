use std::sync::Arc;
use tokio::sync::Mutex;

use crate::editor::application::domain::document::MarkdownDocument;
use crate::editor::application::domain::markdown::image_markdown;
use crate::editor::application::ports::incoming::use_cases::{
    AttachImageError, AttachImageUseCase, Attachment,
};
use crate::media::application::domain::entities::{ImageTarget, IncomingImage};
use crate::shared_image::application::domain::entities::{
    EntityRef, EntityType, ImageCaptions, Language, TemporaryImage,
};
use crate::shared_image::application::ports::incoming::use_cases::{
    AttachTemporaryImagesCommand, AttachTemporaryImagesError, AttachTemporaryImagesUseCase,
    AttachmentSummary,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditingSessionError {
    #[error("invalid entity id: {0}")]
    InvalidEntityId(i64),

    #[error(transparent)]
    Attach(#[from] AttachTemporaryImagesError),
}

struct SessionState {
    entity: EntityRef,
    document: MarkdownDocument,
    staged: Vec<TemporaryImage>,
}

/// One open editor: the document, its cursor and the images staged while
/// the entity has no id.
///
/// Every mutation goes through one async lock that is held across the
/// bridge call, so concurrent insertions land in the order they acquired it.
///
/// Not mounted on an HTTP route: browser editors keep this state client-side
/// and call `/api/images/upload`, `/api/images/external` and
/// `/api/shared-images/attach-temporary` step by step. This type drives the
/// same steps for in-process callers.
pub struct EditingSession {
    entity_type: EntityType,
    language: Language,
    bridge: Arc<dyn AttachImageUseCase + Send + Sync>,
    attach_temporary: Arc<dyn AttachTemporaryImagesUseCase + Send + Sync>,
    state: Mutex<SessionState>,
}

impl EditingSession {
    pub fn new(
        entity_type: EntityType,
        entity_id: Option<i64>,
        language: Language,
        content: impl Into<String>,
        bridge: Arc<dyn AttachImageUseCase + Send + Sync>,
        attach_temporary: Arc<dyn AttachTemporaryImagesUseCase + Send + Sync>,
    ) -> Self {
        Self {
            entity_type,
            language,
            bridge,
            attach_temporary,
            state: Mutex::new(SessionState {
                entity: EntityRef::from_parts(entity_type, entity_id),
                document: MarkdownDocument::new(content),
                staged: Vec::new(),
            }),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub async fn entity(&self) -> EntityRef {
        self.state.lock().await.entity
    }

    pub async fn content(&self) -> String {
        self.state.lock().await.document.content().to_string()
    }

    pub async fn staged(&self) -> Vec<TemporaryImage> {
        self.state.lock().await.staged.clone()
    }

    pub async fn set_cursor(&self, position: usize) {
        self.state.lock().await.document.set_cursor(position);
    }

    /// Uploads `image` and inserts it at the cursor.
    pub async fn insert_uploaded_image(
        &self,
        image: IncomingImage,
        captions: &ImageCaptions,
    ) -> Result<Attachment, AttachImageError> {
        let mut state = self.state.lock().await;

        let attachment = self
            .bridge
            .attach_file(state.entity, image, ImageTarget::EditorImage)
            .await?;

        self.insert_attachment(&mut state, &attachment, captions);
        Ok(attachment)
    }

    /// Inserts an external image by URL. Nothing is uploaded.
    pub async fn insert_external_image(
        &self,
        url: &str,
        captions: &ImageCaptions,
    ) -> Result<Attachment, AttachImageError> {
        let mut state = self.state.lock().await;

        let attachment = self.bridge.attach_url(state.entity, url).await?;

        self.insert_attachment(&mut state, &attachment, captions);
        Ok(attachment)
    }

    /// Inserts an image that is already in the shared library.
    pub async fn insert_from_library(&self, url: &str, alt: &str, caption: Option<&str>) {
        let mut state = self.state.lock().await;
        state.document.insert_block(&image_markdown(url, alt, caption));
    }

    /// Links the session to the saved entity and registers every staged
    /// image the document still references.
    pub async fn mark_persisted(
        &self,
        entity_id: i64,
    ) -> Result<AttachmentSummary, EditingSessionError> {
        let entity = EntityRef::from_parts(self.entity_type, Some(entity_id));
        if !entity.is_persisted() {
            return Err(EditingSessionError::InvalidEntityId(entity_id));
        }

        let mut state = self.state.lock().await;
        state.entity = entity;

        let summary = self
            .attach_temporary
            .execute(AttachTemporaryImagesCommand {
                entity,
                document_content: state.document.content().to_string(),
                images: state.staged.clone(),
            })
            .await?;

        state.staged.clear();
        Ok(summary)
    }

    fn insert_attachment(
        &self,
        state: &mut SessionState,
        attachment: &Attachment,
        captions: &ImageCaptions,
    ) {
        let caption = captions.for_language(self.language);
        state
            .document
            .insert_block(&image_markdown(&attachment.url, &attachment.filename, caption));

        if let Some(temp) = attachment.temporary_image() {
            state.staged.push(temp.clone());
        }
    }
}
