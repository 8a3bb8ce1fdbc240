use async_trait::async_trait;

use crate::shared_image::application::ports::incoming::use_cases::{
    CaptionUpdateEcho, UpdateCaptionCommand, UpdateCaptionError, UpdateCaptionUseCase,
};

pub const CAPTION_NOT_PERSISTED: &str =
    "Caption update not yet implemented - database migration required";

/// Validates and echoes caption edits. Captions are not written yet.
#[derive(Debug, Clone, Default)]
pub struct UpdateCaptionService;

impl UpdateCaptionService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UpdateCaptionUseCase for UpdateCaptionService {
    async fn execute(
        &self,
        command: UpdateCaptionCommand,
    ) -> Result<CaptionUpdateEcho, UpdateCaptionError> {
        if command.image_id <= 0 {
            return Err(UpdateCaptionError::InvalidImageId(command.image_id));
        }

        tracing::info!(image_id = command.image_id, "Caption update echoed, not persisted");

        Ok(CaptionUpdateEcho {
            image_id: command.image_id,
            caption_vi: command.caption_vi,
            caption_en: command.caption_en,
            message: CAPTION_NOT_PERSISTED.to_string(),
        })
    }
}
