use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCaptionCommand {
    pub image_id: i64,
    pub caption_vi: Option<String>,
    pub caption_en: Option<String>,
}

/// What the caption endpoint sends back. Nothing is persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionUpdateEcho {
    pub image_id: i64,
    pub caption_vi: Option<String>,
    pub caption_en: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UpdateCaptionError {
    #[error("invalid image id: {0}")]
    InvalidImageId(i64),
}

#[async_trait]
pub trait UpdateCaptionUseCase: Send + Sync {
    async fn execute(
        &self,
        command: UpdateCaptionCommand,
    ) -> Result<CaptionUpdateEcho, UpdateCaptionError>;
}
