use async_trait::async_trait;

use crate::media::application::domain::entities::{
    ImageKind, ImageTarget, IncomingImage, ProcessedImage,
};
use crate::media::application::domain::image_policy::ImageValidationError;

pub const HEIC_CONVERSION_HELP: &str = "All HEIC conversion methods failed. This HEIC file appears to use an unsupported format variant. Please try converting it to JPG using your device's Photos app, or use an online converter like CloudConvert.com";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProcessImageError {
    #[error("Unsupported file type. Please use JPG, PNG, or HEIC files.")]
    UnsupportedType,

    #[error("{0}")]
    ConversionFailed(String),

    #[error("Processed image is {actual_bytes} bytes, above the {limit_bytes} byte limit")]
    ExceedsCeiling {
        limit_bytes: usize,
        actual_bytes: usize,
    },
}

#[async_trait]
pub trait ProcessImageUseCase: Send + Sync {
    fn validate(&self, image: &IncomingImage) -> Result<ImageKind, ImageValidationError>;

    /// Converts to JPEG and enforces the target's size ceiling.
    async fn process(
        &self,
        image: IncomingImage,
        target: ImageTarget,
    ) -> Result<ProcessedImage, ProcessImageError>;
}
