use async_trait::async_trait;

use crate::media::application::domain::entities::{
    jpeg_filename, ImageKind, ImageTarget, IncomingImage, ProcessedImage,
};
use crate::media::application::domain::image_policy::{ImagePolicy, ImageValidationError};
use crate::media::application::ports::incoming::use_cases::{
    ProcessImageError, ProcessImageUseCase, HEIC_CONVERSION_HELP,
};
use crate::media::application::services::compression::{compress_to_jpeg, decode};
use crate::media::application::services::heic_strategies::ConversionStrategy;

pub struct ImageProcessorService {
    policy: ImagePolicy,
    heic_strategies: Vec<Box<dyn ConversionStrategy>>,
}

impl ImageProcessorService {
    pub fn new(policy: ImagePolicy, heic_strategies: Vec<Box<dyn ConversionStrategy>>) -> Self {
        Self {
            policy,
            heic_strategies,
        }
    }

    async fn convert_heic(
        &self,
        image: &IncomingImage,
    ) -> Result<(Vec<u8>, &'static str), ProcessImageError> {
        for strategy in &self.heic_strategies {
            match strategy.convert(&image.bytes).await {
                Ok(bytes) => {
                    tracing::info!(
                        filename = %image.filename,
                        strategy = strategy.name(),
                        "HEIC converted"
                    );
                    return Ok((bytes, strategy.name()));
                }
                Err(e) => {
                    tracing::warn!(
                        filename = %image.filename,
                        strategy = strategy.name(),
                        error = %e,
                        "HEIC strategy failed, trying next"
                    );
                }
            }
        }

        tracing::error!(filename = %image.filename, "All HEIC strategies failed");
        Err(ProcessImageError::ConversionFailed(
            HEIC_CONVERSION_HELP.to_string(),
        ))
    }

    async fn compress(&self, bytes: Vec<u8>) -> Result<Vec<u8>, ProcessImageError> {
        let target = self.policy.compression_target_bytes;
        tokio::task::spawn_blocking(move || {
            let img = decode(&bytes)?;
            compress_to_jpeg(img, target)
        })
        .await
        .map_err(|e| ProcessImageError::ConversionFailed(format!("Image task failed: {e}")))?
        .map_err(ProcessImageError::ConversionFailed)
    }
}

#[async_trait]
impl ProcessImageUseCase for ImageProcessorService {
    fn validate(&self, image: &IncomingImage) -> Result<ImageKind, ImageValidationError> {
        self.policy.validate(image)
    }

    async fn process(
        &self,
        image: IncomingImage,
        target: ImageTarget,
    ) -> Result<ProcessedImage, ProcessImageError> {
        let kind = image.kind().ok_or(ProcessImageError::UnsupportedType)?;

        let (bytes, strategy) = match kind {
            ImageKind::Heic => {
                let (converted, strategy) = self.convert_heic(&image).await?;
                // converter output is already JPEG, only re-compress when it is heavy
                let bytes = if converted.len() > self.policy.compression_target_bytes {
                    self.compress(converted).await?
                } else {
                    converted
                };
                (bytes, Some(strategy))
            }
            ImageKind::Jpeg | ImageKind::Png => (self.compress(image.bytes).await?, None),
        };

        let limit = self.policy.ceiling(target);
        if bytes.len() > limit {
            tracing::warn!(
                filename = %image.filename,
                target = %target,
                size = bytes.len(),
                limit,
                "Processed image still above ceiling"
            );
            return Err(ProcessImageError::ExceedsCeiling {
                limit_bytes: limit,
                actual_bytes: bytes.len(),
            });
        }

        Ok(ProcessedImage {
            filename: jpeg_filename(&image.filename),
            bytes,
            strategy,
        })
    }
}
