use crate::media::application::domain::entities::{ImageKind, ImageTarget, IncomingImage};

const MB: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageValidationError {
    #[error("File is empty")]
    Empty,

    #[error("File size too large. Maximum size is {} MB.", .max_bytes / MB)]
    TooLarge { max_bytes: usize, actual_bytes: usize },

    #[error("Unsupported file type '{0}'. Please use JPG, PNG, or HEIC files.")]
    UnsupportedType(String),
}

/// Size limits of the image pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePolicy {
    pub max_upload_bytes: usize,
    /// Size JPEG/PNG compression aims for.
    pub compression_target_bytes: usize,
    pub thumbnail_ceiling_bytes: usize,
    pub editor_image_ceiling_bytes: usize,
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self {
            max_upload_bytes: 50 * MB,
            compression_target_bytes: 3 * MB,
            thumbnail_ceiling_bytes: 3 * MB,
            editor_image_ceiling_bytes: 5 * MB,
        }
    }
}

impl ImagePolicy {
    pub const ACCEPTED_CONTENT_TYPES: &'static [&'static str] =
        &["image/jpeg", "image/jpg", "image/png", "image/heic"];

    pub fn ceiling(&self, target: ImageTarget) -> usize {
        match target {
            ImageTarget::Thumbnail => self.thumbnail_ceiling_bytes,
            ImageTarget::EditorImage => self.editor_image_ceiling_bytes,
        }
    }

    /// Cheap checks that run before any conversion or network call.
    pub fn validate(&self, image: &IncomingImage) -> Result<ImageKind, ImageValidationError> {
        if image.bytes.is_empty() {
            return Err(ImageValidationError::Empty);
        }

        if image.size() > self.max_upload_bytes {
            return Err(ImageValidationError::TooLarge {
                max_bytes: self.max_upload_bytes,
                actual_bytes: image.size(),
            });
        }

        image
            .kind()
            .ok_or_else(|| ImageValidationError::UnsupportedType(image.content_type.clone()))
    }
}
