use std::sync::Arc;

use crate::media::application::ports::incoming::use_cases::ReplaceThumbnailUseCase;

#[derive(Clone)]
pub struct MediaUseCases {
    pub replace_thumbnail: Arc<dyn ReplaceThumbnailUseCase + Send + Sync>,
}
