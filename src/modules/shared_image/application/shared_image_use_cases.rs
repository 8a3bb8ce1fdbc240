use std::sync::Arc;

use crate::shared_image::application::ports::incoming::use_cases::{
    AddSharedImageUseCase, AttachTemporaryImagesUseCase, DeactivateSharedImageUseCase,
    ListSharedImagesUseCase, UpdateCaptionUseCase,
};

#[derive(Clone)]
pub struct SharedImageUseCases {
    pub add: Arc<dyn AddSharedImageUseCase + Send + Sync>,
    pub list: Arc<dyn ListSharedImagesUseCase + Send + Sync>,
    pub deactivate: Arc<dyn DeactivateSharedImageUseCase + Send + Sync>,
    pub update_caption: Arc<dyn UpdateCaptionUseCase + Send + Sync>,
    pub attach_temporary: Arc<dyn AttachTemporaryImagesUseCase + Send + Sync>,
}
