use std::sync::Arc;

use crate::editor::application::ports::incoming::use_cases::AttachImageUseCase;

#[derive(Clone)]
pub struct EditorUseCases {
    pub attach_image: Arc<dyn AttachImageUseCase + Send + Sync>,
}
