use std::sync::Arc;

use crate::export::application::ports::incoming::use_cases::ExportPostsUseCase;

#[derive(Clone)]
pub struct ExportUseCases {
    pub export_posts: Arc<dyn ExportPostsUseCase + Send + Sync>,
}
