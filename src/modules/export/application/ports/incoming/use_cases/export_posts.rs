use async_trait::async_trait;

use crate::export::application::domain::entities::ExportArchive;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportPostsError {
    #[error("No ids provided")]
    NoIds,

    #[error("Failed to load posts: {0}")]
    QueryError(String),

    #[error("Failed to build archive: {0}")]
    ArchiveError(String),
}

#[async_trait]
pub trait ExportPostsUseCase: Send + Sync {
    /// Bundles the posts with the given ids into one zip of Markdown files.
    /// Unknown ids are ignored.
    async fn execute(&self, ids: Vec<i64>) -> Result<ExportArchive, ExportPostsError>;
}
