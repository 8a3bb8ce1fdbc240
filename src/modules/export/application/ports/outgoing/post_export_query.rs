use async_trait::async_trait;

use crate::export::application::domain::entities::ExportablePost;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PostExportQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait PostExportQuery: Send + Sync {
    /// Posts with their translations, ordered by id.
    async fn find_with_translations(
        &self,
        ids: &[i64],
    ) -> Result<Vec<ExportablePost>, PostExportQueryError>;
}
