use async_trait::async_trait;

use crate::shared_image::application::domain::entities::{EntityType, SharedImage};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SharedImageQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Invalid stored row: {0}")]
    InvalidRow(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveImageFilter {
    pub entity_type: Option<EntityType>,
    /// `Some(0)` selects legacy rows stored without an entity id.
    pub entity_id: Option<i64>,
    /// Case-insensitive substring of `original_filename`.
    pub filename_contains: Option<String>,
}

#[async_trait]
pub trait SharedImageQuery: Send + Sync {
    /// Active rows only, newest upload first.
    async fn list_active(
        &self,
        filter: ActiveImageFilter,
    ) -> Result<Vec<SharedImage>, SharedImageQueryError>;
}
