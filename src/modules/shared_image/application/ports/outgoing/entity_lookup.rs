use async_trait::async_trait;

use crate::shared_image::application::domain::entities::EntityType;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EntityLookupError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntitySummary {
    pub id: i64,
    pub slug: Option<String>,
    pub title: Option<String>,
}

/// Reads slugs and display titles of blog posts / portfolio projects.
#[async_trait]
pub trait EntityLookup: Send + Sync {
    async fn summaries(
        &self,
        entity_type: EntityType,
        ids: &[i64],
    ) -> Result<Vec<EntitySummary>, EntityLookupError>;
}
