use async_trait::async_trait;

use crate::activity::application::domain::entities::ActivityEntry;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActivityLogError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait ActivityLogger: Send + Sync {
    async fn log(&self, entry: ActivityEntry) -> Result<(), ActivityLogError>;
}
