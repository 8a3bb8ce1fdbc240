use async_trait::async_trait;

use crate::export::application::domain::entities::FetchedThumbnail;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThumbnailFetchError {
    #[error("Invalid thumbnail request: {0}")]
    Request(String),

    #[error("Thumbnail download timed out")]
    Timeout,

    #[error("Thumbnail responded with status {0}")]
    Status(u16),

    #[error("Failed to read thumbnail body: {0}")]
    Body(String),
}

#[async_trait]
pub trait ThumbnailFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedThumbnail, ThumbnailFetchError>;
}
