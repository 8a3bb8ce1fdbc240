use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

use crate::export::application::domain::entities::FetchedThumbnail;
use crate::export::application::ports::outgoing::{ThumbnailFetchError, ThumbnailFetcher};

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Reads `EXPORT_THUMBNAIL_TIMEOUT_SECS`; blank, zero or unparsable values fall back to 15.
pub fn timeout_from_env() -> Duration {
    let secs = std::env::var("EXPORT_THUMBNAIL_TIMEOUT_SECS")
        .ok()
        .and_then(|v| parse_timeout_secs(&v))
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

fn parse_timeout_secs(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|s| *s > 0)
}

/// Downloads post thumbnails over plain HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpThumbnailFetcher {
    client: reqwest::Client,
}

impl HttpThumbnailFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn from_env() -> Result<Self, reqwest::Error> {
        Self::new(timeout_from_env())
    }
}

fn map_request_error(e: reqwest::Error) -> ThumbnailFetchError {
    if e.is_timeout() {
        ThumbnailFetchError::Timeout
    } else {
        ThumbnailFetchError::Request(e.to_string())
    }
}

#[async_trait]
impl ThumbnailFetcher for HttpThumbnailFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedThumbnail, ThumbnailFetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ThumbnailFetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                ThumbnailFetchError::Timeout
            } else {
                ThumbnailFetchError::Body(e.to_string())
            }
        })?;

        Ok(FetchedThumbnail {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}
