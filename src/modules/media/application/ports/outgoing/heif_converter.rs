use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Jpeg,
    Png,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeifConversionError {
    #[error("HEIF converter unavailable: {0}")]
    Unavailable(String),

    #[error("HEIF conversion failed: {0}")]
    Failed(String),
}

/// External HEIF/HEIC decoder. Returns the encoded raster bytes.
#[async_trait]
pub trait HeifConverter: Send + Sync {
    async fn convert(
        &self,
        input: &[u8],
        format: RasterFormat,
        quality: u8,
    ) -> Result<Vec<u8>, HeifConversionError>;
}
