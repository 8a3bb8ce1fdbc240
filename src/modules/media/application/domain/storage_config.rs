/// Bucket layout and public URL scheme of uploaded images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub bucket: String,
    pub public_base_url: String,
    pub editor_prefix: String,
    pub thumbnail_prefix: String,
}

impl StorageConfig {
    pub const DEFAULT_BUCKET: &'static str = "blog-images";
    pub const DEFAULT_PUBLIC_BASE_URL: &'static str = "https://storage.googleapis.com";
    pub const DEFAULT_EDITOR_PREFIX: &'static str = "editor";
    pub const DEFAULT_THUMBNAIL_PREFIX: &'static str = "thumbnails";

    pub fn new(bucket: impl Into<String>, public_base_url: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            editor_prefix: Self::DEFAULT_EDITOR_PREFIX.to_string(),
            thumbnail_prefix: Self::DEFAULT_THUMBNAIL_PREFIX.to_string(),
        }
    }

    /// Reads `STORAGE_BUCKET`, `STORAGE_PUBLIC_BASE_URL`, `EDITOR_IMAGE_PREFIX`
    /// and `THUMBNAIL_PREFIX`. Blank values fall back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::new(
            env_or("STORAGE_BUCKET", Self::DEFAULT_BUCKET),
            env_or("STORAGE_PUBLIC_BASE_URL", Self::DEFAULT_PUBLIC_BASE_URL),
        );
        config.editor_prefix = env_or("EDITOR_IMAGE_PREFIX", Self::DEFAULT_EDITOR_PREFIX);
        config.thumbnail_prefix = env_or("THUMBNAIL_PREFIX", Self::DEFAULT_THUMBNAIL_PREFIX);
        config
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
