use chrono::{DateTime, FixedOffset};

use crate::shared_image::application::domain::entities::Language;

/// One translation of a post, as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct PostTranslation {
    pub language: Language,
    pub title: String,
    pub summary: Option<String>,
    pub content: Option<String>,
}

/// A blog post with all of its translations, ready to be written out.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportablePost {
    pub id: i64,
    pub slug: String,
    pub published_at: Option<DateTime<FixedOffset>>,
    pub thumbnail_url: Option<String>,
    pub translations: Vec<PostTranslation>,
}

impl ExportablePost {
    pub fn translation(&self, language: Language) -> Option<&PostTranslation> {
        self.translations.iter().find(|t| t.language == language)
    }
}

/// Downloaded thumbnail bytes plus the response content type.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedThumbnail {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl FetchedThumbnail {
    /// `.png` and `.webp` are recognised, everything else is written as `.jpg`.
    pub fn extension(&self) -> &'static str {
        let content_type = self
            .content_type
            .as_deref()
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.contains("png") {
            ".png"
        } else if content_type.contains("webp") {
            ".webp"
        } else {
            ".jpg"
        }
    }
}

/// Finished zip, held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArchive {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub markdown_files: usize,
    pub thumbnail_files: usize,
}
