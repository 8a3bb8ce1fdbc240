use async_trait::async_trait;
use chrono::Utc;
use std::io::{Cursor, Write};
use std::sync::Arc;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::export::application::domain::entities::{
    ExportArchive, ExportablePost, FetchedThumbnail,
};
use crate::export::application::domain::markdown_file::{
    archive_name, markdown_file_name, render_markdown, thumbnail_file_name, EXPORT_LANGUAGES,
};
use crate::export::application::ports::incoming::use_cases::{
    ExportPostsError, ExportPostsUseCase,
};
use crate::export::application::ports::outgoing::{PostExportQuery, ThumbnailFetcher};

struct ArchiveEntry {
    name: String,
    bytes: Vec<u8>,
}

pub struct ExportPostsService {
    query: Arc<dyn PostExportQuery + Send + Sync>,
    fetcher: Arc<dyn ThumbnailFetcher + Send + Sync>,
}

impl ExportPostsService {
    pub fn new(
        query: Arc<dyn PostExportQuery + Send + Sync>,
        fetcher: Arc<dyn ThumbnailFetcher + Send + Sync>,
    ) -> Self {
        Self { query, fetcher }
    }

    /// A failed download only drops the thumbnail, never the post.
    async fn thumbnail_of(&self, post: &ExportablePost) -> Option<FetchedThumbnail> {
        let url = post
            .thumbnail_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())?;

        match self.fetcher.fetch(url).await {
            Ok(thumbnail) => Some(thumbnail),
            Err(e) => {
                tracing::warn!(post_id = post.id, url = %url, error = %e, "Skipping thumbnail");
                None
            }
        }
    }

    async fn entries_for(&self, post: &ExportablePost) -> (Vec<ArchiveEntry>, usize) {
        let languages: Vec<_> = EXPORT_LANGUAGES
            .into_iter()
            .filter_map(|lang| post.translation(lang))
            .collect();

        if languages.is_empty() {
            tracing::debug!(post_id = post.id, "Post has no exportable translation");
            return (Vec::new(), 0);
        }

        let thumbnail = self.thumbnail_of(post).await;
        let mut entries = Vec::with_capacity(languages.len() * 2);
        let mut thumbnails = 0;

        for translation in languages {
            let thumbnail_name = thumbnail.as_ref().map(|thumb| {
                let name = thumbnail_file_name(post, translation.language, thumb.extension());
                entries.push(ArchiveEntry {
                    name: name.clone(),
                    bytes: thumb.bytes.clone(),
                });
                thumbnails += 1;
                name
            });

            entries.push(ArchiveEntry {
                name: markdown_file_name(post, translation.language),
                bytes: render_markdown(post, translation, thumbnail_name.as_deref()).into_bytes(),
            });
        }

        (entries, thumbnails)
    }
}

fn write_archive(entries: &[ArchiveEntry]) -> zip::result::ZipResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in entries {
        writer.start_file(entry.name.as_str(), options)?;
        writer.write_all(&entry.bytes)?;
    }

    Ok(writer.finish()?.into_inner())
}

#[async_trait]
impl ExportPostsUseCase for ExportPostsService {
    async fn execute(&self, ids: Vec<i64>) -> Result<ExportArchive, ExportPostsError> {
        if ids.is_empty() {
            return Err(ExportPostsError::NoIds);
        }

        let posts = self
            .query
            .find_with_translations(&ids)
            .await
            .map_err(|e| ExportPostsError::QueryError(e.to_string()))?;

        let mut entries = Vec::new();
        let mut thumbnail_files = 0;
        for post in &posts {
            let (post_entries, thumbnails) = self.entries_for(post).await;
            entries.extend(post_entries);
            thumbnail_files += thumbnails;
        }

        let bytes =
            write_archive(&entries).map_err(|e| ExportPostsError::ArchiveError(e.to_string()))?;

        let archive = ExportArchive {
            filename: archive_name(Utc::now()),
            bytes,
            markdown_files: entries.len() - thumbnail_files,
            thumbnail_files,
        };

        tracing::info!(
            requested = ids.len(),
            found = posts.len(),
            markdown_files = archive.markdown_files,
            thumbnail_files = archive.thumbnail_files,
            "Posts exported"
        );

        Ok(archive)
    }
}
