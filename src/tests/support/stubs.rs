use async_trait::async_trait;
use std::sync::Mutex;

use crate::activity::application::domain::entities::ActivityEntry;
use crate::activity::application::ports::outgoing::{ActivityLogError, ActivityLogger};
use crate::editor::application::ports::incoming::use_cases::{
    AttachImageError, AttachImageUseCase, Attachment,
};
use crate::export::application::domain::entities::ExportArchive;
use crate::export::application::ports::incoming::use_cases::{
    ExportPostsError, ExportPostsUseCase,
};
use crate::media::application::domain::entities::{ImageTarget, IncomingImage};
use crate::media::application::ports::incoming::use_cases::{
    ReplaceThumbnailCommand, ReplaceThumbnailError, ReplaceThumbnailUseCase, ThumbnailReplaced,
};
use crate::shared_image::application::domain::entities::{EntityRef, EntityType};
use crate::shared_image::application::ports::outgoing::{
    EntityLookup, EntityLookupError, EntitySummary,
};

/// Keeps every entry in memory so tests can assert on the activity feed.
#[derive(Default)]
pub struct RecordingActivityLogger {
    entries: Mutex<Vec<ActivityEntry>>,
}

impl RecordingActivityLogger {
    pub fn entries(&self) -> Vec<ActivityEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ActivityLogger for RecordingActivityLogger {
    async fn log(&self, entry: ActivityEntry) -> Result<(), ActivityLogError> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }
}

/// Knows nothing by default; `titled()` invents a slug `{type}-{id}` and a title for every id.
#[derive(Default)]
pub struct StubEntityLookup {
    titled: bool,
}

impl StubEntityLookup {
    pub fn titled() -> Self {
        Self { titled: true }
    }
}

#[async_trait]
impl EntityLookup for StubEntityLookup {
    async fn summaries(
        &self,
        entity_type: EntityType,
        ids: &[i64],
    ) -> Result<Vec<EntitySummary>, EntityLookupError> {
        if !self.titled {
            return Ok(Vec::new());
        }
        Ok(ids
            .iter()
            .map(|id| EntitySummary {
                id: *id,
                slug: Some(format!("{entity_type}-{id}")),
                title: Some(format!("Title {id}")),
            })
            .collect())
    }
}

pub struct StubReplaceThumbnail;

#[async_trait]
impl ReplaceThumbnailUseCase for StubReplaceThumbnail {
    async fn execute(
        &self,
        command: ReplaceThumbnailCommand,
    ) -> Result<ThumbnailReplaced, ReplaceThumbnailError> {
        Err(ReplaceThumbnailError::EntityNotFound(command.entity))
    }
}

pub struct StubAttachImage;

#[async_trait]
impl AttachImageUseCase for StubAttachImage {
    async fn attach_file(
        &self,
        _entity: EntityRef,
        _image: IncomingImage,
        _target: ImageTarget,
    ) -> Result<Attachment, AttachImageError> {
        Err(AttachImageError::MissingUrl)
    }

    async fn attach_url(
        &self,
        _entity: EntityRef,
        _url: &str,
    ) -> Result<Attachment, AttachImageError> {
        Err(AttachImageError::MissingUrl)
    }
}

pub struct StubExportPosts;

#[async_trait]
impl ExportPostsUseCase for StubExportPosts {
    async fn execute(&self, _ids: Vec<i64>) -> Result<ExportArchive, ExportPostsError> {
        Err(ExportPostsError::NoIds)
    }
}
