use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use std::sync::{Arc, Mutex};

use crate::shared_image::application::domain::entities::{EntityRef, EntityType, SharedImage};
use crate::shared_image::application::ports::outgoing::{
    ActiveImageFilter, NewSharedImage, SharedImageQuery, SharedImageQueryError,
    SharedImageRepository, SharedImageRepositoryError,
};

/// Shared image table held in memory, with the same active-triple upsert rule as Postgres.
#[derive(Clone, Default)]
pub struct InMemorySharedImageStore {
    rows: Arc<Mutex<Vec<SharedImage>>>,
    failure: Option<String>,
}

impl InMemorySharedImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            rows: Arc::default(),
            failure: Some(message.to_string()),
        }
    }

    pub fn rows(&self) -> Vec<SharedImage> {
        self.rows.lock().unwrap().clone()
    }

    fn switch_off(&self, entity_type: EntityType, entity: EntityRef, image_url: &str) -> u64 {
        let mut changed = 0;
        for row in self.rows.lock().unwrap().iter_mut() {
            if row.is_active
                && row.entity_type == entity_type
                && row.entity == entity
                && row.image_url == image_url
            {
                row.is_active = false;
                changed += 1;
            }
        }
        changed
    }

    pub fn active_urls(&self, entity: EntityRef) -> Vec<String> {
        self.rows()
            .into_iter()
            .filter(|r| r.is_active && r.entity == entity)
            .map(|r| r.image_url)
            .collect()
    }
}

#[async_trait]
impl SharedImageRepository for InMemorySharedImageStore {
    async fn upsert_active(
        &self,
        image: NewSharedImage,
    ) -> Result<SharedImage, SharedImageRepositoryError> {
        if let Some(msg) = &self.failure {
            return Err(SharedImageRepositoryError::DatabaseError(msg.clone()));
        }

        let entity = EntityRef::from_parts(image.entity_type, Some(image.entity_id));
        let mut rows = self.rows.lock().unwrap();

        if let Some(existing) = rows
            .iter_mut()
            .find(|r| {
                r.is_active
                    && r.entity_type == image.entity_type
                    && r.entity == entity
                    && r.image_url == image.image_url
            })
        {
            existing.original_filename = image.original_filename;
            return Ok(existing.clone());
        }

        let id = rows.len() as i64 + 1;
        let row = SharedImage {
            id,
            entity_type: image.entity_type,
            entity,
            image_url: image.image_url,
            original_filename: image.original_filename,
            file_size: image.file_size,
            uploaded_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
                + Duration::seconds(id),
            is_active: true,
            caption_vi: None,
            caption_en: None,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn deactivate(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        image_url: &str,
    ) -> Result<u64, SharedImageRepositoryError> {
        if let Some(msg) = &self.failure {
            return Err(SharedImageRepositoryError::DatabaseError(msg.clone()));
        }

        let entity = EntityRef::from_parts(entity_type, Some(entity_id));
        Ok(self.switch_off(entity_type, entity, image_url))
    }

    async fn deactivate_unlinked(
        &self,
        entity_type: EntityType,
        image_url: &str,
    ) -> Result<u64, SharedImageRepositoryError> {
        if let Some(msg) = &self.failure {
            return Err(SharedImageRepositoryError::DatabaseError(msg.clone()));
        }

        Ok(self.switch_off(entity_type, EntityRef::Unlinked, image_url))
    }
}

#[async_trait]
impl SharedImageQuery for InMemorySharedImageStore {
    async fn list_active(
        &self,
        filter: ActiveImageFilter,
    ) -> Result<Vec<SharedImage>, SharedImageQueryError> {
        if let Some(msg) = &self.failure {
            return Err(SharedImageQueryError::DatabaseError(msg.clone()));
        }

        let needle = filter.filename_contains.map(|f| f.to_lowercase());
        let mut rows: Vec<SharedImage> = self
            .rows()
            .into_iter()
            .filter(|r| r.is_active)
            .filter(|r| filter.entity_type.is_none_or(|t| r.entity_type == t))
            .filter(|r| filter.entity_id.is_none_or(|id| r.entity.id().unwrap_or(0) == id))
            .filter(|r| {
                needle
                    .as_deref()
                    .is_none_or(|n| r.original_filename.to_lowercase().contains(n))
            })
            .collect();

        rows.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(rows)
    }
}
