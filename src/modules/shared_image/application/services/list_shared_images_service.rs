use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::shared_image::application::domain::entities::{
    EntityContext, EntityType, SharedImage, SharedImageListing,
};
use crate::shared_image::application::ports::incoming::use_cases::{
    ListScope, ListSharedImagesError, ListSharedImagesQuery, ListSharedImagesUseCase,
};
use crate::shared_image::application::ports::outgoing::{
    ActiveImageFilter, EntityLookup, EntitySummary, SharedImageQuery,
};

pub struct ListSharedImagesService {
    query: Arc<dyn SharedImageQuery + Send + Sync>,
    lookup: Arc<dyn EntityLookup + Send + Sync>,
}

impl ListSharedImagesService {
    pub fn new(
        query: Arc<dyn SharedImageQuery + Send + Sync>,
        lookup: Arc<dyn EntityLookup + Send + Sync>,
    ) -> Self {
        Self { query, lookup }
    }

    async fn summaries_for(
        &self,
        entity_type: EntityType,
        images: &[SharedImage],
    ) -> Option<HashMap<i64, EntitySummary>> {
        let ids: Vec<i64> = images
            .iter()
            .filter(|img| img.entity_type == entity_type)
            .filter_map(|img| img.entity.id())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if ids.is_empty() {
            return Some(HashMap::new());
        }

        match self.lookup.summaries(entity_type, &ids).await {
            Ok(found) => Some(found.into_iter().map(|s| (s.id, s)).collect()),
            Err(e) => {
                tracing::warn!(
                    entity_type = %entity_type,
                    error = %e,
                    "Entity lookup failed, listing images as unlinked"
                );
                None
            }
        }
    }

    async fn enrich(&self, images: Vec<SharedImage>) -> Vec<SharedImageListing> {
        let blog = self.summaries_for(EntityType::Blog, &images).await;
        let portfolio = self.summaries_for(EntityType::Portfolio, &images).await;

        images
            .into_iter()
            .map(|image| {
                let summaries = match image.entity_type {
                    EntityType::Blog => blog.as_ref(),
                    EntityType::Portfolio => portfolio.as_ref(),
                };

                let context = match (image.entity.linked(), summaries) {
                    (Some((entity_type, id)), Some(summaries)) => {
                        let summary = summaries.get(&id);
                        EntityContext::for_entity(
                            entity_type,
                            id,
                            summary.and_then(|s| s.slug.clone()),
                            summary.and_then(|s| s.title.clone()),
                        )
                    }
                    _ => EntityContext::default(),
                };

                SharedImageListing {
                    image,
                    context: Some(context),
                }
            })
            .collect()
    }
}

fn normalize_filename(filename: Option<String>) -> Option<String> {
    filename
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
}

#[async_trait]
impl ListSharedImagesUseCase for ListSharedImagesService {
    async fn execute(
        &self,
        query: ListSharedImagesQuery,
    ) -> Result<Vec<SharedImageListing>, ListSharedImagesError> {
        let filename_contains = normalize_filename(query.filename);

        let (filter, enrich) = match query.scope {
            ListScope::Entity(entity) => {
                let Some((entity_type, entity_id)) = entity.linked() else {
                    // nothing can be attached to an unsaved item
                    return Ok(Vec::new());
                };
                let filter = ActiveImageFilter {
                    entity_type: Some(entity_type),
                    entity_id: Some(entity_id),
                    filename_contains,
                };
                (filter, false)
            }
            ListScope::All {
                entity_type,
                entity_id,
            } => {
                let filter = ActiveImageFilter {
                    entity_type,
                    entity_id,
                    filename_contains,
                };
                (filter, true)
            }
        };

        let images = self
            .query
            .list_active(filter)
            .await
            .map_err(|e| ListSharedImagesError::RepositoryError(e.to_string()))?;

        if enrich {
            return Ok(self.enrich(images).await);
        }

        Ok(images
            .into_iter()
            .map(|image| SharedImageListing {
                image,
                context: None,
            })
            .collect())
    }
}
