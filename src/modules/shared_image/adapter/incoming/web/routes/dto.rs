use actix_web::HttpResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::shared::api::ApiResponse;
use crate::shared_image::application::domain::entities::{
    EntityContext, EntityRef, EntityType, SharedImage, SharedImageListing,
};
use crate::shared_image::application::ports::incoming::use_cases::DeactivationTarget;

/// Library row as stored, snake_case on the wire.
#[derive(Debug, Serialize, ToSchema)]
pub struct SharedImageDto {
    pub id: i64,
    pub entity_type: EntityType,
    pub entity_id: Option<i64>,
    pub image_url: String,
    pub original_filename: String,
    pub file_size: i64,
    pub uploaded_at: DateTime<Utc>,
    pub is_active: bool,
    pub caption_vi: Option<String>,
    pub caption_en: Option<String>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    #[schema(inline)]
    pub context: Option<EntityContextDto>,
}

/// Present on admin (`scope=all`) listings only.
#[derive(Debug, Serialize, ToSchema)]
pub struct EntityContextDto {
    pub entity_slug: Option<String>,
    pub entity_title: Option<String>,
    pub public_url: Option<String>,
    pub admin_url: Option<String>,
}

impl From<EntityContext> for EntityContextDto {
    fn from(c: EntityContext) -> Self {
        Self {
            entity_slug: c.entity_slug,
            entity_title: c.entity_title,
            public_url: c.public_url,
            admin_url: c.admin_url,
        }
    }
}

impl From<SharedImage> for SharedImageDto {
    fn from(image: SharedImage) -> Self {
        Self {
            id: image.id,
            entity_type: image.entity_type,
            entity_id: image.entity.id(),
            image_url: image.image_url,
            original_filename: image.original_filename,
            file_size: image.file_size,
            uploaded_at: image.uploaded_at,
            is_active: image.is_active,
            caption_vi: image.caption_vi,
            caption_en: image.caption_en,
            context: None,
        }
    }
}

impl From<SharedImageListing> for SharedImageDto {
    fn from(listing: SharedImageListing) -> Self {
        let mut dto = SharedImageDto::from(listing.image);
        dto.context = listing.context.map(EntityContextDto::from);
        dto
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SharedImagesResponse {
    pub images: Vec<SharedImageDto>,
}

/// Lenient id parsing for query strings: blank or non-numeric means absent.
pub fn parse_id(raw: Option<&str>) -> Option<i64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<i64>().ok())
}

/// `entityType`, falling back to `blog` when only the legacy `blogPostId` is given.
fn resolve_entity_type(
    entity_type: Option<&str>,
    blog_post_id: Option<i64>,
) -> Result<Option<EntityType>, HttpResponse> {
    match entity_type.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => raw
            .parse::<EntityType>()
            .map(Some)
            .map_err(|e| ApiResponse::bad_request("INVALID_ENTITY_TYPE", &e.to_string())),
        None if blog_post_id.is_some() => Ok(Some(EntityType::Blog)),
        None => Ok(None),
    }
}

/// Resolves `entityType`/`entityId` plus the legacy `blogPostId` alias.
///
/// `Ok(None)` means no entity type was given at all.
pub fn resolve_entity(
    entity_type: Option<&str>,
    entity_id: Option<i64>,
    blog_post_id: Option<i64>,
) -> Result<Option<EntityRef>, HttpResponse> {
    let Some(entity_type) = resolve_entity_type(entity_type, blog_post_id)? else {
        return Ok(None);
    };

    Ok(Some(EntityRef::from_parts(
        entity_type,
        entity_id.or(blog_post_id),
    )))
}

/// Like `resolve_entity`, but an explicit id of `0` addresses the legacy rows
/// stored without an entity. `Ok(None)` means the type or the id is missing.
pub fn resolve_deactivation_target(
    entity_type: Option<&str>,
    entity_id: Option<i64>,
    blog_post_id: Option<i64>,
) -> Result<Option<DeactivationTarget>, HttpResponse> {
    let Some(entity_type) = resolve_entity_type(entity_type, blog_post_id)? else {
        return Ok(None);
    };

    match entity_id.or(blog_post_id) {
        None => Ok(None),
        Some(0) => Ok(Some(DeactivationTarget::Unlinked(entity_type))),
        Some(id) if id < 0 => Err(ApiResponse::bad_request(
            "INVALID_ENTITY_ID",
            &format!("entityId must not be negative, got {id}"),
        )),
        Some(id) => Ok(Some(DeactivationTarget::Entity(EntityRef::from_parts(
            entity_type,
            Some(id),
        )))),
    }
}
