use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::adapter::incoming::web::extractors::auth::VerifiedUser;
use crate::editor::application::ports::incoming::use_cases::AttachImageError;
use crate::shared::api::ApiResponse;
use crate::shared_image::adapter::incoming::web::routes::resolve_entity;
use crate::shared_image::application::domain::entities::EntityRef;
use crate::AppState;

use super::upload_image::{record_synced, UploadImageResponse};

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachExternalImageRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub entity_type: Option<String>,
    /// Absent while the post or project has not been saved yet.
    #[serde(default)]
    pub entity_id: Option<i64>,
    #[serde(default)]
    pub blog_post_id: Option<i64>,
    #[serde(default)]
    pub caption: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/images/external",
    tag = "editor",
    request_body = AttachExternalImageRequest,
    responses(
        (status = 200, description = "Image referenced by URL", body = UploadImageResponse),
        (status = 400, description = "Missing url or invalid entity"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
#[post("/api/images/external")]
pub async fn attach_external_image_handler(
    user: VerifiedUser,
    req: web::Json<AttachExternalImageRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = req.into_inner();

    let entity = match resolve_entity(req.entity_type.as_deref(), req.entity_id, req.blog_post_id) {
        Ok(entity) => entity.unwrap_or(EntityRef::Unlinked),
        Err(resp) => return resp,
    };

    let url = req.url.unwrap_or_default();

    match data.editor.attach_image.attach_url(entity, &url).await {
        Ok(attachment) => {
            record_synced(&data, &attachment, user.user_id, "editor_external").await;
            HttpResponse::Ok().json(UploadImageResponse::new(attachment, req.caption.as_deref()))
        }
        Err(e @ AttachImageError::MissingUrl) => {
            ApiResponse::bad_request("MISSING_FIELDS", &e.to_string())
        }
        Err(e) => {
            tracing::error!("Error attaching external image: {}", e);
            ApiResponse::internal_error()
        }
    }
}
