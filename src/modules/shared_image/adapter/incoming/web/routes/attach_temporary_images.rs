use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::adapter::incoming::web::extractors::auth::VerifiedUser;
use crate::shared::api::ApiResponse;
use crate::shared_image::application::domain::entities::TemporaryImage;
use crate::shared_image::application::ports::incoming::use_cases::{
    AttachTemporaryImagesCommand, AttachTemporaryImagesError,
};
use crate::AppState;

use super::dto::resolve_entity;

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachTemporaryImagesRequest {
    #[serde(default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub entity_id: Option<i64>,
    /// Markdown body as it was saved.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub temporary_images: Vec<TemporaryImage>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttachTemporaryImagesResponse {
    pub success: bool,
    pub attached: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[utoipa::path(
    post,
    path = "/api/shared-images/attach-temporary",
    tag = "shared-images",
    request_body = AttachTemporaryImagesRequest,
    responses(
        (status = 200, description = "Per-image outcome counts", body = AttachTemporaryImagesResponse),
        (status = 400, description = "Entity missing or not saved yet"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
#[post("/api/shared-images/attach-temporary")]
pub async fn attach_temporary_images_handler(
    _user: VerifiedUser,
    req: web::Json<AttachTemporaryImagesRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = req.into_inner();

    let entity = match resolve_entity(req.entity_type.as_deref(), req.entity_id, None) {
        Ok(Some(entity)) => entity,
        Ok(None) => {
            return ApiResponse::bad_request(
                "MISSING_FIELDS",
                "entityType and entityId are required",
            )
        }
        Err(resp) => return resp,
    };

    match data
        .shared_image
        .attach_temporary
        .execute(AttachTemporaryImagesCommand {
            entity,
            document_content: req.content,
            images: req.temporary_images,
        })
        .await
    {
        Ok(summary) => HttpResponse::Ok().json(AttachTemporaryImagesResponse {
            success: true,
            attached: summary.attached,
            skipped: summary.skipped,
            failed: summary.failed,
        }),
        Err(e @ AttachTemporaryImagesError::UnlinkedEntity) => {
            ApiResponse::bad_request("UNSAVED_ENTITY", &e.to_string())
        }
    }
}
