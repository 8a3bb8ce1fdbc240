use actix_web::{put, web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::activity::application::domain::entities::{ActivityAction, ActivityEntry};
use crate::auth::adapter::incoming::web::extractors::auth::VerifiedUser;
use crate::media::application::ports::incoming::use_cases::{
    ReplaceThumbnailCommand, ReplaceThumbnailError,
};
use crate::shared::api::ApiResponse;
use crate::shared_image::application::domain::entities::{EntityRef, EntityType};
use crate::AppState;

use super::upload::{
    incoming_image, processing_error_response, storage_error_response, validation_error_response,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ThumbnailUploadQuery {
    /// Original file name; `X-Filename` header is used when absent.
    pub filename: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailResponse {
    pub success: bool,
    pub thumbnail_url: String,
}

fn activity_entity(entity_type: EntityType) -> &'static str {
    match entity_type {
        EntityType::Blog => "blog_post",
        EntityType::Portfolio => "portfolio_project",
    }
}

#[utoipa::path(
    put,
    path = "/api/admin/{entity_type}/{id}/thumbnail",
    tag = "media",
    params(
        ("entity_type" = String, Path, description = "`blog` or `portfolio`"),
        ("id" = i64, Path, description = "Entity id"),
        ThumbnailUploadQuery
    ),
    request_body(content = Vec<u8>, content_type = "application/octet-stream", description = "JPEG, PNG or HEIC bytes"),
    responses(
        (status = 200, description = "Thumbnail replaced", body = ThumbnailResponse),
        (status = 400, description = "Invalid entity or empty file"),
        (status = 404, description = "Entity not found"),
        (status = 413, description = "File too large"),
        (status = 415, description = "Unsupported file type"),
        (status = 422, description = "Conversion failed"),
        (status = 502, description = "Object storage error")
    ),
    security(("bearer_auth" = []))
)]
#[put("/api/admin/{entity_type}/{id}/thumbnail")]
pub async fn replace_thumbnail_handler(
    user: VerifiedUser,
    path: web::Path<(String, i64)>,
    query: web::Query<ThumbnailUploadQuery>,
    req: HttpRequest,
    body: web::Bytes,
    data: web::Data<AppState>,
) -> impl Responder {
    let (raw_type, id) = path.into_inner();

    let entity_type = match raw_type.parse::<EntityType>() {
        Ok(t) => t,
        Err(e) => return ApiResponse::bad_request("INVALID_ENTITY_TYPE", &e.to_string()),
    };
    let entity = EntityRef::from_parts(entity_type, Some(id));

    let image = incoming_image(&req, query.into_inner().filename, body);
    let original_filename = image.filename.clone();

    match data
        .media
        .replace_thumbnail
        .execute(ReplaceThumbnailCommand { entity, image })
        .await
    {
        Ok(replaced) => {
            data.activity
                .record(
                    ActivityEntry::new(ActivityAction::Update, activity_entity(entity_type))
                        .entity_id(id)
                        .details(json!({
                            "field": "thumbnail_url",
                            "thumbnailUrl": replaced.thumbnail_url,
                            "previousUrl": replaced.previous_url,
                            "originalFilename": original_filename,
                        }))
                        .user_id(user.user_id),
                )
                .await;

            HttpResponse::Ok().json(ThumbnailResponse {
                success: true,
                thumbnail_url: replaced.thumbnail_url,
            })
        }
        Err(e) => map_error(e),
    }
}

fn map_error(e: ReplaceThumbnailError) -> HttpResponse {
    match &e {
        ReplaceThumbnailError::UnlinkedEntity => {
            ApiResponse::bad_request("INVALID_ENTITY_ID", &e.to_string())
        }
        ReplaceThumbnailError::EntityNotFound(_) => {
            ApiResponse::not_found("ENTITY_NOT_FOUND", &e.to_string())
        }
        ReplaceThumbnailError::Invalid(v) => validation_error_response(v),
        ReplaceThumbnailError::Processing(p) => processing_error_response(p),
        ReplaceThumbnailError::Storage(s) => storage_error_response(s),
        ReplaceThumbnailError::RepositoryError(msg) => {
            tracing::error!("Repository error replacing thumbnail: {}", msg);
            ApiResponse::internal_error()
        }
    }
}
