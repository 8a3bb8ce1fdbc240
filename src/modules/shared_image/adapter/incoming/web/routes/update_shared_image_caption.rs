use actix_web::{put, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::adapter::incoming::web::extractors::auth::VerifiedUser;
use crate::shared::api::ApiResponse;
use crate::shared_image::application::ports::incoming::use_cases::{
    UpdateCaptionCommand, UpdateCaptionError,
};
use crate::AppState;

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCaptionRequest {
    #[serde(default)]
    pub image_id: Option<i64>,
    #[serde(default)]
    pub caption_vi: Option<String>,
    #[serde(default)]
    pub caption_en: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCaptionResponse {
    pub success: bool,
    pub message: String,
    pub image_id: i64,
    pub caption_vi: Option<String>,
    pub caption_en: Option<String>,
}

/// Captions are echoed back, not stored.
#[utoipa::path(
    put,
    path = "/api/shared-images",
    tag = "shared-images",
    request_body = UpdateCaptionRequest,
    responses(
        (status = 200, description = "Request echoed, nothing persisted", body = UpdateCaptionResponse),
        (status = 400, description = "Missing or invalid imageId"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
#[put("/api/shared-images")]
pub async fn update_shared_image_caption_handler(
    _user: VerifiedUser,
    req: web::Json<UpdateCaptionRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = req.into_inner();

    let Some(image_id) = req.image_id else {
        return ApiResponse::bad_request("MISSING_IMAGE_ID", "imageId is required");
    };

    match data
        .shared_image
        .update_caption
        .execute(UpdateCaptionCommand {
            image_id,
            caption_vi: req.caption_vi,
            caption_en: req.caption_en,
        })
        .await
    {
        Ok(echo) => HttpResponse::Ok().json(UpdateCaptionResponse {
            success: true,
            message: echo.message,
            image_id: echo.image_id,
            caption_vi: echo.caption_vi,
            caption_en: echo.caption_en,
        }),
        Err(e @ UpdateCaptionError::InvalidImageId(_)) => {
            ApiResponse::bad_request("MISSING_IMAGE_ID", &e.to_string())
        }
    }
}
