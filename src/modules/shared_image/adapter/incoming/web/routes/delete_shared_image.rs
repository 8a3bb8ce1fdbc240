use actix_web::{delete, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::activity::application::domain::entities::{ActivityAction, ActivityEntry};
use crate::auth::adapter::incoming::web::extractors::auth::VerifiedUser;
use crate::shared::api::ApiResponse;
use crate::shared_image::application::ports::incoming::use_cases::{
    DeactivateSharedImageError, DeactivationTarget,
};
use crate::AppState;

use super::dto::{parse_id, resolve_deactivation_target};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DeleteSharedImageParams {
    pub entity_type: Option<String>,
    /// `0` targets legacy rows stored without an entity.
    pub entity_id: Option<String>,
    /// Legacy alias of `entityType=blog&entityId=`.
    pub blog_post_id: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteSharedImageResponse {
    pub success: bool,
}

const REQUIRED_FIELDS: &str = "entityType, entityId and imageUrl are required";

#[utoipa::path(
    delete,
    path = "/api/shared-images",
    tag = "shared-images",
    params(DeleteSharedImageParams),
    responses(
        (status = 200, description = "Image deactivated, or was not active", body = DeleteSharedImageResponse),
        (status = 400, description = "Missing entity or image url, or negative entity id"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Store error")
    ),
    security(("bearer_auth" = []))
)]
#[delete("/api/shared-images")]
pub async fn delete_shared_image_handler(
    user: VerifiedUser,
    params: web::Query<DeleteSharedImageParams>,
    data: web::Data<AppState>,
) -> impl Responder {
    let params = params.into_inner();

    let entity_id = parse_id(params.entity_id.as_deref());
    let blog_post_id = parse_id(params.blog_post_id.as_deref());
    let image_url = params.image_url.unwrap_or_default();

    let target = match resolve_deactivation_target(
        params.entity_type.as_deref(),
        entity_id,
        blog_post_id,
    ) {
        Ok(Some(target)) => target,
        Ok(None) => return ApiResponse::bad_request("MISSING_FIELDS", REQUIRED_FIELDS),
        Err(resp) => return resp,
    };

    let (entity_type, owner_id) = match target {
        DeactivationTarget::Entity(entity) => (entity.entity_type(), entity.id()),
        DeactivationTarget::Unlinked(entity_type) => (Some(entity_type), None),
    };

    match data.shared_image.deactivate.execute(target, &image_url).await {
        Ok(changed) => {
            if changed > 0 {
                data.activity
                    .record(
                        ActivityEntry::new(ActivityAction::Delete, "shared_image")
                            .details(json!({
                                "entityType": entity_type.map(|t| t.as_str()),
                                "entityId": owner_id,
                                "imageUrl": image_url.trim(),
                                "deactivated": changed,
                            }))
                            .user_id(user.user_id),
                    )
                    .await;
            }

            HttpResponse::Ok().json(DeleteSharedImageResponse { success: true })
        }
        Err(DeactivateSharedImageError::MissingImageUrl) => {
            ApiResponse::bad_request("MISSING_FIELDS", REQUIRED_FIELDS)
        }
        Err(DeactivateSharedImageError::RepositoryError(msg)) => {
            tracing::error!("Error removing shared image: {}", msg);
            ApiResponse::internal_error()
        }
    }
}
