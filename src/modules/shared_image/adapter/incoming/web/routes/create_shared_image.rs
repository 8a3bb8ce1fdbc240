use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::activity::application::domain::entities::{ActivityAction, ActivityEntry};
use crate::auth::adapter::incoming::web::extractors::auth::VerifiedUser;
use crate::shared::api::ApiResponse;
use crate::shared_image::application::ports::incoming::use_cases::{
    AddSharedImageCommand, AddSharedImageError,
};
use crate::AppState;

use super::dto::{resolve_entity, SharedImageDto};

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSharedImageRequest {
    #[serde(default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub entity_id: Option<i64>,
    /// Legacy alias of `entityType=blog` + `entityId`.
    #[serde(default)]
    pub blog_post_id: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub original_filename: Option<String>,
    #[serde(default)]
    pub file_size: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateSharedImageResponse {
    pub success: bool,
    pub image: SharedImageDto,
}

const REQUIRED_FIELDS: &str = "entityType, entityId and imageUrl are required";

#[utoipa::path(
    post,
    path = "/api/shared-images",
    tag = "shared-images",
    request_body = CreateSharedImageRequest,
    responses(
        (status = 200, description = "Image registered (or already active)", body = CreateSharedImageResponse),
        (status = 400, description = "Missing entity or image url"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Store error")
    ),
    security(("bearer_auth" = []))
)]
#[post("/api/shared-images")]
pub async fn create_shared_image_handler(
    user: VerifiedUser,
    req: web::Json<CreateSharedImageRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = req.into_inner();

    let entity = match resolve_entity(req.entity_type.as_deref(), req.entity_id, req.blog_post_id) {
        Ok(Some(entity)) => entity,
        Ok(None) => return ApiResponse::bad_request("MISSING_FIELDS", REQUIRED_FIELDS),
        Err(resp) => return resp,
    };

    let command = AddSharedImageCommand {
        entity,
        image_url: req.image_url.unwrap_or_default(),
        original_filename: req.original_filename,
        file_size: req.file_size,
    };

    match data.shared_image.add.execute(command).await {
        Ok(image) => {
            data.activity
                .record(
                    ActivityEntry::new(ActivityAction::Create, "shared_image")
                        .entity_id(image.id)
                        .details(json!({
                            "entityType": image.entity_type.as_str(),
                            "entityId": image.entity.id(),
                            "imageUrl": image.image_url,
                        }))
                        .user_id(user.user_id),
                )
                .await;

            HttpResponse::Ok().json(CreateSharedImageResponse {
                success: true,
                image: SharedImageDto::from(image),
            })
        }
        Err(AddSharedImageError::UnlinkedEntity) | Err(AddSharedImageError::MissingImageUrl) => {
            ApiResponse::bad_request("MISSING_FIELDS", REQUIRED_FIELDS)
        }
        Err(AddSharedImageError::RepositoryError(msg)) => {
            tracing::error!("Error adding shared image: {}", msg);
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;
    use std::sync::Arc;
    use uuid::Uuid;

    use crate::shared_image::application::domain::entities::EntityRef;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{bearer, token_provider};
    use crate::tests::support::in_memory_store::InMemorySharedImageStore;
    use crate::tests::support::stubs::RecordingActivityLogger;

    async fn post_json(
        store: InMemorySharedImageStore,
        logger: Arc<RecordingActivityLogger>,
        body: Value,
        verified: bool,
    ) -> (StatusCode, Value) {
        let state = TestAppStateBuilder::default()
            .with_shared_image_store(store)
            .with_activity_logger(logger)
            .build();

        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(web::Data::new(token_provider()))
                .service(create_shared_image_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/shared-images")
            .insert_header(("Authorization", bearer(Uuid::new_v4(), verified)))
            .set_json(&body)
            .to_request();

        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let bytes = test::read_body(resp).await;
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[actix_web::test]
    async fn test_create_registers_image_and_logs_activity() {
        let store = InMemorySharedImageStore::new();
        let logger = Arc::new(RecordingActivityLogger::default());

        let (status, body) = post_json(
            store.clone(),
            logger.clone(),
            json!({
                "entityType": "portfolio",
                "entityId": 4,
                "imageUrl": "https://cdn/a.jpg",
                "originalFilename": "a.jpg",
                "fileSize": 2048
            }),
            true,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["image"]["entity_type"], "portfolio");
        assert_eq!(body["image"]["entity_id"], 4);
        assert_eq!(body["image"]["file_size"], 2048);
        assert_eq!(store.active_urls(EntityRef::Portfolio(4)), vec!["https://cdn/a.jpg"]);

        let entries = logger.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, ActivityAction::Create);
        assert_eq!(entries[0].entity, "shared_image");
    }

    #[actix_web::test]
    async fn test_legacy_blog_post_id() {
        let store = InMemorySharedImageStore::new();

        let (status, _) = post_json(
            store.clone(),
            Arc::new(RecordingActivityLogger::default()),
            json!({ "blogPostId": 9, "imageUrl": "https://cdn/a.jpg" }),
            true,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(store.active_urls(EntityRef::Blog(9)), vec!["https://cdn/a.jpg"]);
        assert_eq!(store.rows()[0].original_filename, "unknown");
    }

    #[actix_web::test]
    async fn test_unsaved_entity_is_rejected() {
        let store = InMemorySharedImageStore::new();

        for body in [
            json!({ "entityType": "blog", "imageUrl": "https://cdn/a.jpg" }),
            json!({ "entityType": "blog", "entityId": 0, "imageUrl": "https://cdn/a.jpg" }),
            json!({ "imageUrl": "https://cdn/a.jpg" }),
            json!({ "entityType": "blog", "entityId": 3 }),
        ] {
            let (status, resp) = post_json(
                store.clone(),
                Arc::new(RecordingActivityLogger::default()),
                body,
                true,
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(resp["error"]["code"], "MISSING_FIELDS");
        }

        assert!(store.rows().is_empty());
    }

    #[actix_web::test]
    async fn test_store_failure_is_internal_error() {
        let logger = Arc::new(RecordingActivityLogger::default());

        let (status, _) = post_json(
            InMemorySharedImageStore::failing("db down"),
            logger.clone(),
            json!({ "entityType": "blog", "entityId": 1, "imageUrl": "https://cdn/a.jpg" }),
            true,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(logger.entries().is_empty());
    }

    #[actix_web::test]
    async fn test_unverified_user_forbidden() {
        let store = InMemorySharedImageStore::new();

        let (status, _) = post_json(
            store.clone(),
            Arc::new(RecordingActivityLogger::default()),
            json!({ "entityType": "blog", "entityId": 1, "imageUrl": "https://cdn/a.jpg" }),
            false,
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(store.rows().is_empty());
    }
}
