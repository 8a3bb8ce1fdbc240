use actix_web::{post, web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::activity::application::domain::entities::{ActivityAction, ActivityEntry};
use crate::auth::adapter::incoming::web::extractors::auth::VerifiedUser;
use crate::editor::application::domain::markdown::image_markdown;
use crate::editor::application::ports::incoming::use_cases::{
    AttachImageError, Attachment, AttachmentOutcome,
};
use crate::media::adapter::incoming::web::routes::upload::{
    incoming_image, processing_error_response, storage_error_response, validation_error_response,
};
use crate::media::application::domain::entities::ImageTarget;
use crate::shared::api::ApiResponse;
use crate::shared_image::adapter::incoming::web::routes::{parse_id, resolve_entity};
use crate::shared_image::application::domain::entities::EntityRef;
use crate::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UploadImageParams {
    /// Original file name; `X-Filename` header is used when absent.
    pub filename: Option<String>,
    /// `editor_image` (default) or `thumbnail`
    pub target: Option<String>,
    pub entity_type: Option<String>,
    /// Absent while the post or project has not been saved yet.
    pub entity_id: Option<String>,
    pub blog_post_id: Option<String>,
    /// Caption line added under the image in the returned Markdown.
    pub caption: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageResponse {
    pub url: String,
    pub filename: String,
    pub file_size: i64,
    pub markdown: String,
    /// Kept by the client until the entity is saved, then sent to
    /// `/api/shared-images/attach-temporary`.
    pub staged: bool,
    pub synced: bool,
}

impl UploadImageResponse {
    pub(super) fn new(attachment: Attachment, caption: Option<&str>) -> Self {
        let markdown = image_markdown(&attachment.url, &attachment.filename, caption);

        Self {
            staged: attachment.is_staged(),
            synced: attachment.is_synced(),
            url: attachment.url,
            filename: attachment.filename,
            file_size: attachment.file_size,
            markdown,
        }
    }
}

/// Logs a library write made by an editor insertion.
pub(super) async fn record_synced(
    data: &AppState,
    attachment: &Attachment,
    user_id: Uuid,
    source: &str,
) {
    let AttachmentOutcome::Synced(image) = &attachment.outcome else {
        return;
    };

    data.activity
        .record(
            ActivityEntry::new(ActivityAction::Create, "shared_image")
                .entity_id(image.id)
                .details(serde_json::json!({
                    "entityType": image.entity_type.as_str(),
                    "entityId": image.entity.id(),
                    "imageUrl": image.image_url,
                    "source": source,
                }))
                .user_id(user_id),
        )
        .await;
}

#[utoipa::path(
    post,
    path = "/api/images/upload",
    tag = "editor",
    params(UploadImageParams),
    request_body(content = Vec<u8>, content_type = "application/octet-stream", description = "JPEG, PNG or HEIC bytes"),
    responses(
        (status = 200, description = "Image uploaded", body = UploadImageResponse),
        (status = 400, description = "Empty file or invalid parameters"),
        (status = 413, description = "File too large"),
        (status = 415, description = "Unsupported file type"),
        (status = 422, description = "Conversion failed"),
        (status = 502, description = "Object storage error")
    ),
    security(("bearer_auth" = []))
)]
#[post("/api/images/upload")]
pub async fn upload_image_handler(
    user: VerifiedUser,
    params: web::Query<UploadImageParams>,
    req: HttpRequest,
    body: web::Bytes,
    data: web::Data<AppState>,
) -> impl Responder {
    let params = params.into_inner();

    let target = match params.target.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        None => ImageTarget::EditorImage,
        Some(raw) => match raw.parse::<ImageTarget>() {
            Ok(target) => target,
            Err(e) => return ApiResponse::bad_request("INVALID_TARGET", &e.to_string()),
        },
    };

    let entity = match resolve_entity(
        params.entity_type.as_deref(),
        parse_id(params.entity_id.as_deref()),
        parse_id(params.blog_post_id.as_deref()),
    ) {
        Ok(entity) => entity.unwrap_or(EntityRef::Unlinked),
        Err(resp) => return resp,
    };

    let image = incoming_image(&req, params.filename, body);

    match data
        .editor
        .attach_image
        .attach_file(entity, image, target)
        .await
    {
        Ok(attachment) => {
            record_synced(&data, &attachment, user.user_id, "editor_upload").await;
            HttpResponse::Ok().json(UploadImageResponse::new(attachment, params.caption.as_deref()))
        }
        Err(AttachImageError::Invalid(e)) => validation_error_response(&e),
        Err(AttachImageError::Processing(e)) => processing_error_response(&e),
        Err(AttachImageError::Storage(e)) => storage_error_response(&e),
        Err(e @ AttachImageError::MissingUrl) => {
            ApiResponse::bad_request("MISSING_FIELDS", &e.to_string())
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

    use crate::editor::application::services::AttachmentBridge;
    use crate::media::application::domain::image_policy::ImagePolicy;
    use crate::media::application::domain::storage_config::StorageConfig;
    use crate::media::application::ports::outgoing::StorageError;
    use crate::media::application::services::{ImageProcessorService, ObjectStoreGateway};
    use crate::shared_image::application::services::AddSharedImageService;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{bearer, token_provider};
    use crate::tests::support::fixtures::{tiny_jpeg, tiny_png};
    use crate::tests::support::in_memory_object_storage::InMemoryObjectStorage;
    use crate::tests::support::in_memory_store::InMemorySharedImageStore;
    use crate::tests::support::stubs::RecordingActivityLogger;

    const BUCKET: &str = "blog-images";

    struct Harness {
        storage: InMemoryObjectStorage,
        store: InMemorySharedImageStore,
        logger: Arc<RecordingActivityLogger>,
    }

    impl Harness {
        fn new(storage: InMemoryObjectStorage) -> Self {
            Self {
                storage,
                store: InMemorySharedImageStore::new(),
                logger: Arc::new(RecordingActivityLogger::default()),
            }
        }

        async fn upload(
            &self,
            uri: &str,
            content_type: &str,
            bytes: Vec<u8>,
        ) -> (StatusCode, Value) {
            let bridge = AttachmentBridge::new(
                Arc::new(ImageProcessorService::new(ImagePolicy::default(), vec![])),
                Arc::new(ObjectStoreGateway::new(
                    Arc::new(self.storage.clone()),
                    StorageConfig::new(BUCKET, "https://storage.googleapis.com"),
                )),
                Arc::new(AddSharedImageService::new(self.store.clone())),
            );

            let state = TestAppStateBuilder::default()
                .with_attach_image(Arc::new(bridge))
                .with_activity_logger(self.logger.clone())
                .build();

            let app = test::init_service(
                App::new()
                    .app_data(state)
                    .app_data(web::Data::new(token_provider()))
                    .service(upload_image_handler),
            )
            .await;

            let req = test::TestRequest::post()
                .uri(uri)
                .insert_header(("Authorization", bearer(Uuid::new_v4(), true)))
                .insert_header(("Content-Type", content_type))
                .set_payload(bytes)
                .to_request();

            let resp = test::call_service(&app, req).await;
            let status = resp.status();
            let bytes = test::read_body(resp).await;
            (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
        }
    }

    #[actix_web::test]
    async fn test_upload_for_saved_post_is_synced() {
        let h = Harness::new(InMemoryObjectStorage::new());

        let (status, body) = h
            .upload(
                "/api/images/upload?filename=beach.png&entityType=blog&entityId=4&caption=Beach",
                "image/png",
                tiny_png(),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["synced"], true);
        assert_eq!(body["staged"], false);
        assert_eq!(body["filename"], "beach.jpg");
        let url = body["url"].as_str().unwrap();
        assert!(url.contains("/blog-images/editor/"));
        assert_eq!(
            body["markdown"],
            format!("![beach.jpg]({url})\n*Beach*")
        );
        assert_eq!(h.store.active_urls(EntityRef::Blog(4)), vec![url.to_string()]);
        assert_eq!(h.logger.entries().len(), 1);
    }

    #[actix_web::test]
    async fn test_upload_for_new_post_is_staged() {
        let h = Harness::new(InMemoryObjectStorage::new());

        let (status, body) = h
            .upload("/api/images/upload?filename=a.jpg&entityType=blog", "image/jpeg", tiny_jpeg())
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["staged"], true);
        assert_eq!(body["synced"], false);
        assert!(body["fileSize"].as_i64().unwrap() > 0);
        assert!(h.store.rows().is_empty());
        assert_eq!(h.storage.keys(BUCKET).len(), 1);
        assert!(h.logger.entries().is_empty());
    }

    #[actix_web::test]
    async fn test_unsupported_type() {
        let h = Harness::new(InMemoryObjectStorage::new());

        let (status, body) = h
            .upload("/api/images/upload?filename=doc.pdf", "application/pdf", vec![1, 2, 3])
            .await;

        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FILE_TYPE");
        assert!(h.storage.keys(BUCKET).is_empty());
    }

    #[actix_web::test]
    async fn test_empty_body() {
        let h = Harness::new(InMemoryObjectStorage::new());

        let (status, body) = h.upload("/api/images/upload?filename=a.jpg", "image/jpeg", vec![]).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "EMPTY_FILE");
    }

    #[actix_web::test]
    async fn test_invalid_target() {
        let h = Harness::new(InMemoryObjectStorage::new());

        let (status, body) = h
            .upload("/api/images/upload?target=banner", "image/jpeg", tiny_jpeg())
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_TARGET");
    }

    #[actix_web::test]
    async fn test_storage_failure_is_bad_gateway() {
        let h = Harness::new(InMemoryObjectStorage::failing_puts(StorageError::AccessDenied));

        let (status, body) = h
            .upload("/api/images/upload?filename=a.jpg&entityType=blog&entityId=1", "image/jpeg", tiny_jpeg())
            .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "STORAGE_ERROR");
        assert!(h.store.rows().is_empty());
    }
}
