use actix_web::http::header;
use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::activity::application::domain::entities::{ActivityAction, ActivityEntry};
use crate::auth::adapter::incoming::web::extractors::auth::VerifiedUser;
use crate::export::application::ports::incoming::use_cases::ExportPostsError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ExportPostsRequest {
    #[serde(default)]
    pub ids: Vec<i64>,
}

#[utoipa::path(
    post,
    path = "/api/export-posts",
    tag = "export",
    request_body = ExportPostsRequest,
    responses(
        (status = 200, description = "Zip of Markdown files", content_type = "application/zip", body = Vec<u8>),
        (status = 400, description = "No ids provided"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Query or archive error")
    ),
    security(("bearer_auth" = []))
)]
#[post("/api/export-posts")]
pub async fn export_posts_handler(
    user: VerifiedUser,
    req: web::Json<ExportPostsRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let ids = req.into_inner().ids;

    match data.export.export_posts.execute(ids.clone()).await {
        Ok(archive) => {
            data.activity
                .record(
                    ActivityEntry::new(ActivityAction::Export, "blog_post")
                        .details(json!({
                            "ids": ids,
                            "archive": archive.filename,
                            "markdownFiles": archive.markdown_files,
                        }))
                        .user_id(user.user_id),
                )
                .await;

            HttpResponse::Ok()
                .content_type("application/zip")
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", archive.filename),
                ))
                .body(archive.bytes)
        }
        Err(e @ ExportPostsError::NoIds) => ApiResponse::bad_request("NO_IDS", &e.to_string()),
        Err(e) => {
            tracing::error!("Error exporting posts: {}", e);
            ApiResponse::internal_error()
        }
    }
}
