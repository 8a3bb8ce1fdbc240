use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::api::schemas::{ErrorDetail, ErrorResponse};
use crate::editor::adapter::incoming::web::routes::attach_external_image::AttachExternalImageRequest;
use crate::editor::adapter::incoming::web::routes::upload_image::UploadImageResponse;
use crate::export::adapter::incoming::web::routes::export_posts::ExportPostsRequest;
use crate::media::adapter::incoming::web::routes::replace_thumbnail::ThumbnailResponse;
use crate::media::application::domain::entities::ImageTarget;
use crate::shared_image::adapter::incoming::web::routes::attach_temporary_images::{
    AttachTemporaryImagesRequest, AttachTemporaryImagesResponse,
};
use crate::shared_image::adapter::incoming::web::routes::create_shared_image::{
    CreateSharedImageRequest, CreateSharedImageResponse,
};
use crate::shared_image::adapter::incoming::web::routes::delete_shared_image::DeleteSharedImageResponse;
use crate::shared_image::adapter::incoming::web::routes::update_shared_image_caption::{
    UpdateCaptionRequest, UpdateCaptionResponse,
};
use crate::shared_image::adapter::incoming::web::routes::{
    EntityContextDto, SharedImageDto, SharedImagesResponse,
};
use crate::shared_image::application::domain::entities::{EntityType, TemporaryImage};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog CMS API",
        version = "1.0.0",
        description = "Shared image library, image uploads and Markdown export of the bilingual blog CMS"
    ),
    paths(
        // Shared image library
        crate::shared_image::adapter::incoming::web::routes::get_shared_images_handler,
        crate::shared_image::adapter::incoming::web::routes::create_shared_image_handler,
        crate::shared_image::adapter::incoming::web::routes::delete_shared_image_handler,
        crate::shared_image::adapter::incoming::web::routes::update_shared_image_caption_handler,
        crate::shared_image::adapter::incoming::web::routes::attach_temporary_images_handler,

        // Uploads
        crate::editor::adapter::incoming::web::routes::upload_image_handler,
        crate::editor::adapter::incoming::web::routes::attach_external_image_handler,
        crate::media::adapter::incoming::web::routes::replace_thumbnail_handler,

        // Export
        crate::export::adapter::incoming::web::routes::export_posts_handler,
    ),
    components(
        schemas(
            ErrorResponse,
            ErrorDetail,

            EntityType,
            ImageTarget,
            TemporaryImage,
            SharedImageDto,
            EntityContextDto,
            SharedImagesResponse,
            CreateSharedImageRequest,
            CreateSharedImageResponse,
            DeleteSharedImageResponse,
            UpdateCaptionRequest,
            UpdateCaptionResponse,
            AttachTemporaryImagesRequest,
            AttachTemporaryImagesResponse,

            UploadImageResponse,
            AttachExternalImageRequest,
            ThumbnailResponse,

            ExportPostsRequest
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "shared-images", description = "Per-entity image library"),
        (name = "editor", description = "Image insertion from the Markdown editor"),
        (name = "media", description = "Thumbnail management"),
        (name = "export", description = "Markdown export of blog posts"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token of a verified admin"))
                        .build(),
                ),
            )
        }
    }
}
