pub mod api;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::activity;
pub use modules::auth;
pub use modules::editor;
pub use modules::export;
pub use modules::media;
pub use modules::shared_image;

use crate::activity::adapter::outgoing::ActivityLoggerPostgres;
use crate::activity::application::services::ActivityRecorder;
use crate::api::openapi::ApiDoc;
use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::application::ports::outgoing::token_provider::TokenProvider;
use crate::editor::application::services::AttachmentBridge;
use crate::editor::application::EditorUseCases;
use crate::export::adapter::outgoing::{HttpThumbnailFetcher, PostExportQueryPostgres};
use crate::export::application::services::ExportPostsService;
use crate::export::application::ExportUseCases;
use crate::media::adapter::incoming::web::routes::upload::MAX_RAW_UPLOAD_BYTES;
use crate::media::adapter::outgoing::{GcsObjectStorage, MagickHeifConverter, ThumbnailOwnerPostgres};
use crate::media::application::domain::image_policy::ImagePolicy;
use crate::media::application::domain::storage_config::StorageConfig;
use crate::media::application::services::{
    default_heic_strategies, ImageProcessorService, ObjectStoreGateway, ReplaceThumbnailService,
};
use crate::media::application::MediaUseCases;
use crate::shared::api::custom_json_config;
use crate::shared_image::adapter::outgoing::entity_lookup_postgres::EntityLookupPostgres;
use crate::shared_image::adapter::outgoing::shared_image_query_postgres::SharedImageQueryPostgres;
use crate::shared_image::adapter::outgoing::shared_image_repository_postgres::SharedImageRepositoryPostgres;
use crate::shared_image::application::ports::incoming::use_cases::AddSharedImageUseCase;
use crate::shared_image::application::services::{
    AddSharedImageService, AttachTemporaryImagesService, DeactivateSharedImageService,
    ListSharedImagesService, UpdateCaptionService,
};
use crate::shared_image::application::SharedImageUseCases;

use actix_web::{web, App, HttpServer};
use sea_orm::{ConnectOptions, Database};
use std::env;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub shared_image: SharedImageUseCases,
    pub media: MediaUseCases,
    pub editor: EditorUseCases,
    pub export: ExportUseCases,
    pub activity: ActivityRecorder,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Try .env.{environment} first, then fall back to .env
    let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let server_url = format!("{host}:{port}");

    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(20)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let db_arc = Arc::new(Database::connect(opt).await?);

    // Object store and image pipeline
    let storage_config = StorageConfig::from_env();
    info!(bucket = %storage_config.bucket, "Using object storage bucket");
    let gateway = Arc::new(ObjectStoreGateway::new(
        Arc::new(GcsObjectStorage::new()),
        storage_config,
    ));
    let processor = Arc::new(ImageProcessorService::new(
        ImagePolicy::default(),
        default_heic_strategies(Arc::new(MagickHeifConverter::from_env())),
    ));

    // Shared image library
    let repository = SharedImageRepositoryPostgres::new(Arc::clone(&db_arc));
    let add: Arc<dyn AddSharedImageUseCase + Send + Sync> =
        Arc::new(AddSharedImageService::new(repository.clone()));
    let shared_image = SharedImageUseCases {
        add: add.clone(),
        list: Arc::new(ListSharedImagesService::new(
            Arc::new(SharedImageQueryPostgres::new(Arc::clone(&db_arc))),
            Arc::new(EntityLookupPostgres::new(Arc::clone(&db_arc))),
        )),
        deactivate: Arc::new(DeactivateSharedImageService::new(repository)),
        update_caption: Arc::new(UpdateCaptionService::new()),
        attach_temporary: Arc::new(AttachTemporaryImagesService::new(add.clone())),
    };

    let media = MediaUseCases {
        replace_thumbnail: Arc::new(ReplaceThumbnailService::new(
            processor.clone(),
            gateway.clone(),
            Arc::new(ThumbnailOwnerPostgres::new(Arc::clone(&db_arc))),
        )),
    };

    let editor = EditorUseCases {
        attach_image: Arc::new(AttachmentBridge::new(processor, gateway, add)),
    };

    let export = ExportUseCases {
        export_posts: Arc::new(ExportPostsService::new(
            Arc::new(PostExportQueryPostgres::new(Arc::clone(&db_arc))),
            Arc::new(HttpThumbnailFetcher::from_env()?),
        )),
    };

    let state = AppState {
        shared_image,
        media,
        editor,
        export,
        activity: ActivityRecorder::new(Arc::new(ActivityLoggerPostgres::new(Arc::clone(
            &db_arc,
        )))),
    };

    let token_provider_arc: Arc<dyn TokenProvider + Send + Sync> =
        Arc::new(JwtTokenService::new(JwtConfig::from_env()));
    let db_for_server = Arc::clone(&db_arc);

    info!("Server run on: {}", server_url);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider_arc)))
            .app_data(web::Data::new(Arc::clone(&db_for_server)))
            .app_data(custom_json_config())
            .app_data(web::PayloadConfig::new(MAX_RAW_UPLOAD_BYTES))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await?;

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Shared image library
    cfg.service(crate::shared_image::adapter::incoming::web::routes::get_shared_images_handler);
    cfg.service(crate::shared_image::adapter::incoming::web::routes::create_shared_image_handler);
    cfg.service(crate::shared_image::adapter::incoming::web::routes::delete_shared_image_handler);
    cfg.service(
        crate::shared_image::adapter::incoming::web::routes::update_shared_image_caption_handler,
    );
    cfg.service(
        crate::shared_image::adapter::incoming::web::routes::attach_temporary_images_handler,
    );
    // Editor insertions
    cfg.service(crate::editor::adapter::incoming::web::routes::upload_image_handler);
    cfg.service(crate::editor::adapter::incoming::web::routes::attach_external_image_handler);
    // Thumbnails
    cfg.service(crate::media::adapter::incoming::web::routes::replace_thumbnail_handler);
    // Export
    cfg.service(crate::export::adapter::incoming::web::routes::export_posts_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
