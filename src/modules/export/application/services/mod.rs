mod export_posts_service;

pub use export_posts_service::ExportPostsService;
