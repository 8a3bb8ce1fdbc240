mod export_posts;

pub use export_posts::{ExportPostsError, ExportPostsUseCase};
