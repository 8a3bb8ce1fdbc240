pub mod export_posts;

pub use export_posts::{export_posts_handler, __path_export_posts_handler};
