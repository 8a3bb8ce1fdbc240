pub mod replace_thumbnail;
pub mod upload;

pub use replace_thumbnail::{replace_thumbnail_handler, __path_replace_thumbnail_handler};
