pub mod post_export_query;
pub mod thumbnail_fetcher;

pub use post_export_query::{PostExportQuery, PostExportQueryError};
pub use thumbnail_fetcher::{ThumbnailFetchError, ThumbnailFetcher};
