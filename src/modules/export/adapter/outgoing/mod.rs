mod post_export_query_postgres;
mod thumbnail_fetcher_http;

pub use post_export_query_postgres::PostExportQueryPostgres;
pub use thumbnail_fetcher_http::HttpThumbnailFetcher;
