pub mod heif_converter_magick;
pub mod storage_gcs;
pub mod thumbnail_owner_postgres;

pub use heif_converter_magick::MagickHeifConverter;
pub use storage_gcs::GcsObjectStorage;
pub use thumbnail_owner_postgres::ThumbnailOwnerPostgres;
