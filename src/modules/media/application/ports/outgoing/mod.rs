pub mod heif_converter;
pub mod object_storage;
pub mod thumbnail_owner_repository;

pub use heif_converter::{HeifConversionError, HeifConverter, RasterFormat};
pub use object_storage::{ObjectStorage, StorageError};
pub use thumbnail_owner_repository::{ThumbnailOwnerError, ThumbnailOwnerRepository};
