mod entity_lookup;
mod shared_image_query;
mod shared_image_repository;

pub use entity_lookup::{EntityLookup, EntityLookupError, EntitySummary};
pub use shared_image_query::{ActiveImageFilter, SharedImageQuery, SharedImageQueryError};
pub use shared_image_repository::{
    NewSharedImage, SharedImageRepository, SharedImageRepositoryError,
};
