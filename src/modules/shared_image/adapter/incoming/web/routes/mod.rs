mod dto;
pub mod attach_temporary_images;
pub mod create_shared_image;
pub mod delete_shared_image;
pub mod get_shared_images;
pub mod update_shared_image_caption;

pub use attach_temporary_images::{attach_temporary_images_handler, __path_attach_temporary_images_handler};
pub use create_shared_image::{create_shared_image_handler, __path_create_shared_image_handler};
pub use delete_shared_image::{delete_shared_image_handler, __path_delete_shared_image_handler};
pub use dto::{parse_id, resolve_entity, EntityContextDto, SharedImageDto, SharedImagesResponse};
pub use get_shared_images::{get_shared_images_handler, __path_get_shared_images_handler};
pub use update_shared_image_caption::{update_shared_image_caption_handler, __path_update_shared_image_caption_handler};
