mod add_shared_image_service;
mod attach_temporary_images_service;
mod deactivate_shared_image_service;
mod list_shared_images_service;
mod update_caption_service;

pub use add_shared_image_service::AddSharedImageService;
pub use attach_temporary_images_service::AttachTemporaryImagesService;
pub use deactivate_shared_image_service::DeactivateSharedImageService;
pub use list_shared_images_service::ListSharedImagesService;
pub use update_caption_service::UpdateCaptionService;
