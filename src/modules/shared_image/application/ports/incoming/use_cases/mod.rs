mod add_shared_image;
mod attach_temporary_images;
mod deactivate_shared_image;
mod list_shared_images;
mod update_caption;

pub use add_shared_image::{AddSharedImageCommand, AddSharedImageError, AddSharedImageUseCase};
pub use attach_temporary_images::{
    AttachTemporaryImagesCommand, AttachTemporaryImagesError, AttachTemporaryImagesUseCase,
    AttachmentSummary,
};
pub use deactivate_shared_image::{
    DeactivateSharedImageError, DeactivateSharedImageUseCase, DeactivationTarget,
};
pub use list_shared_images::{
    ListScope, ListSharedImagesError, ListSharedImagesQuery, ListSharedImagesUseCase,
};
pub use update_caption::{
    CaptionUpdateEcho, UpdateCaptionCommand, UpdateCaptionError, UpdateCaptionUseCase,
};
