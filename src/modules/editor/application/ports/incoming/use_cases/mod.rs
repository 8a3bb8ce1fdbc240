mod attach_image;

pub use attach_image::{AttachImageError, AttachImageUseCase, Attachment, AttachmentOutcome};
