pub mod attach_external_image;
pub mod upload_image;

pub use attach_external_image::{attach_external_image_handler, __path_attach_external_image_handler};
pub use upload_image::{upload_image_handler, __path_upload_image_handler};
