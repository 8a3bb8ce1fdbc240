mod process_image;
mod replace_thumbnail;

pub use process_image::{ProcessImageError, ProcessImageUseCase, HEIC_CONVERSION_HELP};
pub use replace_thumbnail::{
    ReplaceThumbnailCommand, ReplaceThumbnailError, ReplaceThumbnailUseCase, ThumbnailReplaced,
};
