pub mod entities;
pub mod markdown_file;
