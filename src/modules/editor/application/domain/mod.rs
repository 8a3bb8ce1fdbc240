pub mod document;
pub mod markdown;
