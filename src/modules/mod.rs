pub mod activity;
pub mod auth;
pub mod editor;
pub mod export;
pub mod media;
pub mod shared_image;
