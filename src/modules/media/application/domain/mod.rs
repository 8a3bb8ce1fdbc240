pub mod entities;
pub mod image_policy;
pub mod storage_config;
