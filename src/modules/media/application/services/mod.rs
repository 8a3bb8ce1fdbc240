pub mod compression;
pub mod heic_strategies;
mod image_processor_service;
mod object_store_gateway;
mod replace_thumbnail_service;

pub use heic_strategies::{default_heic_strategies, ConversionStrategy};
pub use image_processor_service::ImageProcessorService;
pub use object_store_gateway::ObjectStoreGateway;
pub use replace_thumbnail_service::ReplaceThumbnailService;
