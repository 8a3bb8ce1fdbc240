pub mod domain;
pub mod ports;
pub mod services;
mod shared_image_use_cases;

pub use shared_image_use_cases::SharedImageUseCases;
