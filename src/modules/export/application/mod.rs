pub mod domain;
mod export_use_cases;
pub mod ports;
pub mod services;

pub use export_use_cases::ExportUseCases;
