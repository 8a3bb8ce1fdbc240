pub mod domain;
mod editor_use_cases;
pub mod ports;
pub mod services;

pub use editor_use_cases::EditorUseCases;
