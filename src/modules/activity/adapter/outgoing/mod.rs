pub mod activity_logger_postgres;
pub mod sea_orm_entity;

pub use activity_logger_postgres::ActivityLoggerPostgres;
