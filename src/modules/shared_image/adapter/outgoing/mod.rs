pub mod entity_lookup_postgres;
pub mod sea_orm_entity;
pub mod shared_image_query_postgres;
pub mod shared_image_repository_postgres;
