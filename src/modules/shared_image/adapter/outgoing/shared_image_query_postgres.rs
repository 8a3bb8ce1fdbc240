use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use std::sync::Arc;

use crate::shared_image::application::domain::entities::SharedImage;
use crate::shared_image::application::ports::outgoing::{
    ActiveImageFilter, SharedImageQuery, SharedImageQueryError,
};

use super::sea_orm_entity::shared_images::{Column, Entity as SharedImageEntity, Model};

#[derive(Debug, Clone)]
pub struct SharedImageQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl SharedImageQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// `%needle%` for LIKE, lower-cased, with wildcards in the needle escaped.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl SharedImageQuery for SharedImageQueryPostgres {
    async fn list_active(
        &self,
        filter: ActiveImageFilter,
    ) -> Result<Vec<SharedImage>, SharedImageQueryError> {
        let mut query = SharedImageEntity::find().filter(Column::IsActive.eq(true));

        if let Some(entity_type) = filter.entity_type {
            query = query.filter(Column::EntityType.eq(entity_type.as_str()));
        }
        match filter.entity_id {
            // legacy unlinked rows
            Some(0) => {
                query = query.filter(
                    Condition::any()
                        .add(Column::EntityId.is_null())
                        .add(Column::EntityId.eq(0)),
                );
            }
            Some(entity_id) => query = query.filter(Column::EntityId.eq(entity_id)),
            None => {}
        }
        if let Some(needle) = filter.filename_contains.as_deref() {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(Column::OriginalFilename)))
                    .like(like_pattern(needle)),
            );
        }

        let models: Vec<Model> = query
            .order_by_desc(Column::UploadedAt)
            .order_by_desc(Column::Id)
            .all(&*self.db)
            .await
            .map_err(|e| SharedImageQueryError::DatabaseError(e.to_string()))?;

        models
            .iter()
            .map(|m| m.to_domain().map_err(SharedImageQueryError::InvalidRow))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared_image::application::domain::entities::{EntityRef, EntityType};
    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr};

    fn model(id: i64, entity_type: &str, minutes_ago: i64) -> Model {
        Model {
            id,
            entity_type: entity_type.to_string(),
            entity_id: Some(1),
            image_url: format!("https://cdn/{id}.jpg"),
            original_filename: format!("{id}.jpg"),
            file_size: 1,
            uploaded_at: (Utc::now() - Duration::minutes(minutes_ago)).fixed_offset(),
            is_active: true,
            caption_vi: None,
            caption_en: None,
        }
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Beach"), "%beach%");
        assert_eq!(like_pattern("100%_done"), "%100\\%\\_done%");
    }

    #[tokio::test]
    async fn test_list_active_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model(2, "blog", 1), model(1, "blog", 5)]])
            .into_connection();
        let query = SharedImageQueryPostgres::new(Arc::new(db));

        let images = query
            .list_active(ActiveImageFilter {
                entity_type: Some(EntityType::Blog),
                entity_id: Some(1),
                filename_contains: Some("JPG".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(images.len(), 2);
        assert_eq!(images[0].id, 2);
        assert_eq!(images[0].entity, EntityRef::Blog(1));
    }

    #[tokio::test]
    async fn test_list_active_invalid_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model(1, "podcast", 0)]])
            .into_connection();
        let query = SharedImageQueryPostgres::new(Arc::new(db));

        let result = query.list_active(ActiveImageFilter::default()).await;

        assert!(matches!(result, Err(SharedImageQueryError::InvalidRow(_))));
    }

    #[tokio::test]
    async fn test_list_active_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Query(RuntimeErr::Internal(
                "connection lost".into(),
            ))])
            .into_connection();
        let query = SharedImageQueryPostgres::new(Arc::new(db));

        let result = query.list_active(ActiveImageFilter::default()).await;

        assert!(matches!(result, Err(SharedImageQueryError::DatabaseError(_))));
    }
}
