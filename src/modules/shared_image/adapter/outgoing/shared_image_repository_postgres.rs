use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseBackend, DatabaseConnection, EntityTrait, QueryFilter,
    Statement,
};
use std::sync::Arc;

use crate::shared_image::application::domain::entities::{EntityType, SharedImage};
use crate::shared_image::application::ports::outgoing::{
    NewSharedImage, SharedImageRepository, SharedImageRepositoryError,
};

use super::sea_orm_entity::shared_images::{Column, Entity as SharedImageEntity};

#[derive(Clone)]
pub struct SharedImageRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl SharedImageRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Relies on the partial unique index `shared_images_active_unique`
    /// over `(entity_type, entity_id, image_url) WHERE is_active`.
    fn upsert_stmt(image: &NewSharedImage) -> Statement {
        Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            INSERT INTO shared_images (
              entity_type, entity_id, image_url,
              original_filename, file_size,
              is_active, uploaded_at
            )
            VALUES ($1, $2, $3, $4, $5, TRUE, now())
            ON CONFLICT (entity_type, entity_id, image_url) WHERE is_active
            DO UPDATE SET original_filename = EXCLUDED.original_filename
            RETURNING *
            "#,
            vec![
                image.entity_type.as_str().into(),
                image.entity_id.into(),
                image.image_url.clone().into(),
                image.original_filename.clone().into(),
                image.file_size.into(),
            ],
        )
    }
}

#[async_trait]
impl SharedImageRepository for SharedImageRepositoryPostgres {
    async fn upsert_active(
        &self,
        image: NewSharedImage,
    ) -> Result<SharedImage, SharedImageRepositoryError> {
        let model = SharedImageEntity::find()
            .from_raw_sql(Self::upsert_stmt(&image))
            .one(&*self.db)
            .await
            .map_err(|e| SharedImageRepositoryError::DatabaseError(e.to_string()))?
            .ok_or_else(|| {
                SharedImageRepositoryError::DatabaseError(
                    "upsert returned no row".to_string(),
                )
            })?;

        model
            .to_domain()
            .map_err(SharedImageRepositoryError::InvalidRow)
    }

    async fn deactivate(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        image_url: &str,
    ) -> Result<u64, SharedImageRepositoryError> {
        let result = SharedImageEntity::update_many()
            .col_expr(Column::IsActive, Expr::value(false))
            .filter(Column::EntityType.eq(entity_type.as_str()))
            .filter(Column::EntityId.eq(entity_id))
            .filter(Column::ImageUrl.eq(image_url))
            .filter(Column::IsActive.eq(true))
            .exec(&*self.db)
            .await
            .map_err(|e| SharedImageRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected)
    }

    async fn deactivate_unlinked(
        &self,
        entity_type: EntityType,
        image_url: &str,
    ) -> Result<u64, SharedImageRepositoryError> {
        let result = SharedImageEntity::update_many()
            .col_expr(Column::IsActive, Expr::value(false))
            .filter(Column::EntityType.eq(entity_type.as_str()))
            .filter(
                Condition::any()
                    .add(Column::EntityId.is_null())
                    .add(Column::EntityId.eq(0)),
            )
            .filter(Column::ImageUrl.eq(image_url))
            .filter(Column::IsActive.eq(true))
            .exec(&*self.db)
            .await
            .map_err(|e| SharedImageRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected)
    }
}
