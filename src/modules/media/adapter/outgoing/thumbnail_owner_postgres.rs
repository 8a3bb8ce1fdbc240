use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::sync::Arc;

use crate::media::application::ports::outgoing::{ThumbnailOwnerError, ThumbnailOwnerRepository};
use crate::shared_image::adapter::outgoing::sea_orm_entity::{blog_posts, portfolio_projects};
use crate::shared_image::application::domain::entities::EntityType;

fn db_error(e: sea_orm::DbErr) -> ThumbnailOwnerError {
    ThumbnailOwnerError::DatabaseError(e.to_string())
}

/// Reads and writes `thumbnail_url` on `blog_posts` / `portfolio_projects`.
#[derive(Clone)]
pub struct ThumbnailOwnerPostgres {
    db: Arc<DatabaseConnection>,
}

impl ThumbnailOwnerPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ThumbnailOwnerRepository for ThumbnailOwnerPostgres {
    async fn current_thumbnail(
        &self,
        entity_type: EntityType,
        id: i64,
    ) -> Result<Option<String>, ThumbnailOwnerError> {
        let found = match entity_type {
            EntityType::Blog => blog_posts::Entity::find_by_id(id)
                .one(&*self.db)
                .await
                .map_err(db_error)?
                .map(|m| m.thumbnail_url),
            EntityType::Portfolio => portfolio_projects::Entity::find_by_id(id)
                .one(&*self.db)
                .await
                .map_err(db_error)?
                .map(|m| m.thumbnail_url),
        };

        found.ok_or(ThumbnailOwnerError::NotFound)
    }

    async fn set_thumbnail(
        &self,
        entity_type: EntityType,
        id: i64,
        url: &str,
    ) -> Result<(), ThumbnailOwnerError> {
        let now = Utc::now().fixed_offset();

        let result = match entity_type {
            EntityType::Blog => blog_posts::Entity::update_many()
                .col_expr(blog_posts::Column::ThumbnailUrl, Expr::value(url))
                .col_expr(blog_posts::Column::UpdatedAt, Expr::value(now))
                .filter(blog_posts::Column::Id.eq(id))
                .exec(&*self.db)
                .await
                .map_err(db_error)?,
            EntityType::Portfolio => portfolio_projects::Entity::update_many()
                .col_expr(portfolio_projects::Column::ThumbnailUrl, Expr::value(url))
                .col_expr(portfolio_projects::Column::UpdatedAt, Expr::value(now))
                .filter(portfolio_projects::Column::Id.eq(id))
                .exec(&*self.db)
                .await
                .map_err(db_error)?,
        };

        if result.rows_affected == 0 {
            return Err(ThumbnailOwnerError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};

    fn blog_post(id: i64, thumbnail: Option<&str>) -> blog_posts::Model {
        let now = Utc::now().fixed_offset();
        blog_posts::Model {
            id,
            slug: format!("post-{id}"),
            status: "published".to_string(),
            thumbnail_url: thumbnail.map(str::to_string),
            published_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    fn project(id: i64) -> portfolio_projects::Model {
        let now = Utc::now().fixed_offset();
        portfolio_projects::Model {
            id,
            slug: format!("project-{id}"),
            status: "draft".to_string(),
            thumbnail_url: None,
            project_url: None,
            github_url: None,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_current_thumbnail_of_blog_post() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![blog_post(4, Some("https://cdn/old.jpg"))]])
            .into_connection();
        let repo = ThumbnailOwnerPostgres::new(Arc::new(db));

        let current = repo.current_thumbnail(EntityType::Blog, 4).await.unwrap();

        assert_eq!(current.as_deref(), Some("https://cdn/old.jpg"));
    }

    #[tokio::test]
    async fn test_current_thumbnail_of_project_without_one() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![project(2)]])
            .into_connection();
        let repo = ThumbnailOwnerPostgres::new(Arc::new(db));

        let current = repo
            .current_thumbnail(EntityType::Portfolio, 2)
            .await
            .unwrap();

        assert_eq!(current, None);
    }

    #[tokio::test]
    async fn test_current_thumbnail_missing_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<blog_posts::Model>::new()])
            .into_connection();
        let repo = ThumbnailOwnerPostgres::new(Arc::new(db));

        let result = repo.current_thumbnail(EntityType::Blog, 99).await;

        assert_eq!(result, Err(ThumbnailOwnerError::NotFound));
    }

    #[tokio::test]
    async fn test_set_thumbnail_updates_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let repo = ThumbnailOwnerPostgres::new(Arc::new(db));

        let result = repo
            .set_thumbnail(EntityType::Portfolio, 2, "https://cdn/new.jpg")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_set_thumbnail_zero_rows_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = ThumbnailOwnerPostgres::new(Arc::new(db));

        let result = repo
            .set_thumbnail(EntityType::Blog, 7, "https://cdn/new.jpg")
            .await;

        assert_eq!(result, Err(ThumbnailOwnerError::NotFound));
    }

    #[tokio::test]
    async fn test_set_thumbnail_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors(vec![DbErr::Exec(RuntimeErr::Internal(
                "connection lost".into(),
            ))])
            .into_connection();
        let repo = ThumbnailOwnerPostgres::new(Arc::new(db));

        let result = repo
            .set_thumbnail(EntityType::Blog, 7, "https://cdn/new.jpg")
            .await;

        assert!(matches!(result, Err(ThumbnailOwnerError::DatabaseError(_))));
    }
}
