use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;

use crate::export::application::domain::entities::{ExportablePost, PostTranslation};
use crate::export::application::ports::outgoing::{PostExportQuery, PostExportQueryError};
use crate::shared_image::adapter::outgoing::sea_orm_entity::{blog_post_translations, blog_posts};
use crate::shared_image::application::domain::entities::Language;

#[derive(Debug, Clone)]
pub struct PostExportQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl PostExportQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn to_exportable(
    post: blog_posts::Model,
    translations: Vec<blog_post_translations::Model>,
) -> ExportablePost {
    let translations = translations
        .into_iter()
        .filter_map(|t| match Language::from_code(&t.language_code) {
            Some(language) => Some(PostTranslation {
                language,
                title: t.title,
                summary: t.summary,
                content: t.content,
            }),
            None => {
                tracing::debug!(
                    post_id = post.id,
                    language_code = %t.language_code,
                    "Ignoring translation in unsupported language"
                );
                None
            }
        })
        .collect();

    ExportablePost {
        id: post.id,
        slug: post.slug,
        published_at: post.published_at,
        thumbnail_url: post.thumbnail_url,
        translations,
    }
}

#[async_trait]
impl PostExportQuery for PostExportQueryPostgres {
    async fn find_with_translations(
        &self,
        ids: &[i64],
    ) -> Result<Vec<ExportablePost>, PostExportQueryError> {
        let rows = blog_posts::Entity::find()
            .filter(blog_posts::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(blog_posts::Column::Id)
            .find_with_related(blog_post_translations::Entity)
            .all(&*self.db)
            .await
            .map_err(|e| PostExportQueryError::DatabaseError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(post, translations)| to_exportable(post, translations))
            .collect())
    }
}
