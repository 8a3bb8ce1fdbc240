use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use std::collections::HashMap;
use std::sync::Arc;

use crate::shared_image::application::domain::entities::EntityType;
use crate::shared_image::application::ports::outgoing::{
    EntityLookup, EntityLookupError, EntitySummary,
};

use super::sea_orm_entity::{
    blog_post_translations, blog_posts, portfolio_project_translations, portfolio_projects,
};

/// Display title preference: English, then Vietnamese.
const TITLE_LANGUAGES: [&str; 2] = ["en", "vi"];

#[derive(Debug, Clone)]
pub struct EntityLookupPostgres {
    db: Arc<DatabaseConnection>,
}

impl EntityLookupPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn blog_summaries(&self, ids: &[i64]) -> Result<Vec<EntitySummary>, DbErr> {
        let posts = blog_posts::Entity::find()
            .filter(blog_posts::Column::Id.is_in(ids.iter().copied()))
            .all(&*self.db)
            .await?;

        let translations = blog_post_translations::Entity::find()
            .filter(blog_post_translations::Column::BlogPostId.is_in(ids.iter().copied()))
            .all(&*self.db)
            .await?;

        let titles = pick_titles(
            translations
                .into_iter()
                .map(|t| (t.blog_post_id, t.language_code, t.title)),
        );

        Ok(posts
            .into_iter()
            .map(|p| EntitySummary {
                id: p.id,
                slug: Some(p.slug).filter(|s| !s.is_empty()),
                title: titles.get(&p.id).cloned(),
            })
            .collect())
    }

    async fn portfolio_summaries(&self, ids: &[i64]) -> Result<Vec<EntitySummary>, DbErr> {
        let projects = portfolio_projects::Entity::find()
            .filter(portfolio_projects::Column::Id.is_in(ids.iter().copied()))
            .all(&*self.db)
            .await?;

        let translations = portfolio_project_translations::Entity::find()
            .filter(
                portfolio_project_translations::Column::PortfolioProjectId
                    .is_in(ids.iter().copied()),
            )
            .all(&*self.db)
            .await?;

        let titles = pick_titles(
            translations
                .into_iter()
                .map(|t| (t.portfolio_project_id, t.language_code, t.title)),
        );

        Ok(projects
            .into_iter()
            .map(|p| EntitySummary {
                id: p.id,
                slug: Some(p.slug).filter(|s| !s.is_empty()),
                title: titles.get(&p.id).cloned(),
            })
            .collect())
    }
}

fn pick_titles(rows: impl Iterator<Item = (i64, String, String)>) -> HashMap<i64, String> {
    let mut by_entity: HashMap<i64, Vec<(String, String)>> = HashMap::new();
    for (id, lang, title) in rows {
        by_entity.entry(id).or_default().push((lang, title));
    }

    by_entity
        .into_iter()
        .filter_map(|(id, titles)| {
            TITLE_LANGUAGES
                .iter()
                .find_map(|lang| {
                    titles
                        .iter()
                        .find(|(l, t)| l == lang && !t.trim().is_empty())
                        .map(|(_, t)| t.clone())
                })
                .map(|title| (id, title))
        })
        .collect()
}

#[async_trait]
impl EntityLookup for EntityLookupPostgres {
    async fn summaries(
        &self,
        entity_type: EntityType,
        ids: &[i64],
    ) -> Result<Vec<EntitySummary>, EntityLookupError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = match entity_type {
            EntityType::Blog => self.blog_summaries(ids).await,
            EntityType::Portfolio => self.portfolio_summaries(ids).await,
        };

        result.map_err(|e| EntityLookupError::DatabaseError(e.to_string()))
    }
}
