use async_trait::async_trait;
use sea_orm::{ActiveValue::NotSet, DatabaseConnection, EntityTrait, Set};
use std::sync::Arc;

use crate::activity::application::domain::entities::ActivityEntry;
use crate::activity::application::ports::outgoing::{ActivityLogError, ActivityLogger};

use super::sea_orm_entity::activity_log::{ActiveModel, Entity as ActivityLogEntity};

#[derive(Clone)]
pub struct ActivityLoggerPostgres {
    db: Arc<DatabaseConnection>,
}

impl ActivityLoggerPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActivityLogger for ActivityLoggerPostgres {
    async fn log(&self, entry: ActivityEntry) -> Result<(), ActivityLogError> {
        let model = ActiveModel {
            id: NotSet,
            action: Set(entry.action.as_str().to_string()),
            entity: Set(entry.entity),
            entity_id: Set(entry.entity_id),
            details: Set(entry.details),
            user_id: Set(entry.user_id),
            // column default
            created_at: NotSet,
        };

        ActivityLogEntity::insert(model)
            .exec_without_returning(&*self.db)
            .await
            .map_err(|e| ActivityLogError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
