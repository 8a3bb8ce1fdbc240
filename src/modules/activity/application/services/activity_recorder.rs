use std::sync::Arc;

use crate::activity::application::domain::entities::ActivityEntry;
use crate::activity::application::ports::outgoing::ActivityLogger;

/// Best-effort wrapper around the activity sink. Never fails the caller.
#[derive(Clone)]
pub struct ActivityRecorder {
    logger: Arc<dyn ActivityLogger + Send + Sync>,
}

impl ActivityRecorder {
    pub fn new(logger: Arc<dyn ActivityLogger + Send + Sync>) -> Self {
        Self { logger }
    }

    pub async fn record(&self, entry: ActivityEntry) {
        let action = entry.action;
        let entity = entry.entity.clone();

        if let Err(e) = self.logger.log(entry).await {
            tracing::warn!(
                action = %action,
                entity = %entity,
                error = %e,
                "Failed to record activity"
            );
        }
    }
}
