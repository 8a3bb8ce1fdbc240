use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityAction {
    Create,
    Update,
    Delete,
    Export,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Create => "create",
            ActivityAction::Update => "update",
            ActivityAction::Delete => "delete",
            ActivityAction::Export => "export",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the admin activity feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    pub action: ActivityAction,
    /// Table-ish name of what was touched, e.g. `shared_image`, `blog_post`.
    pub entity: String,
    pub entity_id: Option<String>,
    pub details: Option<Value>,
    pub user_id: Option<String>,
}

impl ActivityEntry {
    pub fn new(action: ActivityAction, entity: &str) -> Self {
        Self {
            action,
            entity: entity.to_string(),
            entity_id: None,
            details: None,
            user_id: None,
        }
    }

    pub fn entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    pub fn details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn user_id(mut self, user_id: impl ToString) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_builder_fills_optional_fields() {
        let user = Uuid::new_v4();
        let entry = ActivityEntry::new(ActivityAction::Delete, "shared_image")
            .entity_id(12)
            .details(json!({ "imageUrl": "https://cdn/a.jpg" }))
            .user_id(user);

        assert_eq!(entry.action.as_str(), "delete");
        assert_eq!(entry.entity_id.as_deref(), Some("12"));
        assert_eq!(entry.user_id, Some(user.to_string()));
        assert_eq!(entry.details.unwrap()["imageUrl"], "https://cdn/a.jpg");
    }

    #[test]
    fn test_new_entry_is_bare() {
        let entry = ActivityEntry::new(ActivityAction::Export, "blog_post");
        assert_eq!(entry.entity_id, None);
        assert_eq!(entry.details, None);
        assert_eq!(entry.user_id, None);
    }
}
