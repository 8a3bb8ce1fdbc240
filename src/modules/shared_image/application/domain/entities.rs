use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Blog,
    Portfolio,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Blog => "blog",
            EntityType::Portfolio => "portfolio",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity type: {0}")]
pub struct UnknownEntityType(pub String);

impl FromStr for EntityType {
    type Err = UnknownEntityType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "blog" => Ok(EntityType::Blog),
            "portfolio" => Ok(EntityType::Portfolio),
            other => Err(UnknownEntityType(other.to_string())),
        }
    }
}

/// Owner of a shared image.
///
/// `Unlinked` stands for an item that has not been saved yet. Stored rows with a
/// NULL or `0` entity id read back as `Unlinked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Blog(i64),
    Portfolio(i64),
    Unlinked,
}

impl EntityRef {
    /// Builds a reference from wire/store parts. Missing or non-positive ids are unlinked.
    pub fn from_parts(entity_type: EntityType, entity_id: Option<i64>) -> Self {
        match (entity_type, entity_id) {
            (EntityType::Blog, Some(id)) if id > 0 => EntityRef::Blog(id),
            (EntityType::Portfolio, Some(id)) if id > 0 => EntityRef::Portfolio(id),
            _ => EntityRef::Unlinked,
        }
    }

    pub fn linked(&self) -> Option<(EntityType, i64)> {
        match *self {
            EntityRef::Blog(id) => Some((EntityType::Blog, id)),
            EntityRef::Portfolio(id) => Some((EntityType::Portfolio, id)),
            EntityRef::Unlinked => None,
        }
    }

    pub fn entity_type(&self) -> Option<EntityType> {
        self.linked().map(|(t, _)| t)
    }

    pub fn id(&self) -> Option<i64> {
        self.linked().map(|(_, id)| id)
    }

    pub fn is_persisted(&self) -> bool {
        !matches!(self, EntityRef::Unlinked)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.linked() {
            Some((t, id)) => write!(f, "{t}:{id}"),
            None => write!(f, "unlinked"),
        }
    }
}

/// A row of the shared image library.
///
/// `entity_type` is kept next to `entity` because unlinked legacy rows still
/// carry their type.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedImage {
    pub id: i64,
    pub entity_type: EntityType,
    pub entity: EntityRef,
    pub image_url: String,
    pub original_filename: String,
    pub file_size: i64,
    pub uploaded_at: DateTime<Utc>,
    pub is_active: bool,
    pub caption_vi: Option<String>,
    pub caption_en: Option<String>,
}

/// Slug and title of the entity an image belongs to, for the admin library view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityContext {
    pub entity_slug: Option<String>,
    pub entity_title: Option<String>,
    pub public_url: Option<String>,
    pub admin_url: Option<String>,
}

impl EntityContext {
    pub fn for_entity(
        entity_type: EntityType,
        entity_id: i64,
        slug: Option<String>,
        title: Option<String>,
    ) -> Self {
        let public_url = slug
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| format!("/{}/{}", entity_type.as_str(), s));

        Self {
            entity_slug: slug,
            entity_title: title,
            public_url,
            admin_url: Some(format!("/admin/{}/edit/{}", entity_type.as_str(), entity_id)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SharedImageListing {
    pub image: SharedImage,
    pub context: Option<EntityContext>,
}

/// An image inserted into a document whose entity has no id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemporaryImage {
    pub url: String,
    pub filename: String,
    #[serde(default)]
    pub file_size: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Vi,
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Vi => "vi",
            Language::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "vi" => Some(Language::Vi),
            "en" => Some(Language::En),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageCaptions {
    #[serde(default)]
    pub caption_vi: Option<String>,
    #[serde(default)]
    pub caption_en: Option<String>,
}

impl ImageCaptions {
    /// Caption for `language`, ignoring blank values.
    pub fn for_language(&self, language: Language) -> Option<&str> {
        let caption = match language {
            Language::Vi => self.caption_vi.as_deref(),
            Language::En => self.caption_en.as_deref(),
        };
        caption.map(str::trim).filter(|c| !c.is_empty())
    }
}
