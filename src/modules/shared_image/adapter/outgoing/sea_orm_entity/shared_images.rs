use sea_orm::entity::prelude::*;

use crate::shared_image::application::domain::entities::{EntityRef, EntityType, SharedImage};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "shared_images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub entity_type: String,

    /// NULL (or 0 in legacy rows) means the image was never linked.
    pub entity_id: Option<i64>,

    pub image_url: String,

    pub original_filename: String,

    pub file_size: i64,

    pub uploaded_at: DateTimeWithTimeZone,

    pub is_active: bool,

    pub caption_vi: Option<String>,

    pub caption_en: Option<String>,
}

impl Model {
    /// Validates the stored row. Unknown `entity_type` values are rejected.
    pub fn to_domain(&self) -> Result<SharedImage, String> {
        let entity_type: EntityType = self.entity_type.parse().map_err(|e| {
            format!("shared_images row {}: {}", self.id, e)
        })?;

        Ok(SharedImage {
            id: self.id,
            entity_type,
            entity: EntityRef::from_parts(entity_type, self.entity_id),
            image_url: self.image_url.clone(),
            original_filename: self.original_filename.clone(),
            file_size: self.file_size,
            uploaded_at: self.uploaded_at.with_timezone(&chrono::Utc),
            is_active: self.is_active,
            caption_vi: self.caption_vi.clone(),
            caption_en: self.caption_en.clone(),
        })
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
