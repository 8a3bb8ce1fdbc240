//! # Shared Images Migration
//!
//! Library of images uploaded for a blog post or portfolio project.
//!
//! - `entity_type`: `blog` or `portfolio`.
//! - `entity_id`: nullable. Legacy rows may hold `0`, both mean "never linked".
//! - `is_active`: removal is a soft delete. Inactive rows are kept for history.
//!
//! ## Indexes
//! - `shared_images_active_unique`: at most one active row per
//!   `(entity_type, entity_id, image_url)`. The upsert relies on it.
//! - `idx_shared_images_entity`: listing by entity.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SharedImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SharedImages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SharedImages::EntityType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SharedImages::EntityId).big_integer())
                    .col(ColumnDef::new(SharedImages::ImageUrl).text().not_null())
                    .col(
                        ColumnDef::new(SharedImages::OriginalFilename)
                            .string_len(255)
                            .not_null()
                            .default("unknown"),
                    )
                    .col(
                        ColumnDef::new(SharedImages::FileSize)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SharedImages::UploadedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(SharedImages::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(SharedImages::CaptionVi).text())
                    .col(ColumnDef::new(SharedImages::CaptionEn).text())
                    .check(Expr::col(SharedImages::EntityType).is_in(["blog", "portfolio"]))
                    .to_owned(),
            )
            .await?;

        // =====================================================
        // Indexes
        // =====================================================
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX IF NOT EXISTS shared_images_active_unique
                ON shared_images (entity_type, entity_id, image_url)
                WHERE is_active;
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_shared_images_entity
                ON shared_images (entity_type, entity_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP INDEX IF EXISTS shared_images_active_unique;
                DROP INDEX IF EXISTS idx_shared_images_entity;
                "#,
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SharedImages::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SharedImages {
    Table,
    Id,
    EntityType,
    EntityId,
    ImageUrl,
    OriginalFilename,
    FileSize,
    UploadedAt,
    IsActive,
    CaptionVi,
    CaptionEn,
}
