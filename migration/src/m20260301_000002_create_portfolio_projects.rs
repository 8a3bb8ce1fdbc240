use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PortfolioProjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PortfolioProjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PortfolioProjects::Slug)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(PortfolioProjects::Status)
                            .string_len(20)
                            .not_null()
                            .default("draft"),
                    )
                    .col(ColumnDef::new(PortfolioProjects::ThumbnailUrl).text())
                    .col(ColumnDef::new(PortfolioProjects::ProjectUrl).text())
                    .col(ColumnDef::new(PortfolioProjects::GithubUrl).text())
                    .col(ColumnDef::new(PortfolioProjects::PublishedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(PortfolioProjects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(PortfolioProjects::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PortfolioProjectTranslations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PortfolioProjectTranslations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PortfolioProjectTranslations::PortfolioProjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioProjectTranslations::LanguageCode)
                            .string_len(5)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioProjectTranslations::Title)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(PortfolioProjectTranslations::Description).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_portfolio_project_translations_project_id")
                            .from(
                                PortfolioProjectTranslations::Table,
                                PortfolioProjectTranslations::PortfolioProjectId,
                            )
                            .to(PortfolioProjects::Table, PortfolioProjects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX IF NOT EXISTS idx_portfolio_project_translations_project_lang
                ON portfolio_project_translations (portfolio_project_id, language_code);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_portfolio_projects_updated_at
                BEFORE UPDATE ON portfolio_projects
                FOR EACH ROW
                EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                "DROP TRIGGER IF EXISTS update_portfolio_projects_updated_at ON portfolio_projects",
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(PortfolioProjectTranslations::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PortfolioProjects::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PortfolioProjects {
    Table,
    Id,
    Slug,
    Status,
    ThumbnailUrl,
    ProjectUrl,
    GithubUrl,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PortfolioProjectTranslations {
    Table,
    Id,
    PortfolioProjectId,
    LanguageCode,
    Title,
    Description,
}
