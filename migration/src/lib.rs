pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_blog_posts;
mod m20260301_000002_create_portfolio_projects;
mod m20260301_000003_create_shared_images;
mod m20260301_000004_create_activity_log;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_blog_posts::Migration),
            Box::new(m20260301_000002_create_portfolio_projects::Migration),
            Box::new(m20260301_000003_create_shared_images::Migration),
            Box::new(m20260301_000004_create_activity_log::Migration),
        ]
    }
}
