use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "portfolio_project_translations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub portfolio_project_id: i64,

    pub language_code: String,

    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::portfolio_projects::Entity",
        from = "Column::PortfolioProjectId",
        to = "super::portfolio_projects::Column::Id",
        on_delete = "Cascade"
    )]
    PortfolioProject,
}

impl Related<super::portfolio_projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PortfolioProject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
