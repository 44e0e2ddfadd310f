use sea_orm::entity::prelude::*;

/// Reference list of departments. Soft-deleted through `is_active`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::job_titles::Entity")]
    JobTitles,
}

impl Related<super::job_titles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobTitles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
