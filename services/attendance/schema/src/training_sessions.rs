use sea_orm::entity::prelude::*;

/// One dated training session. `session_end_time` is null while the session
/// is in progress; the duration columns are filled together with it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "training_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub date: Date,
    pub department: String,
    pub location: String,
    pub trainer_name: String,
    pub trainer_designation: String,
    pub training_type: String,
    pub training_title: String,
    pub content: String,
    pub session_start_time: DateTime,
    pub session_end_time: Option<DateTime>,
    pub duration: Option<String>,
    pub duration_minutes: Option<i64>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendance,
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
