use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendance::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attendance::SessionId).big_integer().not_null())
                    .col(ColumnDef::new(Attendance::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Attendance::CheckInTime).date_time().not_null())
                    .col(ColumnDef::new(Attendance::Signature).string().not_null())
                    .col(
                        ColumnDef::new(Attendance::JobTitle)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Attendance::Comments).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendance::Table, Attendance::SessionId)
                            .to(TrainingSessions::Table, TrainingSessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendance::Table, Attendance::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;
        // One check-in per student per session; concurrent duplicates lose here.
        manager
            .create_index(
                Index::create()
                    .table(Attendance::Table)
                    .col(Attendance::SessionId)
                    .col(Attendance::StudentId)
                    .unique()
                    .name("idx_attendance_session_student")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Attendance {
    Table,
    Id,
    SessionId,
    StudentId,
    CheckInTime,
    Signature,
    JobTitle,
    Comments,
}

#[derive(Iden)]
enum TrainingSessions {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
