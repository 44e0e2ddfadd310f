use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TrainingSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TrainingSessions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TrainingSessions::Date).date().not_null())
                    .col(ColumnDef::new(TrainingSessions::Department).string().not_null())
                    .col(ColumnDef::new(TrainingSessions::Location).string().not_null())
                    .col(ColumnDef::new(TrainingSessions::TrainerName).string().not_null())
                    .col(
                        ColumnDef::new(TrainingSessions::TrainerDesignation)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(TrainingSessions::TrainingType).string().not_null())
                    .col(ColumnDef::new(TrainingSessions::TrainingTitle).string().not_null())
                    .col(
                        ColumnDef::new(TrainingSessions::Content)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(TrainingSessions::SessionStartTime)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrainingSessions::SessionEndTime)
                            .date_time()
                            .null(),
                    )
                    .col(ColumnDef::new(TrainingSessions::Duration).string().null())
                    .col(
                        ColumnDef::new(TrainingSessions::DurationMinutes)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TrainingSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;
        // "today's session" and the listing both filter or sort on date.
        manager
            .create_index(
                Index::create()
                    .table(TrainingSessions::Table)
                    .col(TrainingSessions::Date)
                    .col(TrainingSessions::CreatedAt)
                    .name("idx_training_sessions_date_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TrainingSessions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TrainingSessions {
    Table,
    Id,
    Date,
    Department,
    Location,
    TrainerName,
    TrainerDesignation,
    TrainingType,
    TrainingTitle,
    Content,
    SessionStartTime,
    SessionEndTime,
    Duration,
    DurationMinutes,
    CreatedAt,
}
