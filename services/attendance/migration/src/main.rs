use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(muster_attendance_migration::Migrator).await;
}
