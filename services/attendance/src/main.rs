use std::time::Duration;

use anyhow::Context;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use muster_attendance::config::AttendanceConfig;
use muster_attendance::router::build_router;
use muster_attendance::state::AppState;
use muster_attendance::usecase::account::CreateUserUseCase;
use muster_attendance::usecase::bootstrap::BootstrapAdminUseCase;
use muster_attendance::usecase::catalog::SeedCatalogsUseCase;
use muster_attendance_migration::Migrator;
use muster_auth_types::token::TokenKey;
use muster_core::config::Config;
use muster_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = AttendanceConfig::try_from_env().context("failed to read configuration")?;

    let mut opts = ConnectOptions::new(config.database_url.clone());
    opts.connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .context("failed to connect to database")?;

    Migrator::up(&db, None)
        .await
        .context("failed to apply migrations")?;

    let state = AppState {
        db,
        token_key: TokenKey::new(&config.jwt_secret, config.token_ttl_secs),
        session_defaults: config.session_defaults(),
    };

    SeedCatalogsUseCase {
        catalogs: state.catalog_repo(),
    }
    .execute()
    .await
    .context("failed to seed catalogs")?;

    if let Some(admin) = config.bootstrap_admin() {
        let bootstrap = BootstrapAdminUseCase {
            accounts: CreateUserUseCase {
                users: state.user_repo(),
                passwords: state.passwords(),
            },
        };
        bootstrap
            .execute(admin)
            .await
            .context("failed to provision bootstrap admin")?;
    }

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("attendance service listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
