use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use muster_auth_types::token::TokenKey;

use crate::domain::types::SessionDefaults;
use crate::infra::db::{
    DbAttendanceRepository, DbCatalogRepository, DbSessionRepository, DbUserRepository,
};
use crate::infra::password::Argon2Passwords;
use crate::infra::report::XlsxReportRenderer;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub token_key: TokenKey,
    pub session_defaults: SessionDefaults,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn session_repo(&self) -> DbSessionRepository {
        DbSessionRepository {
            db: self.db.clone(),
        }
    }

    pub fn attendance_repo(&self) -> DbAttendanceRepository {
        DbAttendanceRepository {
            db: self.db.clone(),
        }
    }

    pub fn catalog_repo(&self) -> DbCatalogRepository {
        DbCatalogRepository {
            db: self.db.clone(),
        }
    }

    pub fn passwords(&self) -> Argon2Passwords {
        Argon2Passwords
    }

    pub fn report_renderer(&self) -> XlsxReportRenderer {
        XlsxReportRenderer
    }
}

impl FromRef<AppState> for TokenKey {
    fn from_ref(state: &AppState) -> Self {
        state.token_key.clone()
    }
}

impl FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
