pub mod attendance;
pub mod auth;
pub mod catalog;
pub mod export;
pub mod session;
pub mod student;

use chrono::NaiveDateTime;

use muster_auth_types::identity::Identity;

use crate::domain::repository::UserRepository;
use crate::error::AttendanceServiceError;
use crate::state::AppState;

/// Local wall-clock time; sessions and check-ins are recorded as seen on site.
pub(crate) fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

pub(crate) fn require(allowed: bool) -> Result<(), AttendanceServiceError> {
    if allowed {
        Ok(())
    } else {
        Err(AttendanceServiceError::Forbidden)
    }
}

/// Teacher or admin whose account is still active. Tokens outlive
/// deactivation, so the flag is read on every management call.
pub(crate) async fn require_manager(
    state: &AppState,
    identity: &Identity,
) -> Result<(), AttendanceServiceError> {
    require(identity.role.can_manage_sessions())?;
    let active = state
        .user_repo()
        .find_by_id(identity.user_id)
        .await?
        .is_some_and(|user| user.is_active);
    require(active)
}

#[derive(serde::Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
