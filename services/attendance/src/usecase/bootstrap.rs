use tracing::info;

use muster_domain::user::UserRole;

use crate::domain::repository::{PasswordPort, UserRepository};
use crate::error::AttendanceServiceError;
use crate::usecase::account::{CreateUserInput, CreateUserUseCase};

pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Seed an admin account at startup unless the email is already registered.
pub struct BootstrapAdminUseCase<U: UserRepository, P: PasswordPort> {
    pub accounts: CreateUserUseCase<U, P>,
}

impl<U: UserRepository, P: PasswordPort> BootstrapAdminUseCase<U, P> {
    /// Returns whether an account was created.
    pub async fn execute(&self, admin: BootstrapAdmin) -> Result<bool, AttendanceServiceError> {
        let email = admin.email.trim().to_lowercase();
        if self.accounts.users.find_by_email(&email).await?.is_some() {
            info!(email = %email, "bootstrap admin already present");
            return Ok(false);
        }
        let user = self
            .accounts
            .execute(
                UserRole::Admin,
                CreateUserInput {
                    email: Some(email),
                    password: Some(admin.password),
                    full_name: Some(admin.full_name),
                    role: Some(UserRole::Admin),
                    ..Default::default()
                },
            )
            .await?;
        info!(user_id = %user.id, "bootstrap admin created");
        Ok(true)
    }
}
