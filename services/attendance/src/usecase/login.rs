use chrono::Utc;
use tracing::info;

use muster_auth_types::token::{TokenKey, issue_token};

use crate::domain::repository::{PasswordPort, UserRepository};
use crate::domain::types::User;
use crate::error::AttendanceServiceError;
use crate::usecase::non_blank;

pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub token: String,
    pub expires_at: u64,
    pub user: User,
}

pub struct LoginUseCase<U: UserRepository, P: PasswordPort> {
    pub users: U,
    pub passwords: P,
    pub token_key: TokenKey,
}

impl<U: UserRepository, P: PasswordPort> LoginUseCase<U, P> {
    /// Unknown email, inactive account and wrong password all produce the
    /// same `InvalidCredentials`.
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, AttendanceServiceError> {
        let email = non_blank(input.email).map(|e| e.to_lowercase());
        let password = input.password.filter(|p| !p.is_empty());
        let (Some(email), Some(password)) = (email, password) else {
            return Err(AttendanceServiceError::MissingCredentials);
        };

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .filter(|u| u.is_active);
        // Every attempt runs one verification.
        let digest = user
            .as_ref()
            .map_or(self.passwords.decoy_digest(), |u| u.password_hash.as_str());
        let matched = self.passwords.verify(&password, digest).await?;
        let user = match user {
            Some(user) if matched => user,
            _ => return Err(AttendanceServiceError::InvalidCredentials),
        };

        let issued = issue_token(&self.token_key, user.id, user.role)
            .map_err(|e| AttendanceServiceError::Internal(e.into()))?;

        let now = Utc::now();
        self.users.record_login(user.id, now).await?;
        info!(user_id = %user.id, role = %user.role, "user logged in");

        Ok(LoginOutput {
            token: issued.token,
            expires_at: issued.exp,
            user: User {
                last_login: Some(now),
                ..user
            },
        })
    }
}
