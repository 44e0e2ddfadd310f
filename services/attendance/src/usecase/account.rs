use tracing::info;

use muster_domain::id::UserId;
use muster_domain::user::{MIN_PASSWORD_LEN, UserRole, validate_email};

use crate::domain::repository::{PasswordPort, UserRepository};
use crate::domain::types::{NewUser, ProfileUpdate, User};
use crate::error::AttendanceServiceError;
use crate::usecase::non_blank;

// ── CreateUser ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct CreateUserInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    /// Defaults to `Student`.
    pub role: Option<UserRole>,
}

pub struct CreateUserUseCase<U: UserRepository, P: PasswordPort> {
    pub users: U,
    pub passwords: P,
}

impl<U: UserRepository, P: PasswordPort> CreateUserUseCase<U, P> {
    /// Provision an account on behalf of `creator`.
    pub async fn execute(
        &self,
        creator: UserRole,
        input: CreateUserInput,
    ) -> Result<User, AttendanceServiceError> {
        let role = input.role.unwrap_or(UserRole::Student);
        if !creator.can_provision(role) {
            return Err(AttendanceServiceError::Forbidden);
        }

        let email = non_blank(input.email)
            .map(|e| e.to_lowercase())
            .ok_or(AttendanceServiceError::InvalidEmail)?;
        if !validate_email(&email) {
            return Err(AttendanceServiceError::InvalidEmail);
        }
        let password = input.password.unwrap_or_default();
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AttendanceServiceError::PasswordTooShort);
        }
        let full_name =
            non_blank(input.full_name).ok_or(AttendanceServiceError::MissingFullName)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AttendanceServiceError::UserAlreadyExists);
        }

        let password_hash = self.passwords.hash(&password).await?;
        let user = self
            .users
            .create(&NewUser {
                email,
                password_hash,
                role,
                full_name,
                job_title: non_blank(input.job_title).unwrap_or_default(),
                phone: non_blank(input.phone).unwrap_or_default(),
                department: non_blank(input.department).unwrap_or_default(),
            })
            .await?;
        info!(user_id = %user.id, role = %user.role, created_by = %creator, "user provisioned");
        Ok(user)
    }
}

// ── ListStudents ─────────────────────────────────────────────────────────────

pub struct ListStudentsUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListStudentsUseCase<U> {
    pub async fn execute(&self) -> Result<Vec<User>, AttendanceServiceError> {
        self.users.list_by_role(UserRole::Student).await
    }
}

// ── SetActive ────────────────────────────────────────────────────────────────

pub struct SetActiveUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SetActiveUseCase<U> {
    /// Only student accounts can be toggled through this path.
    pub async fn execute(&self, id: UserId, active: bool) -> Result<(), AttendanceServiceError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .filter(|u| u.role == UserRole::Student)
            .ok_or(AttendanceServiceError::StudentNotFound)?;
        if !self.users.set_active(user.id, active).await? {
            return Err(AttendanceServiceError::StudentNotFound);
        }
        info!(user_id = %id, active, "student active flag changed");
        Ok(())
    }
}

// ── UpdateStudent ────────────────────────────────────────────────────────────

/// Absent fields keep their stored value. A present optional field may be
/// blank to clear it.
#[derive(Debug, Default)]
pub struct UpdateStudentInput {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
}

pub struct UpdateStudentUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateStudentUseCase<U> {
    /// Past attendance keeps the name and job title captured at check-in.
    pub async fn execute(
        &self,
        id: UserId,
        input: UpdateStudentInput,
    ) -> Result<User, AttendanceServiceError> {
        let current = self
            .users
            .find_by_id(id)
            .await?
            .filter(|u| u.role == UserRole::Student)
            .ok_or(AttendanceServiceError::StudentNotFound)?;

        let email = match input.email {
            Some(raw) => {
                let email = raw.trim().to_lowercase();
                if !validate_email(&email) {
                    return Err(AttendanceServiceError::InvalidEmail);
                }
                email
            }
            None => current.email.clone(),
        };
        let full_name = match input.full_name {
            Some(raw) => non_blank(Some(raw)).ok_or(AttendanceServiceError::MissingFullName)?,
            None => current.full_name.clone(),
        };
        let optional = |value: Option<String>, stored: &str| match value {
            Some(raw) => raw.trim().to_owned(),
            None => stored.to_owned(),
        };
        let profile = ProfileUpdate {
            email,
            full_name,
            job_title: optional(input.job_title, &current.job_title),
            phone: optional(input.phone, &current.phone),
            department: optional(input.department, &current.department),
        };

        if profile.email != current.email
            && self.users.find_by_email(&profile.email).await?.is_some()
        {
            return Err(AttendanceServiceError::UserAlreadyExists);
        }
        if !self.users.update_profile(id, &profile).await? {
            return Err(AttendanceServiceError::StudentNotFound);
        }
        info!(user_id = %id, "student profile updated");

        Ok(User {
            email: profile.email,
            full_name: profile.full_name,
            job_title: profile.job_title,
            phone: profile.phone,
            department: profile.department,
            ..current
        })
    }
}

// ── GetMe ────────────────────────────────────────────────────────────────────

pub struct GetMeUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetMeUseCase<U> {
    pub async fn execute(&self, id: UserId) -> Result<User, AttendanceServiceError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(AttendanceServiceError::UserNotFound)
    }
}
