use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use muster_core::error::error_response;

/// Attendance service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AttendanceServiceError {
    #[error("trainer name is required")]
    MissingTrainerName,
    #[error("invalid date, expected YYYY-MM-DD")]
    InvalidDate,
    #[error("invalid session start time, expected YYYY-MM-DD HH:MM:SS")]
    InvalidStartTime,
    #[error("session id is required")]
    MissingSessionId,
    #[error("email and password are required")]
    MissingCredentials,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("password must be at least 6 characters")]
    PasswordTooShort,
    #[error("full name is required")]
    MissingFullName,
    #[error("name is required")]
    MissingName,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("forbidden")]
    Forbidden,
    #[error("training session not found")]
    SessionNotFound,
    #[error("student not found")]
    StudentNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("unknown catalog")]
    CatalogNotFound,
    #[error("catalog entry not found")]
    CatalogEntryNotFound,
    #[error("department not found")]
    DepartmentNotFound,
    #[error("already checked in for this session")]
    AlreadyCheckedIn,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("training session already ended")]
    SessionAlreadyEnded,
    #[error("catalog entry already exists")]
    CatalogEntryExists,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AttendanceServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingTrainerName => "MISSING_TRAINER_NAME",
            Self::InvalidDate => "INVALID_DATE",
            Self::InvalidStartTime => "INVALID_START_TIME",
            Self::MissingSessionId => "MISSING_SESSION_ID",
            Self::MissingCredentials => "MISSING_CREDENTIALS",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::PasswordTooShort => "PASSWORD_TOO_SHORT",
            Self::MissingFullName => "MISSING_FULL_NAME",
            Self::MissingName => "MISSING_NAME",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::StudentNotFound => "STUDENT_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::CatalogNotFound => "CATALOG_NOT_FOUND",
            Self::CatalogEntryNotFound => "CATALOG_ENTRY_NOT_FOUND",
            Self::DepartmentNotFound => "DEPARTMENT_NOT_FOUND",
            Self::AlreadyCheckedIn => "ALREADY_CHECKED_IN",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::SessionAlreadyEnded => "SESSION_ALREADY_ENDED",
            Self::CatalogEntryExists => "CATALOG_ENTRY_EXISTS",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingTrainerName
            | Self::InvalidDate
            | Self::InvalidStartTime
            | Self::MissingSessionId
            | Self::MissingCredentials
            | Self::InvalidEmail
            | Self::PasswordTooShort
            | Self::MissingFullName
            | Self::MissingName => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::SessionNotFound
            | Self::StudentNotFound
            | Self::UserNotFound
            | Self::CatalogNotFound
            | Self::CatalogEntryNotFound
            | Self::DepartmentNotFound => StatusCode::NOT_FOUND,
            Self::AlreadyCheckedIn
            | Self::UserAlreadyExists
            | Self::SessionAlreadyEnded
            | Self::CatalogEntryExists => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AttendanceServiceError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            let cause = format!("{e:#}");
            tracing::error!(error = %cause, kind = "INTERNAL", "internal error");
        }
        error_response(self.status(), self.kind(), self.to_string())
    }
}
