use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use muster_auth_types::identity::Identity;
use muster_domain::id::UserId;
use muster_domain::user::UserRole;

use crate::domain::types::User;
use crate::error::AttendanceServiceError;
use crate::state::AppState;
use crate::usecase::account::GetMeUseCase;
use crate::usecase::login::{LoginInput, LoginUseCase};

/// Public view of an account; never carries the password digest.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub role: UserRole,
    pub full_name: String,
    pub job_title: String,
    pub phone: String,
    pub department: String,
    pub is_active: bool,
    #[serde(serialize_with = "muster_core::serde::to_rfc3339_ms_opt")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(serialize_with = "muster_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            full_name: user.full_name,
            job_title: user.job_title,
            phone: user.phone,
            department: user.department,
            is_active: user.is_active,
            last_login: user.last_login,
            created_at: user.created_at,
        }
    }
}

// ── POST /api/login ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "username")]
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: u64,
    pub user: UserResponse,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AttendanceServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        passwords: state.passwords(),
        token_key: state.token_key.clone(),
    };
    let out = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(LoginResponse {
        token: out.token,
        expires_at: out.expires_at,
        user: out.user.into(),
    }))
}

// ── GET /api/me ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MeResponse {
    pub user: UserResponse,
}

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<MeResponse>, AttendanceServiceError> {
    let usecase = GetMeUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(MeResponse { user: user.into() }))
}
