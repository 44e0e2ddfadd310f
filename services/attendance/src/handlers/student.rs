use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use muster_auth_types::identity::Identity;
use muster_domain::id::UserId;
use muster_domain::user::UserRole;

use crate::error::AttendanceServiceError;
use crate::handlers::auth::UserResponse;
use crate::handlers::require_manager;
use crate::state::AppState;
use crate::usecase::account::{
    CreateUserInput, CreateUserUseCase, ListStudentsUseCase, SetActiveUseCase,
    UpdateStudentInput, UpdateStudentUseCase,
};

pub async fn list_students(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AttendanceServiceError> {
    require_manager(&state, &identity).await?;
    let usecase = ListStudentsUseCase {
        users: state.user_repo(),
    };
    let students = usecase.execute().await?;
    Ok(Json(students.into_iter().map(Into::into).collect()))
}

#[derive(Deserialize)]
pub struct CreateStudentRequest {
    #[serde(alias = "username")]
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub role: Option<UserRole>,
}

#[derive(Serialize)]
pub struct CreateStudentResponse {
    pub id: UserId,
    pub message: &'static str,
    pub user: UserResponse,
}

pub async fn create_student(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<CreateStudentResponse>), AttendanceServiceError> {
    require_manager(&state, &identity).await?;
    let usecase = CreateUserUseCase {
        users: state.user_repo(),
        passwords: state.passwords(),
    };
    let user = usecase
        .execute(
            identity.role,
            CreateUserInput {
                email: body.email,
                password: body.password,
                full_name: body.full_name,
                job_title: body.job_title,
                phone: body.phone,
                department: body.department,
                role: body.role,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateStudentResponse {
            id: user.id,
            message: "User created",
            user: user.into(),
        }),
    ))
}

#[derive(Deserialize)]
pub struct UpdateStudentRequest {
    #[serde(alias = "username")]
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
}

pub async fn update_student(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateStudentRequest>,
) -> Result<Json<UserResponse>, AttendanceServiceError> {
    require_manager(&state, &identity).await?;
    let usecase = UpdateStudentUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(
            UserId(id),
            UpdateStudentInput {
                email: body.email,
                full_name: body.full_name,
                job_title: body.job_title,
                phone: body.phone,
                department: body.department,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

#[derive(Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

pub async fn set_active(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<SetActiveRequest>,
) -> Result<StatusCode, AttendanceServiceError> {
    require_manager(&state, &identity).await?;
    let usecase = SetActiveUseCase {
        users: state.user_repo(),
    };
    usecase.execute(UserId(id), body.is_active).await?;
    Ok(StatusCode::NO_CONTENT)
}
