use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use muster_auth_types::identity::Identity;
use muster_domain::id::SessionId;

use crate::domain::types::TrainingSession;
use crate::error::AttendanceServiceError;
use crate::handlers::{MessageResponse, local_now, require_manager};
use crate::state::AppState;
use crate::usecase::session::{
    CreateSessionInput, CreateSessionUseCase, DeleteSessionUseCase, EndSessionUseCase,
    ListSessionsUseCase, ResolveCurrentSessionUseCase,
};

#[derive(Serialize)]
pub struct SessionResponse {
    pub id: SessionId,
    pub date: NaiveDate,
    pub department: String,
    pub location: String,
    pub trainer_name: String,
    pub trainer_designation: String,
    pub training_type: String,
    pub training_title: String,
    pub content: String,
    #[serde(serialize_with = "muster_core::serde::to_wall_clock")]
    pub session_start_time: NaiveDateTime,
    #[serde(serialize_with = "muster_core::serde::to_wall_clock_opt")]
    pub session_end_time: Option<NaiveDateTime>,
    pub duration: Option<String>,
    pub duration_minutes: Option<i64>,
    pub status: &'static str,
    #[serde(serialize_with = "muster_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<TrainingSession> for SessionResponse {
    fn from(s: TrainingSession) -> Self {
        Self {
            status: s.status().as_str(),
            id: s.id,
            date: s.date,
            department: s.department,
            location: s.location,
            trainer_name: s.trainer_name,
            trainer_designation: s.trainer_designation,
            training_type: s.training_type,
            training_title: s.training_title,
            content: s.content,
            session_start_time: s.session_start_time,
            session_end_time: s.session_end_time,
            duration: s.duration,
            duration_minutes: s.duration_minutes,
            created_at: s.created_at,
        }
    }
}

// ── GET /api/training-sessions ───────────────────────────────────────────────

pub async fn list_sessions(
    _identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<SessionResponse>>, AttendanceServiceError> {
    let usecase = ListSessionsUseCase {
        repo: state.session_repo(),
    };
    let sessions = usecase.execute().await?;
    Ok(Json(sessions.into_iter().map(Into::into).collect()))
}

// ── POST /api/training-session ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    #[serde(alias = "training_date")]
    pub date: Option<String>,
    pub trainer_name: Option<String>,
    pub trainer_designation: Option<String>,
    pub session_start_time: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub training_type: Option<String>,
    pub training_title: Option<String>,
    #[serde(alias = "training_content")]
    pub content: Option<String>,
}

#[derive(Serialize)]
pub struct CreateSessionResponse {
    pub id: SessionId,
    pub message: &'static str,
}

pub async fn create_session(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), AttendanceServiceError> {
    require_manager(&state, &identity).await?;
    let usecase = CreateSessionUseCase {
        repo: state.session_repo(),
        defaults: state.session_defaults.clone(),
    };
    let id = usecase
        .execute(
            CreateSessionInput {
                date: body.date,
                trainer_name: body.trainer_name,
                trainer_designation: body.trainer_designation,
                session_start_time: body.session_start_time,
                department: body.department,
                location: body.location,
                training_type: body.training_type,
                training_title: body.training_title,
                content: body.content,
            },
            local_now(),
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            id,
            message: "Training session created",
        }),
    ))
}

// ── GET /api/training-session/today ──────────────────────────────────────────

pub async fn current_session(
    State(state): State<AppState>,
) -> Result<Json<Option<SessionResponse>>, AttendanceServiceError> {
    let usecase = ResolveCurrentSessionUseCase {
        repo: state.session_repo(),
    };
    let session = usecase.execute(local_now().date()).await?;
    Ok(Json(session.map(Into::into)))
}

// ── POST /api/training-session/end ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct EndSessionRequest {
    pub session_id: Option<i64>,
}

#[derive(Serialize)]
pub struct EndSessionResponse {
    pub message: &'static str,
    #[serde(serialize_with = "muster_core::serde::to_wall_clock")]
    pub end_time: NaiveDateTime,
    pub duration: String,
    pub duration_minutes: i64,
}

pub async fn end_session(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<EndSessionRequest>,
) -> Result<Json<EndSessionResponse>, AttendanceServiceError> {
    require_manager(&state, &identity).await?;
    let id = body
        .session_id
        .map(SessionId)
        .ok_or(AttendanceServiceError::MissingSessionId)?;
    let usecase = EndSessionUseCase {
        repo: state.session_repo(),
    };
    let end = usecase.execute(id, local_now()).await?;
    Ok(Json(EndSessionResponse {
        message: "Training session ended",
        end_time: end.end_time,
        duration: end.duration,
        duration_minutes: end.duration_minutes,
    }))
}

// ── DELETE /api/training-session/{id} ────────────────────────────────────────

pub async fn delete_session(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AttendanceServiceError> {
    require_manager(&state, &identity).await?;
    let usecase = DeleteSessionUseCase {
        repo: state.session_repo(),
    };
    usecase.execute(SessionId(id)).await?;
    Ok(Json(MessageResponse {
        message: "Training session deleted",
    }))
}
