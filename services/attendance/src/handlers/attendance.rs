use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use muster_auth_types::identity::Identity;
use muster_domain::id::{AttendanceId, SessionId, UserId};

use crate::domain::types::AttendanceRecord;
use crate::error::AttendanceServiceError;
use crate::handlers::session::SessionResponse;
use crate::handlers::{local_now, require};
use crate::state::AppState;
use crate::usecase::attendance::{
    CheckInInput, CheckInUseCase, MyCheckInUseCase, SessionAttendance, SessionAttendanceUseCase,
    TodayAttendanceUseCase,
};

#[derive(Serialize)]
pub struct AttendanceResponse {
    pub id: AttendanceId,
    pub session_id: SessionId,
    pub student_id: UserId,
    pub student_name: String,
    #[serde(serialize_with = "muster_core::serde::to_wall_clock")]
    pub check_in_time: NaiveDateTime,
    pub signature: String,
    pub job_title: String,
    pub comments: Option<String>,
}

impl From<AttendanceRecord> for AttendanceResponse {
    fn from(r: AttendanceRecord) -> Self {
        Self {
            id: r.id,
            session_id: r.session_id,
            student_id: r.student_id,
            student_name: r.student_name,
            check_in_time: r.check_in_time,
            signature: r.signature,
            job_title: r.job_title,
            comments: r.comments,
        }
    }
}

#[derive(Serialize)]
pub struct SessionAttendanceResponse {
    pub session: SessionResponse,
    pub attendance: Vec<AttendanceResponse>,
}

impl From<SessionAttendance> for SessionAttendanceResponse {
    fn from(v: SessionAttendance) -> Self {
        Self {
            session: v.session.into(),
            attendance: v.attendance.into_iter().map(Into::into).collect(),
        }
    }
}

// ── POST /api/attendance/checkin ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CheckInRequest {
    pub session_id: Option<i64>,
    #[serde(alias = "comment")]
    pub comments: Option<String>,
}

#[derive(Serialize)]
pub struct CheckInResponse {
    pub message: &'static str,
    pub attendance_id: AttendanceId,
    pub session_id: SessionId,
    #[serde(serialize_with = "muster_core::serde::to_wall_clock")]
    pub check_in_time: NaiveDateTime,
}

pub async fn check_in(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CheckInRequest>,
) -> Result<(StatusCode, Json<CheckInResponse>), AttendanceServiceError> {
    require(identity.role.can_check_in())?;
    let usecase = CheckInUseCase {
        sessions: state.session_repo(),
        attendance: state.attendance_repo(),
        users: state.user_repo(),
    };
    let out = usecase
        .execute(
            CheckInInput {
                session_id: body.session_id.map(SessionId),
                student_id: identity.user_id,
                comments: body.comments,
            },
            local_now(),
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CheckInResponse {
            message: "Attendance recorded",
            attendance_id: out.attendance_id,
            session_id: out.session_id,
            check_in_time: out.check_in_time,
        }),
    ))
}

// ── GET /api/attendance/session/{id}/me ──────────────────────────────────────

pub async fn my_check_in(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Option<AttendanceResponse>>, AttendanceServiceError> {
    require(identity.role.can_check_in())?;
    let usecase = MyCheckInUseCase {
        sessions: state.session_repo(),
        attendance: state.attendance_repo(),
    };
    let record = usecase.execute(SessionId(id), identity.user_id).await?;
    Ok(Json(record.map(Into::into)))
}

// ── GET /api/attendance/session/{id} ─────────────────────────────────────────

pub async fn session_attendance(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SessionAttendanceResponse>, AttendanceServiceError> {
    let usecase = SessionAttendanceUseCase {
        sessions: state.session_repo(),
        attendance: state.attendance_repo(),
    };
    let view = usecase.execute(SessionId(id)).await?;
    Ok(Json(view.into()))
}

// ── GET /api/attendance/today ────────────────────────────────────────────────

pub async fn today_attendance(
    _identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<SessionAttendanceResponse>, AttendanceServiceError> {
    let usecase = TodayAttendanceUseCase {
        sessions: state.session_repo(),
        attendance: state.attendance_repo(),
    };
    let view = usecase.execute(local_now()).await?;
    Ok(Json(view.into()))
}
