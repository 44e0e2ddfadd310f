use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use muster_auth_types::identity::Identity;
use muster_domain::clock::parse_date;
use muster_domain::id::SessionId;

use crate::error::AttendanceServiceError;
use crate::handlers::{local_now, require_manager};
use crate::state::AppState;
use crate::usecase::report::{ExportReportUseCase, ReportFile, ReportTarget};

async fn export(state: &AppState, target: ReportTarget) -> Result<Response, AttendanceServiceError> {
    let usecase = ExportReportUseCase {
        sessions: state.session_repo(),
        attendance: state.attendance_repo(),
        renderer: state.report_renderer(),
    };
    let ReportFile {
        filename,
        content_type,
        bytes,
    } = usecase.execute(target).await?;
    let disposition = format!("attachment; filename=\"{filename}\"");
    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CACHE_CONTROL, "no-cache".to_owned()),
        ],
        bytes,
    )
        .into_response())
}

pub async fn export_session(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AttendanceServiceError> {
    require_manager(&state, &identity).await?;
    export(&state, ReportTarget::Session(SessionId(id))).await
}

pub async fn export_today(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Response, AttendanceServiceError> {
    require_manager(&state, &identity).await?;
    export(&state, ReportTarget::Day(local_now().date())).await
}

pub async fn export_by_date(
    identity: Identity,
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Response, AttendanceServiceError> {
    require_manager(&state, &identity).await?;
    let day = parse_date(&date).ok_or(AttendanceServiceError::InvalidDate)?;
    export(&state, ReportTarget::Day(day)).await
}
