use anyhow::Context as _;
use chrono::NaiveDate;
use tokio::task;
use tracing::info;

use muster_domain::id::SessionId;

use crate::domain::repository::{AttendanceRepository, ReportRenderer, SessionRepository};
use crate::domain::types::{
    AttendanceRecord, RowStyle, SheetCell, SheetLayout, SheetRow, TrainingSession,
};
use crate::error::AttendanceServiceError;

pub const SHEET_NAME: &str = "Training Attendance Sheet";
pub const TABLE_HEADER: [&str; 6] = [
    "S. No.",
    "Employee Name",
    "Job Title",
    "Signature",
    "Comments",
    "Check-in Time",
];

const DAY: &str = "%d/%m/%Y";
const DAY_MINUTE: &str = "%d/%m/%Y %H:%M";
const DAY_SECOND: &str = "%d/%m/%Y %H:%M:%S";
const NOT_ENDED: &str = "In progress";
const MISSING: &str = "N/A";

fn label(name: &str, value: impl Into<String>) -> SheetRow {
    SheetRow {
        style: RowStyle::Label,
        cells: vec![SheetCell::text(name), SheetCell::text(value)],
    }
}

fn or_missing(value: &str) -> String {
    if value.trim().is_empty() {
        MISSING.to_owned()
    } else {
        value.to_owned()
    }
}

/// Lay out the attendance sheet: a header block describing the session, then
/// a table with one row per record in the given order.
pub fn sheet_rows(session: &TrainingSession, records: &[AttendanceRecord]) -> SheetLayout {
    let trainer = if session.trainer_designation.is_empty() {
        session.trainer_name.clone()
    } else {
        format!("{}, {}", session.trainer_name, session.trainer_designation)
    };

    let mut rows = vec![
        SheetRow {
            style: RowStyle::Title,
            cells: vec![SheetCell::text("Training Record")],
        },
        SheetRow::blank(),
        label("Date of Training:", session.date.format(DAY).to_string()),
        label("Department:", session.department.as_str()),
        label("Trainer Details, Designation:", trainer),
        label("Training Type:", session.training_type.as_str()),
        label("Training Title:", session.training_title.as_str()),
        label("Training Content:", session.content.as_str()),
        label("Location:", session.location.as_str()),
        label(
            "Session Start Time:",
            session.session_start_time.format(DAY_MINUTE).to_string(),
        ),
        label(
            "Session End Time:",
            session
                .session_end_time
                .map(|t| t.format(DAY_MINUTE).to_string())
                .unwrap_or_else(|| NOT_ENDED.to_owned()),
        ),
        label(
            "Duration:",
            session.duration.as_deref().unwrap_or(NOT_ENDED),
        ),
        SheetRow::blank(),
    ];

    let table_header_row = rows.len();
    rows.push(SheetRow {
        style: RowStyle::TableHeader,
        cells: TABLE_HEADER.iter().map(|h| SheetCell::text(*h)).collect(),
    });

    rows.extend(records.iter().enumerate().map(|(i, record)| SheetRow {
        style: RowStyle::Plain,
        cells: vec![
            SheetCell::Number((i + 1) as f64),
            SheetCell::Text(or_missing(&record.student_name)),
            SheetCell::Text(or_missing(&record.job_title)),
            SheetCell::Text(record.signature.clone()),
            SheetCell::Text(or_missing(record.comments.as_deref().unwrap_or_default())),
            SheetCell::Text(record.check_in_time.format(DAY_SECOND).to_string()),
        ],
    }));

    SheetLayout {
        name: SHEET_NAME.to_owned(),
        rows,
        table_header_row,
    }
}

// ── ExportReport ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub enum ReportTarget {
    Session(SessionId),
    /// The current session of the given day.
    Day(NaiveDate),
}

/// Session exports carry the session id; day exports are named by the day.
pub fn report_filename(target: ReportTarget, session: &TrainingSession, extension: &str) -> String {
    match target {
        ReportTarget::Session(_) => format!(
            "training-attendance-{}-session-{}.{}",
            session.date, session.id, extension
        ),
        ReportTarget::Day(day) => format!("training-attendance-{day}.{extension}"),
    }
}

#[derive(Debug)]
pub struct ReportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub struct ExportReportUseCase<S: SessionRepository, A: AttendanceRepository, R: ReportRenderer> {
    pub sessions: S,
    pub attendance: A,
    pub renderer: R,
}

impl<S, A, R> ExportReportUseCase<S, A, R>
where
    S: SessionRepository,
    A: AttendanceRepository,
    R: ReportRenderer,
{
    pub async fn execute(&self, target: ReportTarget) -> Result<ReportFile, AttendanceServiceError> {
        let session = match target {
            ReportTarget::Session(id) => self.sessions.find_by_id(id).await?,
            ReportTarget::Day(day) => self.sessions.latest_on(day).await?,
        }
        .ok_or(AttendanceServiceError::SessionNotFound)?;

        let records = self.attendance.list_for_session(session.id).await?;
        let layout = sheet_rows(&session, &records);
        let renderer = self.renderer.clone();
        let bytes = task::spawn_blocking(move || renderer.render(&layout))
            .await
            .context("report rendering task panicked")??;
        info!(session_id = %session.id, records = records.len(), bytes = bytes.len(), "attendance report exported");

        Ok(ReportFile {
            filename: report_filename(target, &session, self.renderer.extension()),
            content_type: self.renderer.content_type(),
            bytes,
        })
    }
}
