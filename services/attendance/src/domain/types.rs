use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use muster_domain::id::{AttendanceId, CatalogId, SessionId, UserId};
use muster_domain::user::UserRole;

// ── Users ───────────────────────────────────────────────────────────────────

/// Stored account. `password_hash` is an argon2 PHC string.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub full_name: String,
    pub job_title: String,
    pub phone: String,
    pub department: String,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Account to be inserted; the email is already normalized and the password hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub full_name: String,
    pub job_title: String,
    pub phone: String,
    pub department: String,
}

/// Editable profile of an existing account. Every field is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub email: String,
    pub full_name: String,
    pub job_title: String,
    pub phone: String,
    pub department: String,
}

// ── Training sessions ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    Ended,
}

impl SessionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Ended => "ended",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingSession {
    pub id: SessionId,
    pub date: NaiveDate,
    pub department: String,
    pub location: String,
    pub trainer_name: String,
    pub trainer_designation: String,
    pub training_type: String,
    pub training_title: String,
    pub content: String,
    pub session_start_time: NaiveDateTime,
    pub session_end_time: Option<NaiveDateTime>,
    pub duration: Option<String>,
    pub duration_minutes: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl TrainingSession {
    pub fn status(&self) -> SessionStatus {
        if self.session_end_time.is_some() {
            SessionStatus::Ended
        } else {
            SessionStatus::Active
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewSession {
    pub date: NaiveDate,
    pub department: String,
    pub location: String,
    pub trainer_name: String,
    pub trainer_designation: String,
    pub training_type: String,
    pub training_title: String,
    pub content: String,
    pub session_start_time: NaiveDateTime,
}

/// Values substituted for session fields the creator leaves blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDefaults {
    pub department: String,
    pub location: String,
    pub training_type: String,
    pub training_title: String,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            department: "Manufacturing Facility".to_owned(),
            location: "Manufacturing Facility".to_owned(),
            training_type: "Code of Conduct - Daily Orientation".to_owned(),
            training_title: "Code of Conduct - Daily Orientation".to_owned(),
        }
    }
}

/// End-of-session values written in one conditional update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEnd {
    pub end_time: NaiveDateTime,
    pub duration: String,
    pub duration_minutes: i64,
}

impl SessionEnd {
    /// Whole minutes between `start` and `end`, rounded down. An `end` before
    /// `start` yields zero; the second value reports whether that happened.
    pub fn compute(start: NaiveDateTime, end: NaiveDateTime) -> (Self, bool) {
        let seconds = (end - start).num_seconds();
        let clamped = seconds < 0;
        let duration_minutes = if clamped { 0 } else { seconds / 60 };
        let duration = format!(
            "{} - {} ({} min.)",
            start.format("%H:%M"),
            end.format("%H:%M"),
            duration_minutes
        );
        (
            Self {
                end_time: end,
                duration,
                duration_minutes,
            },
            clamped,
        )
    }
}

// ── Attendance ──────────────────────────────────────────────────────────────

/// A stored check-in. `student_name` and `signature` hold the display name
/// captured at check-in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub session_id: SessionId,
    pub student_id: UserId,
    pub student_name: String,
    pub check_in_time: NaiveDateTime,
    pub signature: String,
    pub job_title: String,
    pub comments: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub session_id: SessionId,
    pub student_id: UserId,
    pub check_in_time: NaiveDateTime,
    pub signature: String,
    pub job_title: String,
    pub comments: Option<String>,
}

// ── Catalogs ────────────────────────────────────────────────────────────────

/// Reference lists offered when filling in sessions and profiles. Values are
/// suggestions; sessions and users store plain strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Department,
    JobTitle,
    TrainingType,
}

impl CatalogKind {
    pub const ALL: [Self; 3] = [Self::Department, Self::JobTitle, Self::TrainingType];

    /// URL segment under `/api/admin/`.
    pub fn path(self) -> &'static str {
        match self {
            Self::Department => "departments",
            Self::JobTitle => "job-titles",
            Self::TrainingType => "training-types",
        }
    }

    pub fn from_path(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.path() == segment)
    }

    /// Job titles carry a department; the other catalogs carry a description.
    pub fn has_department(self) -> bool {
        self == Self::JobTitle
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: CatalogId,
    pub kind: CatalogKind,
    pub name: String,
    pub description: Option<String>,
    pub department_id: Option<CatalogId>,
    pub department_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Values written on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFields {
    pub name: String,
    pub description: Option<String>,
    pub department_id: Option<CatalogId>,
}

// ── Report ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum SheetCell {
    Text(String),
    Number(f64),
}

impl SheetCell {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Plain,
    Title,
    Label,
    TableHeader,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub style: RowStyle,
    pub cells: Vec<SheetCell>,
}

impl SheetRow {
    pub fn blank() -> Self {
        Self {
            style: RowStyle::Plain,
            cells: Vec::new(),
        }
    }
}

/// Renderer-agnostic attendance sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub name: String,
    pub rows: Vec<SheetRow>,
    /// Row index of the table header; data rows follow it.
    pub table_header_row: usize,
}
