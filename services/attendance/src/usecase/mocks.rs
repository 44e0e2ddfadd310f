//! In-memory repositories for use-case tests.

use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use muster_domain::clock::{parse_date, parse_wall_clock};
use muster_domain::id::{AttendanceId, CatalogId, SessionId, UserId};
use muster_domain::user::UserRole;

use crate::domain::repository::{
    AttendanceRepository, CatalogRepository, PasswordPort, SessionRepository, UserRepository,
};
use crate::domain::types::{
    AttendanceRecord, CatalogEntry, CatalogFields, CatalogKind, NewAttendance, NewSession,
    NewUser, ProfileUpdate, SessionEnd, TrainingSession, User,
};
use crate::error::AttendanceServiceError;

pub fn at(s: &str) -> NaiveDateTime {
    parse_wall_clock(s).unwrap()
}

pub fn day(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

/// Strictly increasing creation instants so ordering is deterministic.
fn created_at(seq: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + seq, 0).unwrap()
}

// ── Sessions ────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockSessionRepo {
    sessions: Mutex<Vec<TrainingSession>>,
    lose_end_race: Mutex<bool>,
}

impl MockSessionRepo {
    pub fn seed(&self, date: &str, start: &str) -> SessionId {
        let mut sessions = self.sessions.lock().unwrap();
        let id = SessionId(sessions.len() as i64 + 1);
        sessions.push(TrainingSession {
            id,
            date: day(date),
            department: "Manufacturing Facility".into(),
            location: "Manufacturing Facility".into(),
            trainer_name: "Dana Reyes".into(),
            trainer_designation: "Safety Lead".into(),
            training_type: "Code of Conduct - Daily Orientation".into(),
            training_title: "Code of Conduct - Daily Orientation".into(),
            content: String::new(),
            session_start_time: at(start),
            session_end_time: None,
            duration: None,
            duration_minutes: None,
            created_at: created_at(id.0),
        });
        id
    }

    pub fn get(&self, id: SessionId) -> Option<TrainingSession> {
        self.sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    pub fn all(&self) -> Vec<TrainingSession> {
        self.sessions.lock().unwrap().clone()
    }

    /// Make the next `mark_ended` behave as if another caller ended it first.
    pub fn lose_next_end_race(&self) {
        *self.lose_end_race.lock().unwrap() = true;
    }
}

impl SessionRepository for MockSessionRepo {
    async fn create(&self, session: &NewSession) -> Result<SessionId, AttendanceServiceError> {
        let mut sessions = self.sessions.lock().unwrap();
        let id = SessionId(sessions.len() as i64 + 1);
        sessions.push(TrainingSession {
            id,
            date: session.date,
            department: session.department.clone(),
            location: session.location.clone(),
            trainer_name: session.trainer_name.clone(),
            trainer_designation: session.trainer_designation.clone(),
            training_type: session.training_type.clone(),
            training_title: session.training_title.clone(),
            content: session.content.clone(),
            session_start_time: session.session_start_time,
            session_end_time: None,
            duration: None,
            duration_minutes: None,
            created_at: created_at(id.0),
        });
        Ok(id)
    }

    async fn find_by_id(
        &self,
        id: SessionId,
    ) -> Result<Option<TrainingSession>, AttendanceServiceError> {
        Ok(self.get(id))
    }

    async fn latest_on(
        &self,
        date: NaiveDate,
    ) -> Result<Option<TrainingSession>, AttendanceServiceError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.date == date)
            .max_by_key(|s| (s.created_at, s.id))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<TrainingSession>, AttendanceServiceError> {
        let mut sessions = self.all();
        sessions.sort_by(|a, b| {
            (b.date, b.created_at, b.id).cmp(&(a.date, a.created_at, a.id))
        });
        Ok(sessions)
    }

    async fn mark_ended(
        &self,
        id: SessionId,
        end: &SessionEnd,
    ) -> Result<bool, AttendanceServiceError> {
        if std::mem::take(&mut *self.lose_end_race.lock().unwrap()) {
            return Ok(false);
        }
        let mut sessions = self.sessions.lock().unwrap();
        match sessions
            .iter_mut()
            .find(|s| s.id == id && s.session_end_time.is_none())
        {
            Some(session) => {
                session.session_end_time = Some(end.end_time);
                session.duration = Some(end.duration.clone());
                session.duration_minutes = Some(end.duration_minutes);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_with_attendance(&self, id: SessionId) -> Result<bool, AttendanceServiceError> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| s.id != id);
        Ok(sessions.len() < before)
    }
}

// ── Attendance ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockAttendanceRepo {
    records: Mutex<Vec<AttendanceRecord>>,
    hide_existing: bool,
}

impl MockAttendanceRepo {
    /// Lookups never see existing rows, so only the insert-time guard can
    /// catch a duplicate.
    pub fn hiding_existing() -> Self {
        Self {
            hide_existing: true,
            ..Default::default()
        }
    }

    pub fn all(&self) -> Vec<AttendanceRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl AttendanceRepository for MockAttendanceRepo {
    async fn insert(&self, record: &NewAttendance) -> Result<AttendanceId, AttendanceServiceError> {
        let mut records = self.records.lock().unwrap();
        if records
            .iter()
            .any(|r| r.session_id == record.session_id && r.student_id == record.student_id)
        {
            return Err(AttendanceServiceError::AlreadyCheckedIn);
        }
        let id = AttendanceId(records.len() as i64 + 1);
        records.push(AttendanceRecord {
            id,
            session_id: record.session_id,
            student_id: record.student_id,
            student_name: record.signature.clone(),
            check_in_time: record.check_in_time,
            signature: record.signature.clone(),
            job_title: record.job_title.clone(),
            comments: record.comments.clone(),
        });
        Ok(id)
    }

    async fn find_for_student(
        &self,
        session_id: SessionId,
        student_id: UserId,
    ) -> Result<Option<AttendanceRecord>, AttendanceServiceError> {
        if self.hide_existing {
            return Ok(None);
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.session_id == session_id && r.student_id == student_id)
            .cloned())
    }

    async fn list_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<AttendanceRecord>, AttendanceServiceError> {
        let mut records: Vec<_> = self
            .all()
            .into_iter()
            .filter(|r| r.session_id == session_id)
            .collect();
        records.sort_by_key(|r| (r.check_in_time, r.id));
        Ok(records)
    }
}

// ── Users ───────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockUserRepo {
    users: Mutex<Vec<User>>,
}

pub fn test_user(id: i64, role: UserRole, name: &str) -> User {
    User {
        id: UserId(id),
        email: format!("user{id}@training.com"),
        password_hash: MockPasswords::digest("secret123"),
        role,
        full_name: name.to_owned(),
        job_title: "Operator".to_owned(),
        phone: String::new(),
        department: "Assembly".to_owned(),
        is_active: true,
        last_login: None,
        created_at: created_at(id),
    }
}

impl MockUserRepo {
    pub fn with(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }

    pub fn get(&self, id: UserId) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    pub fn all(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AttendanceServiceError> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AttendanceServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, AttendanceServiceError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AttendanceServiceError::UserAlreadyExists);
        }
        let id = users.iter().map(|u| u.id.0).max().unwrap_or(0) + 1;
        let created = User {
            id: UserId(id),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
            full_name: user.full_name.clone(),
            job_title: user.job_title.clone(),
            phone: user.phone.clone(),
            department: user.department.clone(),
            is_active: true,
            last_login: None,
            created_at: created_at(id),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn list_by_role(&self, role: UserRole) -> Result<Vec<User>, AttendanceServiceError> {
        Ok(self.all().into_iter().filter(|u| u.role == role).collect())
    }

    async fn update_profile(
        &self,
        id: UserId,
        profile: &ProfileUpdate,
    ) -> Result<bool, AttendanceServiceError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.id != id && u.email == profile.email) {
            return Err(AttendanceServiceError::UserAlreadyExists);
        }
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.email = profile.email.clone();
                user.full_name = profile.full_name.clone();
                user.job_title = profile.job_title.clone();
                user.phone = profile.phone.clone();
                user.department = profile.department.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_active(&self, id: UserId, active: bool) -> Result<bool, AttendanceServiceError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.is_active = active;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn record_login(
        &self,
        id: UserId,
        at: DateTime<Utc>,
    ) -> Result<(), AttendanceServiceError> {
        if let Some(user) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            user.last_login = Some(at);
        }
        Ok(())
    }
}

// ── Catalogs ────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockCatalogRepo {
    entries: Mutex<Vec<CatalogEntry>>,
}

impl MockCatalogRepo {
    pub fn all(&self, kind: CatalogKind) -> Vec<CatalogEntry> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect()
    }

    pub fn get(&self, kind: CatalogKind, id: CatalogId) -> Option<CatalogEntry> {
        self.all(kind).into_iter().find(|e| e.id == id)
    }

    fn department_name(entries: &[CatalogEntry], id: Option<CatalogId>) -> Option<String> {
        let id = id?;
        entries
            .iter()
            .find(|e| e.kind == CatalogKind::Department && e.id == id)
            .map(|e| e.name.clone())
    }
}

impl CatalogRepository for MockCatalogRepo {
    async fn list_active(
        &self,
        kind: CatalogKind,
    ) -> Result<Vec<CatalogEntry>, AttendanceServiceError> {
        let mut entries: Vec<_> = self.all(kind).into_iter().filter(|e| e.is_active).collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn find_by_id(
        &self,
        kind: CatalogKind,
        id: CatalogId,
    ) -> Result<Option<CatalogEntry>, AttendanceServiceError> {
        Ok(self.get(kind, id))
    }

    async fn count(&self, kind: CatalogKind) -> Result<u64, AttendanceServiceError> {
        Ok(self.all(kind).len() as u64)
    }

    async fn create(
        &self,
        kind: CatalogKind,
        fields: &CatalogFields,
    ) -> Result<CatalogEntry, AttendanceServiceError> {
        let mut entries = self.entries.lock().unwrap();
        if entries.iter().any(|e| e.kind == kind && e.name == fields.name) {
            return Err(AttendanceServiceError::CatalogEntryExists);
        }
        let id = entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.id.0)
            .max()
            .unwrap_or(0)
            + 1;
        let entry = CatalogEntry {
            id: CatalogId(id),
            kind,
            name: fields.name.clone(),
            description: fields.description.clone(),
            department_id: fields.department_id,
            department_name: Self::department_name(&entries, fields.department_id),
            is_active: true,
            created_at: created_at(id),
        };
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn update(
        &self,
        kind: CatalogKind,
        id: CatalogId,
        fields: &CatalogFields,
    ) -> Result<bool, AttendanceServiceError> {
        let mut entries = self.entries.lock().unwrap();
        if entries
            .iter()
            .any(|e| e.kind == kind && e.id != id && e.name == fields.name)
        {
            return Err(AttendanceServiceError::CatalogEntryExists);
        }
        let department_name = Self::department_name(&entries, fields.department_id);
        match entries
            .iter_mut()
            .find(|e| e.kind == kind && e.id == id && e.is_active)
        {
            Some(entry) => {
                entry.name = fields.name.clone();
                entry.description = fields.description.clone();
                entry.department_id = fields.department_id;
                entry.department_name = department_name;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn deactivate(
        &self,
        kind: CatalogKind,
        id: CatalogId,
    ) -> Result<bool, AttendanceServiceError> {
        let mut entries = self.entries.lock().unwrap();
        match entries
            .iter_mut()
            .find(|e| e.kind == kind && e.id == id && e.is_active)
        {
            Some(entry) => {
                entry.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── Passwords ───────────────────────────────────────────────────────────────

/// Reversible stand-in for argon2: digest is `plain:<password>`. Records
/// every digest passed to `verify`.
#[derive(Default)]
pub struct MockPasswords {
    verified: Mutex<Vec<String>>,
}

impl MockPasswords {
    pub fn digest(plain: &str) -> String {
        format!("plain:{plain}")
    }

    pub fn verified(&self) -> Vec<String> {
        self.verified.lock().unwrap().clone()
    }
}

impl PasswordPort for MockPasswords {
    async fn hash(&self, plain: &str) -> Result<String, AttendanceServiceError> {
        Ok(Self::digest(plain))
    }

    async fn verify(&self, plain: &str, digest: &str) -> Result<bool, AttendanceServiceError> {
        self.verified.lock().unwrap().push(digest.to_owned());
        match digest.strip_prefix("plain:") {
            Some(expected) => Ok(expected == plain),
            None => Err(anyhow::anyhow!("unreadable digest").into()),
        }
    }

    /// Matches only the empty password, which login never verifies.
    fn decoy_digest(&self) -> &'static str {
        "plain:"
    }
}
