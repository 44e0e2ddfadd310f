#![allow(async_fn_in_trait)]

use chrono::{DateTime, NaiveDate, Utc};

use muster_domain::id::{AttendanceId, CatalogId, SessionId, UserId};
use muster_domain::user::UserRole;

use crate::domain::types::{
    AttendanceRecord, CatalogEntry, CatalogFields, CatalogKind, NewAttendance, NewSession,
    NewUser, ProfileUpdate, SessionEnd, SheetLayout, TrainingSession, User,
};
use crate::error::AttendanceServiceError;

/// Credential store.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AttendanceServiceError>;
    /// `email` must already be lowercased.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AttendanceServiceError>;
    /// Fails with `UserAlreadyExists` when the email is taken.
    async fn create(&self, user: &NewUser) -> Result<User, AttendanceServiceError>;
    async fn list_by_role(&self, role: UserRole) -> Result<Vec<User>, AttendanceServiceError>;
    /// Returns `false` when no user has `id`. Fails with `UserAlreadyExists`
    /// when the new email belongs to another account.
    async fn update_profile(
        &self,
        id: UserId,
        profile: &ProfileUpdate,
    ) -> Result<bool, AttendanceServiceError>;
    /// Returns `false` when no user has `id`.
    async fn set_active(&self, id: UserId, active: bool) -> Result<bool, AttendanceServiceError>;
    async fn record_login(
        &self,
        id: UserId,
        at: DateTime<Utc>,
    ) -> Result<(), AttendanceServiceError>;
}

/// Session registry.
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &NewSession) -> Result<SessionId, AttendanceServiceError>;
    async fn find_by_id(
        &self,
        id: SessionId,
    ) -> Result<Option<TrainingSession>, AttendanceServiceError>;
    /// Most recently created session dated `date`.
    async fn latest_on(
        &self,
        date: NaiveDate,
    ) -> Result<Option<TrainingSession>, AttendanceServiceError>;
    /// Newest date first, then newest created.
    async fn list(&self) -> Result<Vec<TrainingSession>, AttendanceServiceError>;
    /// Set the end values only if the session is still active. Returns whether
    /// a row changed.
    async fn mark_ended(
        &self,
        id: SessionId,
        end: &SessionEnd,
    ) -> Result<bool, AttendanceServiceError>;
    /// Delete the session and its attendance atomically. Returns `false` (and
    /// changes nothing) when the session does not exist.
    async fn delete_with_attendance(&self, id: SessionId) -> Result<bool, AttendanceServiceError>;
}

/// Attendance ledger.
pub trait AttendanceRepository: Send + Sync {
    /// Fails with `AlreadyCheckedIn` when the (session, student) pair exists.
    async fn insert(&self, record: &NewAttendance) -> Result<AttendanceId, AttendanceServiceError>;
    async fn find_for_student(
        &self,
        session_id: SessionId,
        student_id: UserId,
    ) -> Result<Option<AttendanceRecord>, AttendanceServiceError>;
    /// Ordered by check-in time, then id.
    async fn list_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<AttendanceRecord>, AttendanceServiceError>;
}

/// Department, job-title and training-type lists. Names are unique per
/// catalog, deactivated entries included.
pub trait CatalogRepository: Send + Sync {
    /// Active entries ordered by name.
    async fn list_active(
        &self,
        kind: CatalogKind,
    ) -> Result<Vec<CatalogEntry>, AttendanceServiceError>;
    async fn find_by_id(
        &self,
        kind: CatalogKind,
        id: CatalogId,
    ) -> Result<Option<CatalogEntry>, AttendanceServiceError>;
    /// Rows of any state.
    async fn count(&self, kind: CatalogKind) -> Result<u64, AttendanceServiceError>;
    /// Fails with `CatalogEntryExists` when the name is taken.
    async fn create(
        &self,
        kind: CatalogKind,
        fields: &CatalogFields,
    ) -> Result<CatalogEntry, AttendanceServiceError>;
    /// Rewrites an active entry. Returns `false` when no active entry has `id`.
    async fn update(
        &self,
        kind: CatalogKind,
        id: CatalogId,
        fields: &CatalogFields,
    ) -> Result<bool, AttendanceServiceError>;
    /// Returns `false` when no active entry has `id`.
    async fn deactivate(
        &self,
        kind: CatalogKind,
        id: CatalogId,
    ) -> Result<bool, AttendanceServiceError>;
}

/// One-way password digests.
pub trait PasswordPort: Send + Sync {
    async fn hash(&self, plain: &str) -> Result<String, AttendanceServiceError>;
    /// `Ok(false)` for a wrong password; errors only for unreadable digests.
    async fn verify(&self, plain: &str, digest: &str) -> Result<bool, AttendanceServiceError>;
    /// Well-formed digest that no password matches. Verified in place of a
    /// missing or inactive account.
    fn decoy_digest(&self) -> &'static str;
}

/// Serializes an attendance sheet into a downloadable document. `render` is
/// CPU-bound and runs on the blocking pool.
pub trait ReportRenderer: Clone + Send + Sync + 'static {
    fn content_type(&self) -> &'static str;
    fn extension(&self) -> &'static str;
    fn render(&self, sheet: &SheetLayout) -> Result<Vec<u8>, AttendanceServiceError>;
}
