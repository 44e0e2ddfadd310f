use chrono::NaiveDateTime;
use tracing::info;

use muster_domain::id::{AttendanceId, SessionId, UserId};

use crate::domain::repository::{AttendanceRepository, SessionRepository, UserRepository};
use crate::domain::types::{AttendanceRecord, NewAttendance, TrainingSession};
use crate::error::AttendanceServiceError;
use crate::usecase::non_blank;

// ── CheckIn ──────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct CheckInInput {
    /// Falls back to today's current session when absent.
    pub session_id: Option<SessionId>,
    pub student_id: UserId,
    pub comments: Option<String>,
}

#[derive(Debug)]
pub struct CheckInOutput {
    pub attendance_id: AttendanceId,
    pub session_id: SessionId,
    pub check_in_time: NaiveDateTime,
}

pub struct CheckInUseCase<S: SessionRepository, A: AttendanceRepository, U: UserRepository> {
    pub sessions: S,
    pub attendance: A,
    pub users: U,
}

impl<S, A, U> CheckInUseCase<S, A, U>
where
    S: SessionRepository,
    A: AttendanceRepository,
    U: UserRepository,
{
    pub async fn execute(
        &self,
        input: CheckInInput,
        now: NaiveDateTime,
    ) -> Result<CheckInOutput, AttendanceServiceError> {
        let session = match input.session_id {
            Some(id) => self.sessions.find_by_id(id).await?,
            None => self.sessions.latest_on(now.date()).await?,
        }
        .ok_or(AttendanceServiceError::SessionNotFound)?;

        let student = self
            .users
            .find_by_id(input.student_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or(AttendanceServiceError::StudentNotFound)?;

        if self
            .attendance
            .find_for_student(session.id, student.id)
            .await?
            .is_some()
        {
            return Err(AttendanceServiceError::AlreadyCheckedIn);
        }

        // The unique index still rejects a concurrent duplicate that passed the check above.
        let record = NewAttendance {
            session_id: session.id,
            student_id: student.id,
            check_in_time: now,
            signature: student.full_name,
            job_title: student.job_title,
            comments: non_blank(input.comments),
        };
        let attendance_id = self.attendance.insert(&record).await?;
        info!(
            attendance_id = %attendance_id,
            session_id = %session.id,
            student_id = %student.id,
            "student checked in"
        );
        Ok(CheckInOutput {
            attendance_id,
            session_id: session.id,
            check_in_time: now,
        })
    }
}

// ── SessionAttendance ────────────────────────────────────────────────────────

/// A session together with its ledger, in check-in order.
#[derive(Debug)]
pub struct SessionAttendance {
    pub session: TrainingSession,
    pub attendance: Vec<AttendanceRecord>,
}

pub struct SessionAttendanceUseCase<S: SessionRepository, A: AttendanceRepository> {
    pub sessions: S,
    pub attendance: A,
}

impl<S: SessionRepository, A: AttendanceRepository> SessionAttendanceUseCase<S, A> {
    pub async fn execute(
        &self,
        session_id: SessionId,
    ) -> Result<SessionAttendance, AttendanceServiceError> {
        let session = self
            .sessions
            .find_by_id(session_id)
            .await?
            .ok_or(AttendanceServiceError::SessionNotFound)?;
        let attendance = self.attendance.list_for_session(session.id).await?;
        Ok(SessionAttendance {
            session,
            attendance,
        })
    }
}

// ── TodayAttendance ──────────────────────────────────────────────────────────

pub struct TodayAttendanceUseCase<S: SessionRepository, A: AttendanceRepository> {
    pub sessions: S,
    pub attendance: A,
}

impl<S: SessionRepository, A: AttendanceRepository> TodayAttendanceUseCase<S, A> {
    pub async fn execute(
        &self,
        now: NaiveDateTime,
    ) -> Result<SessionAttendance, AttendanceServiceError> {
        let session = self
            .sessions
            .latest_on(now.date())
            .await?
            .ok_or(AttendanceServiceError::SessionNotFound)?;
        let attendance = self.attendance.list_for_session(session.id).await?;
        Ok(SessionAttendance {
            session,
            attendance,
        })
    }
}

// ── MyCheckIn ────────────────────────────────────────────────────────────────

pub struct MyCheckInUseCase<S: SessionRepository, A: AttendanceRepository> {
    pub sessions: S,
    pub attendance: A,
}

impl<S: SessionRepository, A: AttendanceRepository> MyCheckInUseCase<S, A> {
    pub async fn execute(
        &self,
        session_id: SessionId,
        student_id: UserId,
    ) -> Result<Option<AttendanceRecord>, AttendanceServiceError> {
        if self.sessions.find_by_id(session_id).await?.is_none() {
            return Err(AttendanceServiceError::SessionNotFound);
        }
        self.attendance
            .find_for_student(session_id, student_id)
            .await
    }
}
