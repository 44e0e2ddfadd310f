use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, warn};

use muster_domain::clock::{parse_date, parse_wall_clock};
use muster_domain::id::SessionId;

use crate::domain::repository::SessionRepository;
use crate::domain::types::{NewSession, SessionDefaults, SessionEnd, TrainingSession};
use crate::error::AttendanceServiceError;
use crate::usecase::non_blank;

// ── CreateSession ────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct CreateSessionInput {
    pub date: Option<String>,
    pub trainer_name: Option<String>,
    pub trainer_designation: Option<String>,
    pub session_start_time: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub training_type: Option<String>,
    pub training_title: Option<String>,
    pub content: Option<String>,
}

pub struct CreateSessionUseCase<S: SessionRepository> {
    pub repo: S,
    pub defaults: SessionDefaults,
}

impl<S: SessionRepository> CreateSessionUseCase<S> {
    pub async fn execute(
        &self,
        input: CreateSessionInput,
        now: NaiveDateTime,
    ) -> Result<SessionId, AttendanceServiceError> {
        let trainer_name =
            non_blank(input.trainer_name).ok_or(AttendanceServiceError::MissingTrainerName)?;

        let date = match non_blank(input.date) {
            Some(raw) => parse_date(&raw).ok_or(AttendanceServiceError::InvalidDate)?,
            None => now.date(),
        };
        let session_start_time = match non_blank(input.session_start_time) {
            Some(raw) => parse_wall_clock(&raw).ok_or(AttendanceServiceError::InvalidStartTime)?,
            None => now,
        };

        let defaults = &self.defaults;
        let session = NewSession {
            date,
            department: non_blank(input.department)
                .unwrap_or_else(|| defaults.department.clone()),
            location: non_blank(input.location).unwrap_or_else(|| defaults.location.clone()),
            trainer_name,
            trainer_designation: non_blank(input.trainer_designation).unwrap_or_default(),
            training_type: non_blank(input.training_type)
                .unwrap_or_else(|| defaults.training_type.clone()),
            training_title: non_blank(input.training_title)
                .unwrap_or_else(|| defaults.training_title.clone()),
            content: non_blank(input.content).unwrap_or_default(),
            session_start_time,
        };

        let id = self.repo.create(&session).await?;
        info!(session_id = %id, date = %session.date, trainer = %session.trainer_name, "training session created");
        Ok(id)
    }
}

// ── EndSession ───────────────────────────────────────────────────────────────

pub struct EndSessionUseCase<S: SessionRepository> {
    pub repo: S,
}

impl<S: SessionRepository> EndSessionUseCase<S> {
    pub async fn execute(
        &self,
        id: SessionId,
        now: NaiveDateTime,
    ) -> Result<SessionEnd, AttendanceServiceError> {
        let session = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AttendanceServiceError::SessionNotFound)?;
        if session.session_end_time.is_some() {
            return Err(AttendanceServiceError::SessionAlreadyEnded);
        }

        let (end, clamped) = SessionEnd::compute(session.session_start_time, now);
        if clamped {
            warn!(
                session_id = %id,
                start = %session.session_start_time,
                end = %now,
                "session ends before it starts; duration clamped to 0"
            );
        }

        // A concurrent end between the read and this write leaves no matching row.
        if !self.repo.mark_ended(id, &end).await? {
            return Err(AttendanceServiceError::SessionAlreadyEnded);
        }
        info!(session_id = %id, duration_minutes = end.duration_minutes, "training session ended");
        Ok(end)
    }
}

// ── DeleteSession ────────────────────────────────────────────────────────────

pub struct DeleteSessionUseCase<S: SessionRepository> {
    pub repo: S,
}

impl<S: SessionRepository> DeleteSessionUseCase<S> {
    pub async fn execute(&self, id: SessionId) -> Result<(), AttendanceServiceError> {
        if !self.repo.delete_with_attendance(id).await? {
            return Err(AttendanceServiceError::SessionNotFound);
        }
        info!(session_id = %id, "training session deleted");
        Ok(())
    }
}

// ── ResolveCurrentSession ────────────────────────────────────────────────────

pub struct ResolveCurrentSessionUseCase<S: SessionRepository> {
    pub repo: S,
}

impl<S: SessionRepository> ResolveCurrentSessionUseCase<S> {
    pub async fn execute(
        &self,
        today: NaiveDate,
    ) -> Result<Option<TrainingSession>, AttendanceServiceError> {
        self.repo.latest_on(today).await
    }
}

// ── ListSessions ─────────────────────────────────────────────────────────────

pub struct ListSessionsUseCase<S: SessionRepository> {
    pub repo: S,
}

impl<S: SessionRepository> ListSessionsUseCase<S> {
    pub async fn execute(&self) -> Result<Vec<TrainingSession>, AttendanceServiceError> {
        self.repo.list().await
    }
}
