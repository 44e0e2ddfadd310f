use anyhow::Context as _;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, SqlErr, TransactionError,
    TransactionTrait, sea_query::Expr,
};

use muster_attendance_schema::{
    attendance, departments, job_titles, training_sessions, training_types, users,
};
use muster_core::sea_ext::DbErrExt;
use muster_domain::id::{AttendanceId, CatalogId, SessionId, UserId};
use muster_domain::user::UserRole;

use crate::domain::repository::{
    AttendanceRepository, CatalogRepository, SessionRepository, UserRepository,
};
use crate::domain::types::{
    AttendanceRecord, CatalogEntry, CatalogFields, CatalogKind, NewAttendance, NewSession,
    NewUser, ProfileUpdate, SessionEnd, TrainingSession, User,
};
use crate::error::AttendanceServiceError;

// ── User repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AttendanceServiceError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AttendanceServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &NewUser) -> Result<User, AttendanceServiceError> {
        let model = users::ActiveModel {
            id: NotSet,
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role.as_str().to_owned()),
            full_name: Set(user.full_name.clone()),
            job_title: Set(user.job_title.clone()),
            phone: Set(user.phone.clone()),
            department: Set(user.department.clone()),
            is_active: Set(true),
            last_login: Set(None),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                AttendanceServiceError::UserAlreadyExists
            } else {
                anyhow::Error::new(e).context("create user").into()
            }
        })?;
        user_from_model(model)
    }

    async fn list_by_role(&self, role: UserRole) -> Result<Vec<User>, AttendanceServiceError> {
        let models = users::Entity::find()
            .filter(users::Column::Role.eq(role.as_str()))
            .order_by_asc(users::Column::FullName)
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .context("list users by role")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn update_profile(
        &self,
        id: UserId,
        profile: &ProfileUpdate,
    ) -> Result<bool, AttendanceServiceError> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::Email, Expr::value(profile.email.clone()))
            .col_expr(users::Column::FullName, Expr::value(profile.full_name.clone()))
            .col_expr(users::Column::JobTitle, Expr::value(profile.job_title.clone()))
            .col_expr(users::Column::Phone, Expr::value(profile.phone.clone()))
            .col_expr(users::Column::Department, Expr::value(profile.department.clone()))
            .filter(users::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    AttendanceServiceError::UserAlreadyExists
                } else {
                    anyhow::Error::new(e).context("update user profile").into()
                }
            })?;
        Ok(result.rows_affected > 0)
    }

    async fn set_active(&self, id: UserId, active: bool) -> Result<bool, AttendanceServiceError> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::IsActive, Expr::value(active))
            .filter(users::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("set user active flag")?;
        Ok(result.rows_affected > 0)
    }

    async fn record_login(
        &self,
        id: UserId,
        at: DateTime<Utc>,
    ) -> Result<(), AttendanceServiceError> {
        users::Entity::update_many()
            .col_expr(users::Column::LastLogin, Expr::value(at))
            .filter(users::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("record user login")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> Result<User, AttendanceServiceError> {
    let role = model
        .role
        .parse::<UserRole>()
        .with_context(|| format!("user {} has unreadable role", model.id))?;
    Ok(User {
        id: UserId(model.id),
        email: model.email,
        password_hash: model.password_hash,
        role,
        full_name: model.full_name,
        job_title: model.job_title,
        phone: model.phone,
        department: model.department,
        is_active: model.is_active,
        last_login: model.last_login,
        created_at: model.created_at,
    })
}

// ── Session repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSessionRepository {
    pub db: DatabaseConnection,
}

impl SessionRepository for DbSessionRepository {
    async fn create(&self, session: &NewSession) -> Result<SessionId, AttendanceServiceError> {
        let model = training_sessions::ActiveModel {
            id: NotSet,
            date: Set(session.date),
            department: Set(session.department.clone()),
            location: Set(session.location.clone()),
            trainer_name: Set(session.trainer_name.clone()),
            trainer_designation: Set(session.trainer_designation.clone()),
            training_type: Set(session.training_type.clone()),
            training_title: Set(session.training_title.clone()),
            content: Set(session.content.clone()),
            session_start_time: Set(session.session_start_time),
            session_end_time: Set(None),
            duration: Set(None),
            duration_minutes: Set(None),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .context("create training session")?;
        Ok(SessionId(model.id))
    }

    async fn find_by_id(
        &self,
        id: SessionId,
    ) -> Result<Option<TrainingSession>, AttendanceServiceError> {
        let model = training_sessions::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find training session by id")?;
        Ok(model.map(session_from_model))
    }

    async fn latest_on(
        &self,
        date: NaiveDate,
    ) -> Result<Option<TrainingSession>, AttendanceServiceError> {
        let model = training_sessions::Entity::find()
            .filter(training_sessions::Column::Date.eq(date))
            .order_by_desc(training_sessions::Column::CreatedAt)
            .order_by_desc(training_sessions::Column::Id)
            .one(&self.db)
            .await
            .context("find latest training session of day")?;
        Ok(model.map(session_from_model))
    }

    async fn list(&self) -> Result<Vec<TrainingSession>, AttendanceServiceError> {
        let models = training_sessions::Entity::find()
            .order_by_desc(training_sessions::Column::Date)
            .order_by_desc(training_sessions::Column::CreatedAt)
            .order_by_desc(training_sessions::Column::Id)
            .all(&self.db)
            .await
            .context("list training sessions")?;
        Ok(models.into_iter().map(session_from_model).collect())
    }

    async fn mark_ended(
        &self,
        id: SessionId,
        end: &SessionEnd,
    ) -> Result<bool, AttendanceServiceError> {
        let result = training_sessions::Entity::update_many()
            .col_expr(
                training_sessions::Column::SessionEndTime,
                Expr::value(end.end_time),
            )
            .col_expr(
                training_sessions::Column::Duration,
                Expr::value(end.duration.clone()),
            )
            .col_expr(
                training_sessions::Column::DurationMinutes,
                Expr::value(end.duration_minutes),
            )
            .filter(training_sessions::Column::Id.eq(id.0))
            .filter(training_sessions::Column::SessionEndTime.is_null())
            .exec(&self.db)
            .await
            .context("end training session")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_with_attendance(&self, id: SessionId) -> Result<bool, AttendanceServiceError> {
        let result = self
            .db
            .transaction::<_, (), DbErr>(move |txn| {
                Box::pin(async move {
                    attendance::Entity::delete_many()
                        .filter(attendance::Column::SessionId.eq(id.0))
                        .exec(txn)
                        .await?;
                    let deleted = training_sessions::Entity::delete_by_id(id.0)
                        .exec(txn)
                        .await?;
                    if deleted.rows_affected == 0 {
                        // Roll back rather than commit a no-op.
                        return Err(DbErr::RecordNotFound(format!("training session {id}")));
                    }
                    Ok(())
                })
            })
            .await;
        match result {
            Ok(()) => Ok(true),
            Err(TransactionError::Transaction(DbErr::RecordNotFound(_))) => Ok(false),
            Err(e) => Err(anyhow::Error::new(e)
                .context("delete training session")
                .into()),
        }
    }
}

fn session_from_model(model: training_sessions::Model) -> TrainingSession {
    TrainingSession {
        id: SessionId(model.id),
        date: model.date,
        department: model.department,
        location: model.location,
        trainer_name: model.trainer_name,
        trainer_designation: model.trainer_designation,
        training_type: model.training_type,
        training_title: model.training_title,
        content: model.content,
        session_start_time: model.session_start_time,
        session_end_time: model.session_end_time,
        duration: model.duration,
        duration_minutes: model.duration_minutes,
        created_at: model.created_at,
    }
}

// ── Attendance repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAttendanceRepository {
    pub db: DatabaseConnection,
}

impl AttendanceRepository for DbAttendanceRepository {
    async fn insert(&self, record: &NewAttendance) -> Result<AttendanceId, AttendanceServiceError> {
        let model = attendance::ActiveModel {
            id: NotSet,
            session_id: Set(record.session_id.0),
            student_id: Set(record.student_id.0),
            check_in_time: Set(record.check_in_time),
            signature: Set(record.signature.clone()),
            job_title: Set(record.job_title.clone()),
            comments: Set(record.comments.clone()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AttendanceServiceError::AlreadyCheckedIn,
            // The session was deleted between lookup and insert.
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AttendanceServiceError::SessionNotFound
            }
            _ => anyhow::Error::new(e).context("insert attendance").into(),
        })?;
        Ok(AttendanceId(model.id))
    }

    async fn find_for_student(
        &self,
        session_id: SessionId,
        student_id: UserId,
    ) -> Result<Option<AttendanceRecord>, AttendanceServiceError> {
        let model = attendance::Entity::find()
            .filter(attendance::Column::SessionId.eq(session_id.0))
            .filter(attendance::Column::StudentId.eq(student_id.0))
            .one(&self.db)
            .await
            .context("find attendance for student")?;
        Ok(model.map(attendance_from_model))
    }

    async fn list_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<AttendanceRecord>, AttendanceServiceError> {
        let models = attendance::Entity::find()
            .filter(attendance::Column::SessionId.eq(session_id.0))
            .order_by_asc(attendance::Column::CheckInTime)
            .order_by_asc(attendance::Column::Id)
            .all(&self.db)
            .await
            .context("list attendance for session")?;
        Ok(models.into_iter().map(attendance_from_model).collect())
    }
}

/// Names are read from the check-in snapshot; later profile edits do not
/// rewrite attendance history.
fn attendance_from_model(model: attendance::Model) -> AttendanceRecord {
    AttendanceRecord {
        id: AttendanceId(model.id),
        session_id: SessionId(model.session_id),
        student_id: UserId(model.student_id),
        student_name: model.signature.clone(),
        check_in_time: model.check_in_time,
        signature: model.signature,
        job_title: model.job_title,
        comments: model.comments,
    }
}

// ── Catalog repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCatalogRepository {
    pub db: DatabaseConnection,
}

fn catalog_write_error(e: DbErr, what: &'static str) -> AttendanceServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AttendanceServiceError::CatalogEntryExists,
        // The department row vanished after validation.
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            AttendanceServiceError::DepartmentNotFound
        }
        _ => anyhow::Error::new(e).context(what).into(),
    }
}

impl CatalogRepository for DbCatalogRepository {
    async fn list_active(
        &self,
        kind: CatalogKind,
    ) -> Result<Vec<CatalogEntry>, AttendanceServiceError> {
        let entries = match kind {
            CatalogKind::Department => departments::Entity::find()
                .filter(departments::Column::IsActive.eq(true))
                .order_by_asc(departments::Column::Name)
                .all(&self.db)
                .await
                .context("list departments")?
                .into_iter()
                .map(department_from_model)
                .collect(),
            CatalogKind::JobTitle => job_titles::Entity::find()
                .find_also_related(departments::Entity)
                .filter(job_titles::Column::IsActive.eq(true))
                .order_by_asc(job_titles::Column::Title)
                .all(&self.db)
                .await
                .context("list job titles")?
                .into_iter()
                .map(|(model, department)| job_title_from_model(model, department))
                .collect(),
            CatalogKind::TrainingType => training_types::Entity::find()
                .filter(training_types::Column::IsActive.eq(true))
                .order_by_asc(training_types::Column::Name)
                .all(&self.db)
                .await
                .context("list training types")?
                .into_iter()
                .map(training_type_from_model)
                .collect(),
        };
        Ok(entries)
    }

    async fn find_by_id(
        &self,
        kind: CatalogKind,
        id: CatalogId,
    ) -> Result<Option<CatalogEntry>, AttendanceServiceError> {
        let entry = match kind {
            CatalogKind::Department => departments::Entity::find_by_id(id.0)
                .one(&self.db)
                .await
                .context("find department")?
                .map(department_from_model),
            CatalogKind::JobTitle => job_titles::Entity::find_by_id(id.0)
                .find_also_related(departments::Entity)
                .one(&self.db)
                .await
                .context("find job title")?
                .map(|(model, department)| job_title_from_model(model, department)),
            CatalogKind::TrainingType => training_types::Entity::find_by_id(id.0)
                .one(&self.db)
                .await
                .context("find training type")?
                .map(training_type_from_model),
        };
        Ok(entry)
    }

    async fn count(&self, kind: CatalogKind) -> Result<u64, AttendanceServiceError> {
        let count = match kind {
            CatalogKind::Department => departments::Entity::find().count(&self.db).await,
            CatalogKind::JobTitle => job_titles::Entity::find().count(&self.db).await,
            CatalogKind::TrainingType => training_types::Entity::find().count(&self.db).await,
        }
        .context("count catalog entries")?;
        Ok(count)
    }

    async fn create(
        &self,
        kind: CatalogKind,
        fields: &CatalogFields,
    ) -> Result<CatalogEntry, AttendanceServiceError> {
        let now = Utc::now();
        match kind {
            CatalogKind::Department => {
                let model = departments::ActiveModel {
                    id: NotSet,
                    name: Set(fields.name.clone()),
                    description: Set(fields.description.clone()),
                    is_active: Set(true),
                    created_at: Set(now),
                }
                .insert(&self.db)
                .await
                .map_err(|e| catalog_write_error(e, "create department"))?;
                Ok(department_from_model(model))
            }
            CatalogKind::JobTitle => {
                let model = job_titles::ActiveModel {
                    id: NotSet,
                    title: Set(fields.name.clone()),
                    department_id: Set(fields.department_id.map(|id| id.0)),
                    is_active: Set(true),
                    created_at: Set(now),
                }
                .insert(&self.db)
                .await
                .map_err(|e| catalog_write_error(e, "create job title"))?;
                let entry = self
                    .find_by_id(kind, CatalogId(model.id))
                    .await?
                    .with_context(|| format!("job title {} missing after insert", model.id))?;
                Ok(entry)
            }
            CatalogKind::TrainingType => {
                let model = training_types::ActiveModel {
                    id: NotSet,
                    name: Set(fields.name.clone()),
                    description: Set(fields.description.clone()),
                    is_active: Set(true),
                    created_at: Set(now),
                }
                .insert(&self.db)
                .await
                .map_err(|e| catalog_write_error(e, "create training type"))?;
                Ok(training_type_from_model(model))
            }
        }
    }

    async fn update(
        &self,
        kind: CatalogKind,
        id: CatalogId,
        fields: &CatalogFields,
    ) -> Result<bool, AttendanceServiceError> {
        let result = match kind {
            CatalogKind::Department => departments::Entity::update_many()
                .col_expr(departments::Column::Name, Expr::value(fields.name.clone()))
                .col_expr(
                    departments::Column::Description,
                    Expr::value(fields.description.clone()),
                )
                .filter(departments::Column::Id.eq(id.0))
                .filter(departments::Column::IsActive.eq(true))
                .exec(&self.db)
                .await
                .map_err(|e| catalog_write_error(e, "update department"))?,
            CatalogKind::JobTitle => job_titles::Entity::update_many()
                .col_expr(job_titles::Column::Title, Expr::value(fields.name.clone()))
                .col_expr(
                    job_titles::Column::DepartmentId,
                    Expr::value(fields.department_id.map(|id| id.0)),
                )
                .filter(job_titles::Column::Id.eq(id.0))
                .filter(job_titles::Column::IsActive.eq(true))
                .exec(&self.db)
                .await
                .map_err(|e| catalog_write_error(e, "update job title"))?,
            CatalogKind::TrainingType => training_types::Entity::update_many()
                .col_expr(training_types::Column::Name, Expr::value(fields.name.clone()))
                .col_expr(
                    training_types::Column::Description,
                    Expr::value(fields.description.clone()),
                )
                .filter(training_types::Column::Id.eq(id.0))
                .filter(training_types::Column::IsActive.eq(true))
                .exec(&self.db)
                .await
                .map_err(|e| catalog_write_error(e, "update training type"))?,
        };
        Ok(result.rows_affected > 0)
    }

    async fn deactivate(
        &self,
        kind: CatalogKind,
        id: CatalogId,
    ) -> Result<bool, AttendanceServiceError> {
        let result = match kind {
            CatalogKind::Department => departments::Entity::update_many()
                .col_expr(departments::Column::IsActive, Expr::value(false))
                .filter(departments::Column::Id.eq(id.0))
                .filter(departments::Column::IsActive.eq(true))
                .exec(&self.db)
                .await,
            CatalogKind::JobTitle => job_titles::Entity::update_many()
                .col_expr(job_titles::Column::IsActive, Expr::value(false))
                .filter(job_titles::Column::Id.eq(id.0))
                .filter(job_titles::Column::IsActive.eq(true))
                .exec(&self.db)
                .await,
            CatalogKind::TrainingType => training_types::Entity::update_many()
                .col_expr(training_types::Column::IsActive, Expr::value(false))
                .filter(training_types::Column::Id.eq(id.0))
                .filter(training_types::Column::IsActive.eq(true))
                .exec(&self.db)
                .await,
        }
        .context("deactivate catalog entry")?;
        Ok(result.rows_affected > 0)
    }
}

fn department_from_model(model: departments::Model) -> CatalogEntry {
    CatalogEntry {
        id: CatalogId(model.id),
        kind: CatalogKind::Department,
        name: model.name,
        description: model.description,
        department_id: None,
        department_name: None,
        is_active: model.is_active,
        created_at: model.created_at,
    }
}

fn job_title_from_model(
    model: job_titles::Model,
    department: Option<departments::Model>,
) -> CatalogEntry {
    CatalogEntry {
        id: CatalogId(model.id),
        kind: CatalogKind::JobTitle,
        name: model.title,
        description: None,
        department_id: model.department_id.map(CatalogId),
        department_name: department.map(|d| d.name),
        is_active: model.is_active,
        created_at: model.created_at,
    }
}

fn training_type_from_model(model: training_types::Model) -> CatalogEntry {
    CatalogEntry {
        id: CatalogId(model.id),
        kind: CatalogKind::TrainingType,
        name: model.name,
        description: model.description,
        department_id: None,
        department_name: None,
        is_active: model.is_active,
        created_at: model.created_at,
    }
}
