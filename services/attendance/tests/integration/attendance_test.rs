use futures::future::join_all;
use sea_orm::DatabaseConnection;

use muster_attendance::domain::repository::{AttendanceRepository, UserRepository};
use muster_attendance::domain::types::{NewAttendance, ProfileUpdate};
use muster_attendance::error::AttendanceServiceError;
use muster_attendance::infra::db::{DbAttendanceRepository, DbSessionRepository, DbUserRepository};
use muster_attendance::usecase::account::SetActiveUseCase;
use muster_attendance::usecase::attendance::{
    CheckInInput, CheckInUseCase, MyCheckInUseCase, SessionAttendanceUseCase,
    TodayAttendanceUseCase,
};
use muster_domain::id::{SessionId, UserId};

use crate::helpers::{at, day, seed_session_with_id, seed_student_with_id, test_db};

fn check_in_usecase(
    db: &DatabaseConnection,
) -> CheckInUseCase<DbSessionRepository, DbAttendanceRepository, DbUserRepository> {
    CheckInUseCase {
        sessions: DbSessionRepository { db: db.clone() },
        attendance: DbAttendanceRepository { db: db.clone() },
        users: DbUserRepository { db: db.clone() },
    }
}

fn input(session_id: Option<SessionId>, student_id: UserId) -> CheckInInput {
    CheckInInput {
        session_id,
        student_id,
        comments: None,
    }
}

// ── CheckIn ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_duplicate_check_in_for_same_session() {
    let db = test_db().await;
    let session = seed_session_with_id(&db, 7, day("2024-01-10"), at("2024-01-10 10:30:00")).await;
    let student = seed_student_with_id(&db, 42, "Maria Lopez").await;
    let usecase = check_in_usecase(&db);

    let first = usecase
        .execute(
            CheckInInput {
                session_id: Some(session),
                student_id: student,
                comments: Some("  arrived early ".to_owned()),
            },
            at("2024-01-10 10:35:00"),
        )
        .await
        .unwrap();
    assert_eq!(first.session_id, session);
    assert_eq!(first.check_in_time, at("2024-01-10 10:35:00"));

    let second = usecase
        .execute(input(Some(session), student), at("2024-01-10 10:40:00"))
        .await;
    assert!(
        matches!(second, Err(AttendanceServiceError::AlreadyCheckedIn)),
        "expected AlreadyCheckedIn, got {second:?}"
    );

    let ledger = DbAttendanceRepository { db: db.clone() };
    let records = ledger.list_for_session(session).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, first.attendance_id);
    assert_eq!(records[0].student_name, "Maria Lopez");
    assert_eq!(records[0].signature, "Maria Lopez");
    assert_eq!(records[0].job_title, "Line Worker");
    assert_eq!(records[0].comments.as_deref(), Some("arrived early"));
}

#[tokio::test]
async fn should_keep_exactly_one_record_under_concurrent_check_ins() {
    let db = test_db().await;
    let session = seed_session_with_id(&db, 7, day("2024-01-10"), at("2024-01-10 10:30:00")).await;
    let student = seed_student_with_id(&db, 42, "Maria Lopez").await;
    let usecase = check_in_usecase(&db);

    let results = join_all(
        (0..8).map(|_| usecase.execute(input(Some(session), student), at("2024-01-10 10:35:00"))),
    )
    .await;

    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert!(
        results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, AttendanceServiceError::AlreadyCheckedIn))
    );

    let ledger = DbAttendanceRepository { db };
    assert_eq!(ledger.list_for_session(session).await.unwrap().len(), 1);
}

#[tokio::test]
async fn should_let_same_student_check_into_different_sessions() {
    let db = test_db().await;
    let morning = seed_session_with_id(&db, 1, day("2024-01-10"), at("2024-01-10 08:00:00")).await;
    let afternoon = seed_session_with_id(&db, 2, day("2024-01-10"), at("2024-01-10 13:00:00")).await;
    let student = seed_student_with_id(&db, 42, "Maria Lopez").await;
    let usecase = check_in_usecase(&db);

    usecase
        .execute(input(Some(morning), student), at("2024-01-10 08:05:00"))
        .await
        .unwrap();
    usecase
        .execute(input(Some(afternoon), student), at("2024-01-10 13:05:00"))
        .await
        .unwrap();
}

#[tokio::test]
async fn should_check_into_current_session_when_id_is_omitted() {
    let db = test_db().await;
    seed_session_with_id(&db, 1, day("2024-01-10"), at("2024-01-10 08:00:00")).await;
    let latest = seed_session_with_id(&db, 2, day("2024-01-10"), at("2024-01-10 13:00:00")).await;
    let student = seed_student_with_id(&db, 42, "Maria Lopez").await;

    let out = check_in_usecase(&db)
        .execute(input(None, student), at("2024-01-10 13:10:00"))
        .await
        .unwrap();
    assert_eq!(out.session_id, latest);
}

#[tokio::test]
async fn should_fail_when_no_session_exists_today() {
    let db = test_db().await;
    seed_session_with_id(&db, 1, day("2024-01-09"), at("2024-01-09 08:00:00")).await;
    let student = seed_student_with_id(&db, 42, "Maria Lopez").await;

    let result = check_in_usecase(&db)
        .execute(input(None, student), at("2024-01-10 08:10:00"))
        .await;
    assert!(matches!(result, Err(AttendanceServiceError::SessionNotFound)));
}

#[tokio::test]
async fn should_reject_check_in_of_deactivated_student() {
    let db = test_db().await;
    let session = seed_session_with_id(&db, 7, day("2024-01-10"), at("2024-01-10 10:30:00")).await;
    let student = seed_student_with_id(&db, 42, "Maria Lopez").await;
    SetActiveUseCase {
        users: DbUserRepository { db: db.clone() },
    }
    .execute(student, false)
    .await
    .unwrap();

    let result = check_in_usecase(&db)
        .execute(input(Some(session), student), at("2024-01-10 10:35:00"))
        .await;
    assert!(matches!(result, Err(AttendanceServiceError::StudentNotFound)));
}

#[tokio::test]
async fn should_keep_check_in_snapshot_after_profile_edit() {
    let db = test_db().await;
    let session = seed_session_with_id(&db, 7, day("2024-01-10"), at("2024-01-10 10:30:00")).await;
    let student = seed_student_with_id(&db, 42, "Maria Lopez").await;
    check_in_usecase(&db)
        .execute(input(Some(session), student), at("2024-01-10 10:35:00"))
        .await
        .unwrap();

    let users = DbUserRepository { db: db.clone() };
    let updated = users
        .update_profile(
            student,
            &ProfileUpdate {
                email: "maria.garcia@training.com".to_owned(),
                full_name: "Maria Garcia".to_owned(),
                job_title: "Shift Lead".to_owned(),
                phone: "555-0100".to_owned(),
                department: "Assembly".to_owned(),
            },
        )
        .await
        .unwrap();
    assert!(updated);
    let user = users.find_by_id(student).await.unwrap().unwrap();
    assert_eq!(user.full_name, "Maria Garcia");
    assert_eq!(user.job_title, "Shift Lead");

    let records = DbAttendanceRepository { db: db.clone() }
        .list_for_session(session)
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].student_name, "Maria Lopez");
    assert_eq!(records[0].signature, "Maria Lopez");
    assert_eq!(records[0].job_title, "Line Worker");
}

#[tokio::test]
async fn should_reject_profile_edit_onto_taken_email() {
    let db = test_db().await;
    let maria = seed_student_with_id(&db, 42, "Maria Lopez").await;
    seed_student_with_id(&db, 43, "Tom Okafor").await;
    let users = DbUserRepository { db: db.clone() };

    let result = users
        .update_profile(
            maria,
            &ProfileUpdate {
                email: "student43@training.com".to_owned(),
                full_name: "Maria Lopez".to_owned(),
                job_title: String::new(),
                phone: String::new(),
                department: String::new(),
            },
        )
        .await;
    assert!(matches!(result, Err(AttendanceServiceError::UserAlreadyExists)));
    let missing = users
        .update_profile(
            UserId(99),
            &ProfileUpdate {
                email: "nobody@training.com".to_owned(),
                full_name: "Nobody".to_owned(),
                job_title: String::new(),
                phone: String::new(),
                department: String::new(),
            },
        )
        .await
        .unwrap();
    assert!(!missing);
}

// ── Listing ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_attendance_in_check_in_order() {
    let db = test_db().await;
    let session = seed_session_with_id(&db, 7, day("2024-01-10"), at("2024-01-10 10:00:00")).await;
    let ledger = DbAttendanceRepository { db: db.clone() };

    let students = [(41, "Alice", "10:20:00"), (42, "Bob", "10:05:00"), (43, "Cleo", "10:12:00")];
    for (id, name, time) in students {
        let student = seed_student_with_id(&db, id, name).await;
        ledger
            .insert(&NewAttendance {
                session_id: session,
                student_id: student,
                check_in_time: at(&format!("2024-01-10 {time}")),
                signature: name.to_owned(),
                job_title: "Line Worker".to_owned(),
                comments: None,
            })
            .await
            .unwrap();
    }

    let view = SessionAttendanceUseCase {
        sessions: DbSessionRepository { db: db.clone() },
        attendance: ledger.clone(),
    }
    .execute(session)
    .await
    .unwrap();
    let names: Vec<&str> = view
        .attendance
        .iter()
        .map(|r| r.student_name.as_str())
        .collect();
    assert_eq!(names, ["Bob", "Cleo", "Alice"]);
    assert!(
        view.attendance
            .windows(2)
            .all(|w| w[0].check_in_time <= w[1].check_in_time)
    );

    let today = TodayAttendanceUseCase {
        sessions: DbSessionRepository { db: db.clone() },
        attendance: ledger,
    }
    .execute(at("2024-01-10 18:00:00"))
    .await
    .unwrap();
    assert_eq!(today.session.id, session);
    assert_eq!(today.attendance.len(), 3);
}

#[tokio::test]
async fn should_report_own_check_in_or_none() {
    let db = test_db().await;
    let session = seed_session_with_id(&db, 7, day("2024-01-10"), at("2024-01-10 10:30:00")).await;
    let present = seed_student_with_id(&db, 42, "Maria Lopez").await;
    let absent = seed_student_with_id(&db, 43, "Ken Ito").await;
    check_in_usecase(&db)
        .execute(input(Some(session), present), at("2024-01-10 10:35:00"))
        .await
        .unwrap();

    let usecase = MyCheckInUseCase {
        sessions: DbSessionRepository { db: db.clone() },
        attendance: DbAttendanceRepository { db: db.clone() },
    };
    let mine = usecase.execute(session, present).await.unwrap().unwrap();
    assert_eq!(mine.student_id, present);
    assert!(usecase.execute(session, absent).await.unwrap().is_none());

    let missing = usecase.execute(SessionId(99), present).await;
    assert!(matches!(missing, Err(AttendanceServiceError::SessionNotFound)));
}
