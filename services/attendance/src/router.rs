use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use muster_core::error::not_found;
use muster_core::health::{healthz, readyz};
use muster_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    attendance::{check_in, my_check_in, session_attendance, today_attendance},
    auth::{get_me, login},
    catalog::{create_entry, deactivate_entry, list_entries, update_entry},
    export::{export_by_date, export_session, export_today},
    session::{create_session, current_session, delete_session, end_session, list_sessions},
    student::{create_student, list_students, set_active, update_student},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/api/login", post(login))
        .route("/api/me", get(get_me))
        // Sessions
        .route("/api/training-sessions", get(list_sessions))
        .route("/api/training-session", post(create_session))
        .route("/api/training-session/today", get(current_session))
        .route("/api/training-session/end", post(end_session))
        .route("/api/training-session/{id}", delete(delete_session))
        // Attendance
        .route("/api/attendance/checkin", post(check_in))
        .route("/api/attendance/today", get(today_attendance))
        .route("/api/attendance/session/{id}", get(session_attendance))
        .route("/api/attendance/session/{id}/me", get(my_check_in))
        // Export
        .route("/api/export/excel/today", get(export_today))
        .route("/api/export/excel/session/{id}", get(export_session))
        .route("/api/export/excel/date/{date}", get(export_by_date))
        // Students
        .route("/api/students", get(list_students))
        .route("/api/students", post(create_student))
        .route("/api/students/{id}", put(update_student))
        .route("/api/students/{id}/active", patch(set_active))
        // Catalogs
        .route("/api/admin/{catalog}", get(list_entries).post(create_entry))
        .route(
            "/api/admin/{catalog}/{id}",
            put(update_entry).delete(deactivate_entry),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}
