use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use muster_auth_types::identity::Identity;
use muster_domain::id::CatalogId;

use crate::domain::types::{CatalogEntry, CatalogKind};
use crate::error::AttendanceServiceError;
use crate::handlers::{MessageResponse, require_manager};
use crate::state::AppState;
use crate::usecase::catalog::{
    CatalogInput, CreateCatalogEntryUseCase, DeactivateCatalogEntryUseCase, ListCatalogUseCase,
    UpdateCatalogEntryUseCase,
};

fn catalog_kind(segment: &str) -> Result<CatalogKind, AttendanceServiceError> {
    CatalogKind::from_path(segment).ok_or(AttendanceServiceError::CatalogNotFound)
}

#[derive(Serialize)]
pub struct CatalogEntryResponse {
    pub id: CatalogId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<CatalogId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
    pub is_active: bool,
    #[serde(serialize_with = "muster_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<CatalogEntry> for CatalogEntryResponse {
    fn from(e: CatalogEntry) -> Self {
        Self {
            id: e.id,
            name: e.name,
            description: e.description,
            department_id: e.department_id,
            department_name: e.department_name,
            is_active: e.is_active,
            created_at: e.created_at,
        }
    }
}

/// Job titles may send `title` in place of `name`.
#[derive(Deserialize)]
pub struct CatalogEntryRequest {
    #[serde(alias = "title")]
    pub name: Option<String>,
    pub description: Option<String>,
    pub department_id: Option<CatalogId>,
}

impl From<CatalogEntryRequest> for CatalogInput {
    fn from(body: CatalogEntryRequest) -> Self {
        Self {
            name: body.name,
            description: body.description,
            department_id: body.department_id,
        }
    }
}

// ── GET /api/admin/{catalog} ─────────────────────────────────────────────────

pub async fn list_entries(
    identity: Identity,
    State(state): State<AppState>,
    Path(catalog): Path<String>,
) -> Result<Json<Vec<CatalogEntryResponse>>, AttendanceServiceError> {
    require_manager(&state, &identity).await?;
    let kind = catalog_kind(&catalog)?;
    let usecase = ListCatalogUseCase {
        catalogs: state.catalog_repo(),
    };
    let entries = usecase.execute(kind).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

// ── POST /api/admin/{catalog} ────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CreateEntryResponse {
    pub id: CatalogId,
    pub message: &'static str,
    pub entry: CatalogEntryResponse,
}

pub async fn create_entry(
    identity: Identity,
    State(state): State<AppState>,
    Path(catalog): Path<String>,
    Json(body): Json<CatalogEntryRequest>,
) -> Result<(StatusCode, Json<CreateEntryResponse>), AttendanceServiceError> {
    require_manager(&state, &identity).await?;
    let kind = catalog_kind(&catalog)?;
    let usecase = CreateCatalogEntryUseCase {
        catalogs: state.catalog_repo(),
    };
    let entry = usecase.execute(kind, body.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateEntryResponse {
            id: entry.id,
            message: "Catalog entry created",
            entry: entry.into(),
        }),
    ))
}

// ── PUT /api/admin/{catalog}/{id} ────────────────────────────────────────────

pub async fn update_entry(
    identity: Identity,
    State(state): State<AppState>,
    Path((catalog, id)): Path<(String, i64)>,
    Json(body): Json<CatalogEntryRequest>,
) -> Result<Json<CatalogEntryResponse>, AttendanceServiceError> {
    require_manager(&state, &identity).await?;
    let kind = catalog_kind(&catalog)?;
    let usecase = UpdateCatalogEntryUseCase {
        catalogs: state.catalog_repo(),
    };
    let entry = usecase.execute(kind, CatalogId(id), body.into()).await?;
    Ok(Json(entry.into()))
}

// ── DELETE /api/admin/{catalog}/{id} ─────────────────────────────────────────

pub async fn deactivate_entry(
    identity: Identity,
    State(state): State<AppState>,
    Path((catalog, id)): Path<(String, i64)>,
) -> Result<Json<MessageResponse>, AttendanceServiceError> {
    require_manager(&state, &identity).await?;
    let kind = catalog_kind(&catalog)?;
    let usecase = DeactivateCatalogEntryUseCase {
        catalogs: state.catalog_repo(),
    };
    usecase.execute(kind, CatalogId(id)).await?;
    Ok(Json(MessageResponse {
        message: "Catalog entry deactivated",
    }))
}
