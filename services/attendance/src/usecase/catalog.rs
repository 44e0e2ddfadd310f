use tracing::info;

use muster_domain::id::CatalogId;

use crate::domain::repository::CatalogRepository;
use crate::domain::types::{CatalogEntry, CatalogFields, CatalogKind};
use crate::error::AttendanceServiceError;
use crate::usecase::non_blank;

pub const DEFAULT_DEPARTMENTS: [(&str, &str); 7] = [
    ("Manufacturing", "Production and manufacturing operations"),
    ("Quality Control", "Quality assurance and control"),
    ("Maintenance", "Equipment maintenance and repair"),
    ("Safety", "Safety and compliance"),
    ("Administration", "Administrative functions"),
    ("IT Department", "Information technology"),
    ("Training Department", "Training and development"),
];

/// Title and the name of its department.
pub const DEFAULT_JOB_TITLES: [(&str, &str); 15] = [
    ("Trainee", "Manufacturing"),
    ("Operator", "Manufacturing"),
    ("Supervisor", "Manufacturing"),
    ("Quality Inspector", "Quality Control"),
    ("QC Manager", "Quality Control"),
    ("Maintenance Technician", "Maintenance"),
    ("Maintenance Supervisor", "Maintenance"),
    ("Safety Officer", "Safety"),
    ("Safety Manager", "Safety"),
    ("Administrative Assistant", "Administration"),
    ("Office Manager", "Administration"),
    ("IT Support", "IT Department"),
    ("System Administrator", "IT Department"),
    ("Training Coordinator", "Training Department"),
    ("Training Manager", "Training Department"),
];

pub const DEFAULT_TRAINING_TYPES: [(&str, &str); 6] = [
    (
        "Code of Conduct - Daily Orientation",
        "Daily orientation and code of conduct training",
    ),
    ("Safety Training", "Workplace safety and hazard awareness"),
    ("Equipment Operation", "Training on specific equipment operation"),
    ("Quality Standards", "Quality control and standards training"),
    ("Emergency Procedures", "Emergency response and evacuation procedures"),
    ("Compliance Training", "Regulatory compliance and legal requirements"),
];

#[derive(Debug, Default)]
pub struct CatalogInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub department_id: Option<CatalogId>,
}

/// Validate `input` for `kind`. Fields the catalog does not carry are dropped.
async fn catalog_fields<C: CatalogRepository>(
    catalogs: &C,
    kind: CatalogKind,
    input: CatalogInput,
) -> Result<CatalogFields, AttendanceServiceError> {
    let name = non_blank(input.name).ok_or(AttendanceServiceError::MissingName)?;
    if !kind.has_department() {
        return Ok(CatalogFields {
            name,
            description: non_blank(input.description),
            department_id: None,
        });
    }

    if let Some(id) = input.department_id {
        catalogs
            .find_by_id(CatalogKind::Department, id)
            .await?
            .filter(|d| d.is_active)
            .ok_or(AttendanceServiceError::DepartmentNotFound)?;
    }
    Ok(CatalogFields {
        name,
        description: None,
        department_id: input.department_id,
    })
}

// ── ListCatalog ──────────────────────────────────────────────────────────────

pub struct ListCatalogUseCase<C: CatalogRepository> {
    pub catalogs: C,
}

impl<C: CatalogRepository> ListCatalogUseCase<C> {
    pub async fn execute(&self, kind: CatalogKind) -> Result<Vec<CatalogEntry>, AttendanceServiceError> {
        self.catalogs.list_active(kind).await
    }
}

// ── CreateCatalogEntry ───────────────────────────────────────────────────────

pub struct CreateCatalogEntryUseCase<C: CatalogRepository> {
    pub catalogs: C,
}

impl<C: CatalogRepository> CreateCatalogEntryUseCase<C> {
    pub async fn execute(
        &self,
        kind: CatalogKind,
        input: CatalogInput,
    ) -> Result<CatalogEntry, AttendanceServiceError> {
        let fields = catalog_fields(&self.catalogs, kind, input).await?;
        let entry = self.catalogs.create(kind, &fields).await?;
        info!(catalog = kind.path(), id = %entry.id, name = %entry.name, "catalog entry created");
        Ok(entry)
    }
}

// ── UpdateCatalogEntry ───────────────────────────────────────────────────────

pub struct UpdateCatalogEntryUseCase<C: CatalogRepository> {
    pub catalogs: C,
}

impl<C: CatalogRepository> UpdateCatalogEntryUseCase<C> {
    /// Deactivated entries cannot be edited.
    pub async fn execute(
        &self,
        kind: CatalogKind,
        id: CatalogId,
        input: CatalogInput,
    ) -> Result<CatalogEntry, AttendanceServiceError> {
        let fields = catalog_fields(&self.catalogs, kind, input).await?;
        if !self.catalogs.update(kind, id, &fields).await? {
            return Err(AttendanceServiceError::CatalogEntryNotFound);
        }
        info!(catalog = kind.path(), id = %id, "catalog entry updated");
        self.catalogs
            .find_by_id(kind, id)
            .await?
            .ok_or(AttendanceServiceError::CatalogEntryNotFound)
    }
}

// ── DeactivateCatalogEntry ───────────────────────────────────────────────────

pub struct DeactivateCatalogEntryUseCase<C: CatalogRepository> {
    pub catalogs: C,
}

impl<C: CatalogRepository> DeactivateCatalogEntryUseCase<C> {
    pub async fn execute(&self, kind: CatalogKind, id: CatalogId) -> Result<(), AttendanceServiceError> {
        if !self.catalogs.deactivate(kind, id).await? {
            return Err(AttendanceServiceError::CatalogEntryNotFound);
        }
        info!(catalog = kind.path(), id = %id, "catalog entry deactivated");
        Ok(())
    }
}

// ── SeedCatalogs ─────────────────────────────────────────────────────────────

/// Fill each empty catalog with the default entries at startup. A catalog
/// that already has rows, active or not, is left alone.
pub struct SeedCatalogsUseCase<C: CatalogRepository> {
    pub catalogs: C,
}

impl<C: CatalogRepository> SeedCatalogsUseCase<C> {
    /// Returns the number of entries inserted.
    pub async fn execute(&self) -> Result<usize, AttendanceServiceError> {
        let mut seeded = 0;

        if self.catalogs.count(CatalogKind::Department).await? == 0 {
            for (name, description) in DEFAULT_DEPARTMENTS {
                self.seed(CatalogKind::Department, name, Some(description), None)
                    .await?;
                seeded += 1;
            }
        }

        if self.catalogs.count(CatalogKind::JobTitle).await? == 0 {
            let departments = self.catalogs.list_active(CatalogKind::Department).await?;
            for (title, department) in DEFAULT_JOB_TITLES {
                let department_id = departments
                    .iter()
                    .find(|d| d.name == department)
                    .map(|d| d.id);
                self.seed(CatalogKind::JobTitle, title, None, department_id)
                    .await?;
                seeded += 1;
            }
        }

        if self.catalogs.count(CatalogKind::TrainingType).await? == 0 {
            for (name, description) in DEFAULT_TRAINING_TYPES {
                self.seed(CatalogKind::TrainingType, name, Some(description), None)
                    .await?;
                seeded += 1;
            }
        }

        info!(seeded, "catalogs seeded");
        Ok(seeded)
    }

    async fn seed(
        &self,
        kind: CatalogKind,
        name: &str,
        description: Option<&str>,
        department_id: Option<CatalogId>,
    ) -> Result<(), AttendanceServiceError> {
        let fields = CatalogFields {
            name: name.to_owned(),
            description: description.map(str::to_owned),
            department_id,
        };
        match self.catalogs.create(kind, &fields).await {
            // Another instance seeded the same name first.
            Ok(_) | Err(AttendanceServiceError::CatalogEntryExists) => Ok(()),
            Err(e) => Err(e),
        }
    }
}
