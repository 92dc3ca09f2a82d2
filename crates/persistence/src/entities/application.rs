//! Application entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::{Application, ApplicationListItem, ApplicationStatus, StatusCounts};
use sqlx::FromRow;

/// Database enum for application review status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "snake_case")]
pub enum ApplicationStatusDb {
    Pending,
    PreSelected,
    Selected,
    NotSelected,
}

impl From<ApplicationStatusDb> for ApplicationStatus {
    fn from(status: ApplicationStatusDb) -> Self {
        match status {
            ApplicationStatusDb::Pending => ApplicationStatus::Pending,
            ApplicationStatusDb::PreSelected => ApplicationStatus::PreSelected,
            ApplicationStatusDb::Selected => ApplicationStatus::Selected,
            ApplicationStatusDb::NotSelected => ApplicationStatus::NotSelected,
        }
    }
}

impl From<ApplicationStatus> for ApplicationStatusDb {
    fn from(status: ApplicationStatus) -> Self {
        match status {
            ApplicationStatus::Pending => ApplicationStatusDb::Pending,
            ApplicationStatus::PreSelected => ApplicationStatusDb::PreSelected,
            ApplicationStatus::Selected => ApplicationStatusDb::Selected,
            ApplicationStatus::NotSelected => ApplicationStatusDb::NotSelected,
        }
    }
}

/// Database row mapping for the applications table.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationEntity {
    pub id: i64,
    pub program_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub region_code: String,
    pub attributes: serde_json::Value,
    pub photo_filename: Option<String>,
    pub resume_filename: Option<String>,
    pub status: ApplicationStatusDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ApplicationEntity> for Application {
    fn from(entity: ApplicationEntity) -> Self {
        let attributes = match entity.attributes {
            serde_json::Value::Object(map) => map,
            _ => Default::default(),
        };

        Self {
            id: entity.id,
            program_id: entity.program_id,
            name: entity.name,
            email: entity.email,
            phone: entity.phone,
            region_code: entity.region_code,
            attributes,
            photo_filename: entity.photo_filename,
            resume_filename: entity.resume_filename,
            status: entity.status.into(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Dashboard row: application joined with its program's name.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationListEntity {
    pub id: i64,
    pub program_id: i64,
    pub program_name: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub region_code: String,
    pub status: ApplicationStatusDb,
    pub created_at: DateTime<Utc>,
}

impl From<ApplicationListEntity> for ApplicationListItem {
    fn from(entity: ApplicationListEntity) -> Self {
        Self {
            id: entity.id,
            program_id: entity.program_id,
            program_name: entity.program_name,
            name: entity.name,
            email: entity.email,
            phone: entity.phone,
            region_code: entity.region_code,
            status: entity.status.into(),
            created_at: entity.created_at,
        }
    }
}

/// Aggregate row for per-status totals.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct StatusCountsEntity {
    pub pending: i64,
    pub pre_selected: i64,
    pub selected: i64,
    pub not_selected: i64,
    pub total: i64,
}

impl From<StatusCountsEntity> for StatusCounts {
    fn from(entity: StatusCountsEntity) -> Self {
        Self {
            pending: entity.pending,
            pre_selected: entity.pre_selected,
            selected: entity.selected,
            not_selected: entity.not_selected,
            total: entity.total,
        }
    }
}
