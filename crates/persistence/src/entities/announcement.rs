//! Announcement entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::{Announcement, AnnouncementWithProgram};
use sqlx::FromRow;

/// Database row mapping for the announcements table.
#[derive(Debug, Clone, FromRow)]
pub struct AnnouncementEntity {
    pub id: i64,
    pub program_id: i64,
    pub title: String,
    pub body: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AnnouncementEntity> for Announcement {
    fn from(entity: AnnouncementEntity) -> Self {
        Self {
            id: entity.id,
            program_id: entity.program_id,
            title: entity.title,
            body: entity.body,
            active: entity.active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Announcement joined with its program's name.
#[derive(Debug, Clone, FromRow)]
pub struct AnnouncementWithProgramEntity {
    #[sqlx(flatten)]
    pub announcement: AnnouncementEntity,
    pub program_name: String,
}

impl From<AnnouncementWithProgramEntity> for AnnouncementWithProgram {
    fn from(entity: AnnouncementWithProgramEntity) -> Self {
        Self {
            announcement: entity.announcement.into(),
            program_name: entity.program_name,
        }
    }
}
