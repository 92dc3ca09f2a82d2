//! Announcement repository.

use domain::models::{Announcement, AnnouncementWithProgram, NewAnnouncement};
use sqlx::PgPool;

use crate::entities::{AnnouncementEntity, AnnouncementWithProgramEntity};
use crate::metrics::QueryTimer;

/// Repository for program announcements.
#[derive(Clone)]
pub struct AnnouncementRepository {
    pool: PgPool,
}

impl AnnouncementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active announcements for one program, newest first.
    pub async fn list_active_for_program(
        &self,
        program_id: i64,
    ) -> Result<Vec<Announcement>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_announcements_for_program");
        let result = sqlx::query_as::<_, AnnouncementEntity>(
            r#"
            SELECT id, program_id, title, body, active, created_at, updated_at
            FROM announcements
            WHERE program_id = $1 AND active = true
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(program_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    /// All announcements with their program names, newest first.
    pub async fn list_all_with_program(&self) -> Result<Vec<AnnouncementWithProgram>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_announcements");
        let result = sqlx::query_as::<_, AnnouncementWithProgramEntity>(
            r#"
            SELECT a.id, a.program_id, a.title, a.body, a.active, a.created_at, a.updated_at,
                   p.name AS program_name
            FROM announcements a
            JOIN programs p ON p.id = a.program_id
            ORDER BY a.created_at DESC, a.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    /// Creates an active announcement.
    pub async fn create(&self, announcement: &NewAnnouncement) -> Result<Announcement, sqlx::Error> {
        let timer = QueryTimer::new("create_announcement");
        let result = sqlx::query_as::<_, AnnouncementEntity>(
            r#"
            INSERT INTO announcements (program_id, title, body, active)
            VALUES ($1, $2, $3, true)
            RETURNING id, program_id, title, body, active, created_at, updated_at
            "#,
        )
        .bind(announcement.program_id)
        .bind(&announcement.title)
        .bind(&announcement.body)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.into())
    }

    /// Flips the active flag. Returns `None` if the id is unknown.
    pub async fn toggle(&self, id: i64) -> Result<Option<Announcement>, sqlx::Error> {
        let timer = QueryTimer::new("toggle_announcement");
        let result = sqlx::query_as::<_, AnnouncementEntity>(
            r#"
            UPDATE announcements
            SET active = NOT active, updated_at = NOW()
            WHERE id = $1
            RETURNING id, program_id, title, body, active, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }
}
