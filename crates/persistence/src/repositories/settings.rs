//! Configuration page writes: program schedules plus the email template.

use domain::models::{EmailTemplateUpdate, ProgramSchedule};
use sqlx::PgPool;

use crate::metrics::QueryTimer;

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies every schedule and the template update atomically.
    ///
    /// `template_id` is the singleton row returned by
    /// [`EmailTemplateRepository::get_or_create`](super::EmailTemplateRepository::get_or_create).
    pub async fn apply(
        &self,
        schedules: &[ProgramSchedule],
        template_id: i64,
        template: &EmailTemplateUpdate,
    ) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("apply_settings");
        let mut tx = self.pool.begin().await?;

        for schedule in schedules {
            sqlx::query(
                r#"
                UPDATE programs
                SET open_date = $2, close_date = $3, active = $4, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(schedule.program_id)
            .bind(schedule.open_date)
            .bind(schedule.close_date)
            .bind(schedule.active)
            .execute(&mut *tx)
            .await?;
        }

        if !template.is_empty() {
            sqlx::query(
                r#"
                UPDATE email_templates
                SET subject_template = COALESCE($2, subject_template),
                    body_template = COALESCE($3, body_template),
                    updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(template_id)
            .bind(template.subject_template.as_deref())
            .bind(template.body_template.as_deref())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        timer.record();
        Ok(())
    }
}
