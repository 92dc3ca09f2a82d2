//! Email template repository (singleton row).

use domain::models::email_template::{DEFAULT_BODY_TEMPLATE, DEFAULT_SUBJECT_TEMPLATE};
use domain::models::EmailTemplate;
use sqlx::PgPool;

use crate::entities::EmailTemplateEntity;
use crate::metrics::QueryTimer;

#[derive(Clone)]
pub struct EmailTemplateRepository {
    pool: PgPool,
}

impl EmailTemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the first template row, inserting the defaults if the table is empty.
    pub async fn get_or_create(&self) -> Result<EmailTemplate, sqlx::Error> {
        let timer = QueryTimer::new("get_or_create_email_template");
        let existing = sqlx::query_as::<_, EmailTemplateEntity>(
            r#"
            SELECT id, subject_template, body_template, updated_at
            FROM email_templates
            ORDER BY id
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        let entity = match existing {
            Some(entity) => entity,
            None => {
                tracing::info!("Creating default email template");
                sqlx::query_as::<_, EmailTemplateEntity>(
                    r#"
                    INSERT INTO email_templates (subject_template, body_template)
                    VALUES ($1, $2)
                    RETURNING id, subject_template, body_template, updated_at
                    "#,
                )
                .bind(DEFAULT_SUBJECT_TEMPLATE)
                .bind(DEFAULT_BODY_TEMPLATE)
                .fetch_one(&self.pool)
                .await?
            }
        };
        timer.record();
        Ok(entity.into())
    }
}
