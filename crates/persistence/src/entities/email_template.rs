//! Email template entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct EmailTemplateEntity {
    pub id: i64,
    pub subject_template: String,
    pub body_template: String,
    pub updated_at: DateTime<Utc>,
}

impl From<EmailTemplateEntity> for domain::models::EmailTemplate {
    fn from(entity: EmailTemplateEntity) -> Self {
        Self {
            id: entity.id,
            subject_template: entity.subject_template,
            body_template: entity.body_template,
            updated_at: entity.updated_at,
        }
    }
}
