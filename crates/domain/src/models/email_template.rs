//! Confirmation email template (singleton configuration).

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DEFAULT_SUBJECT_TEMPLATE: &str = "Recebemos sua inscrição";

pub const DEFAULT_BODY_TEMPLATE: &str = "Olá {nome},\n\nRecebemos sua inscrição para o programa {programa}.\n\nObrigada!\nEquipe FIA Girls on Track";

/// Subject and body templates with `{nome}` and `{programa}` placeholders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EmailTemplate {
    pub id: i64,
    pub subject_template: String,
    pub body_template: String,
    pub updated_at: DateTime<Utc>,
}

/// Partial update from the configuration page.
///
/// A blank field means "keep the stored value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailTemplateUpdate {
    pub subject_template: Option<String>,
    pub body_template: Option<String>,
}

impl EmailTemplateUpdate {
    pub fn from_form(subject: &str, body: &str) -> Self {
        let keep_if_filled = |value: &str| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        Self {
            subject_template: keep_if_filled(subject),
            body_template: keep_if_filled(body),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subject_template.is_none() && self.body_template.is_none()
    }
}
