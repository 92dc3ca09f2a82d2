//! Announcement domain model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::Validate;

/// A staff-authored notice attached to a program.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Announcement {
    pub id: i64,
    pub program_id: i64,
    pub title: String,
    pub body: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Announcement listed on the configuration page, with its program name.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AnnouncementWithProgram {
    #[serde(flatten)]
    pub announcement: Announcement,
    pub program_name: String,
}

/// Input for creating an announcement. Fields arrive already trimmed.
#[derive(Debug, Clone, Validate)]
pub struct NewAnnouncement {
    pub program_id: i64,

    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Body is required"))]
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_announcement_validation() {
        let ok = NewAnnouncement {
            program_id: 1,
            title: "Resultado da seletiva".to_string(),
            body: "Lista publicada.".to_string(),
        };
        assert!(ok.validate().is_ok());

        let blank_title = NewAnnouncement {
            title: String::new(),
            ..ok.clone()
        };
        assert!(blank_title.validate().is_err());

        let blank_body = NewAnnouncement {
            body: String::new(),
            ..ok
        };
        assert!(blank_body.validate().is_err());
    }

    #[test]
    fn test_title_length_limit() {
        let long = NewAnnouncement {
            program_id: 1,
            title: "a".repeat(256),
            body: "x".to_string(),
        };
        assert!(long.validate().is_err());
    }
}
