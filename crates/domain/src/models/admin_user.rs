//! Administrator account model.

use chrono::{DateTime, Utc};

/// A staff account allowed into the admin area.
#[derive(Clone)]
pub struct AdminUser {
    pub id: i64,
    pub email: String,
    /// Argon2id PHC string, never the plaintext password.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for AdminUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminUser")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_hash() {
        let admin = AdminUser {
            id: 1,
            email: "admin@example.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            created_at: Utc::now(),
        };
        let debug = format!("{:?}", admin);
        assert!(debug.contains("admin@example.com"));
        assert!(!debug.contains("argon2id"));
    }
}
