//! Admin user repository.

use domain::models::AdminUser;
use sqlx::PgPool;

use crate::entities::AdminUserEntity;
use crate::metrics::QueryTimer;

/// Repository for staff accounts.
#[derive(Clone)]
pub struct AdminUserRepository {
    pool: PgPool,
}

impl AdminUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Looks up an administrator by exact email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, sqlx::Error> {
        let timer = QueryTimer::new("find_admin_user_by_email");
        let result = sqlx::query_as::<_, AdminUserEntity>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM admin_users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    /// Inserts an administrator. The password must already be hashed.
    pub async fn create(&self, email: &str, password_hash: &str) -> Result<AdminUser, sqlx::Error> {
        let timer = QueryTimer::new("create_admin_user");
        let result = sqlx::query_as::<_, AdminUserEntity>(
            r#"
            INSERT INTO admin_users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.into())
    }

    pub async fn exists_any(&self) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("admin_users_exist");
        let result: Result<bool, sqlx::Error> =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM admin_users)")
                .fetch_one(&self.pool)
                .await;
        timer.record();
        result
    }
}
