//! Application repository.

use domain::models::{
    Application, ApplicationFilter, ApplicationListItem, ApplicationStatus, NewApplication,
    StatusCounts,
};
use sqlx::PgPool;

use crate::entities::{
    ApplicationEntity, ApplicationListEntity, ApplicationStatusDb, StatusCountsEntity,
};
use crate::metrics::QueryTimer;

/// Repository for public applications.
#[derive(Clone)]
pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts an application with status `pending`.
    pub async fn create(&self, application: &NewApplication) -> Result<Application, sqlx::Error> {
        let timer = QueryTimer::new("create_application");
        let result = sqlx::query_as::<_, ApplicationEntity>(
            r#"
            INSERT INTO applications
                (program_id, name, email, phone, region_code, attributes,
                 photo_filename, resume_filename, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending')
            RETURNING id, program_id, name, email, phone, region_code, attributes,
                      photo_filename, resume_filename, status, created_at, updated_at
            "#,
        )
        .bind(application.program_id)
        .bind(&application.name)
        .bind(&application.email)
        .bind(&application.phone)
        .bind(&application.region_code)
        .bind(serde_json::Value::Object(application.attributes.clone()))
        .bind(&application.photo_filename)
        .bind(&application.resume_filename)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.into())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Application>, sqlx::Error> {
        let timer = QueryTimer::new("find_application_by_id");
        let result = sqlx::query_as::<_, ApplicationEntity>(
            r#"
            SELECT id, program_id, name, email, phone, region_code, attributes,
                   photo_filename, resume_filename, status, created_at, updated_at
            FROM applications
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    /// Dashboard listing, newest first. Each filter is skipped when `None`.
    pub async fn list_filtered(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<Vec<ApplicationListItem>, sqlx::Error> {
        let timer = QueryTimer::new("list_filtered_applications");
        let status: Option<ApplicationStatusDb> = filter.status.map(Into::into);
        let result = sqlx::query_as::<_, ApplicationListEntity>(
            r#"
            SELECT a.id, a.program_id, p.name AS program_name, a.name, a.email, a.phone,
                   a.region_code, a.status, a.created_at
            FROM applications a
            JOIN programs p ON p.id = a.program_id
            WHERE ($1::bigint IS NULL OR a.program_id = $1)
              AND ($2::text IS NULL OR a.name ILIKE '%' || $2 || '%')
              AND ($3::application_status IS NULL OR a.status = $3)
              AND ($4::text IS NULL OR a.region_code = $4)
            ORDER BY a.created_at DESC, a.id DESC
            "#,
        )
        .bind(filter.program_id)
        .bind(filter.name_contains.as_deref())
        .bind(status)
        .bind(filter.region_code.as_deref())
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    /// Global per-status totals, independent of any dashboard filter.
    pub async fn status_counts(&self) -> Result<StatusCounts, sqlx::Error> {
        let timer = QueryTimer::new("application_status_counts");
        let result = sqlx::query_as::<_, StatusCountsEntity>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'pre_selected') AS pre_selected,
                COUNT(*) FILTER (WHERE status = 'selected') AS selected,
                COUNT(*) FILTER (WHERE status = 'not_selected') AS not_selected,
                COUNT(*) AS total
            FROM applications
            "#,
        )
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.into())
    }

    /// Sets the status unconditionally. Returns `None` if the id is unknown.
    pub async fn update_status(
        &self,
        id: i64,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, sqlx::Error> {
        let timer = QueryTimer::new("update_application_status");
        let result = sqlx::query_as::<_, ApplicationEntity>(
            r#"
            UPDATE applications
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, program_id, name, email, phone, region_code, attributes,
                      photo_filename, resume_filename, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(ApplicationStatusDb::from(status))
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }
}
