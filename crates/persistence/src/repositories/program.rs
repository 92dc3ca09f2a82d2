//! Program repository.

use domain::models::{NewProgram, Program};
use sqlx::PgPool;

use crate::entities::ProgramEntity;
use crate::metrics::QueryTimer;

const PROGRAM_COLUMNS: &str = "id, name, slug, short_description, description, open_date, \
                               close_date, active, created_at, updated_at";

/// Repository for program-related database operations.
#[derive(Clone)]
pub struct ProgramRepository {
    pool: PgPool,
}

impl ProgramRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active programs for the home page, ordered by name.
    pub async fn list_active(&self) -> Result<Vec<Program>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_programs");
        let result = sqlx::query_as::<_, ProgramEntity>(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM programs WHERE active = true ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    /// Every program, active or not, ordered by name.
    pub async fn list_all(&self) -> Result<Vec<Program>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_programs");
        let result = sqlx::query_as::<_, ProgramEntity>(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM programs ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result?.into_iter().map(Into::into).collect())
    }

    /// Public lookup: inactive programs are treated as absent.
    pub async fn find_active_by_slug(&self, slug: &str) -> Result<Option<Program>, sqlx::Error> {
        let timer = QueryTimer::new("find_active_program_by_slug");
        let result = sqlx::query_as::<_, ProgramEntity>(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM programs WHERE slug = $1 AND active = true"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Program>, sqlx::Error> {
        let timer = QueryTimer::new("find_program_by_slug");
        let result = sqlx::query_as::<_, ProgramEntity>(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM programs WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Program>, sqlx::Error> {
        let timer = QueryTimer::new("find_program_by_id");
        let result = sqlx::query_as::<_, ProgramEntity>(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM programs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result?.map(Into::into))
    }

    /// Inserts a program. Callers validate `program` beforehand.
    pub async fn create(&self, program: &NewProgram) -> Result<Program, sqlx::Error> {
        let timer = QueryTimer::new("create_program");
        let result = sqlx::query_as::<_, ProgramEntity>(&format!(
            r#"
            INSERT INTO programs (name, slug, short_description, description, open_date, close_date, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PROGRAM_COLUMNS}
            "#
        ))
        .bind(&program.name)
        .bind(&program.slug)
        .bind(&program.short_description)
        .bind(&program.description)
        .bind(program.open_date)
        .bind(program.close_date)
        .bind(program.active)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result?.into())
    }

    /// Inserts the program unless its slug already exists.
    ///
    /// Returns `true` when a row was created.
    pub async fn create_if_missing(&self, program: &NewProgram) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("create_program_if_missing");
        let result = sqlx::query(
            r#"
            INSERT INTO programs (name, slug, short_description, description, open_date, close_date, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (slug) DO NOTHING
            "#,
        )
        .bind(&program.name)
        .bind(&program.slug)
        .bind(&program.short_description)
        .bind(&program.description)
        .bind(program.open_date)
        .bind(program.close_date)
        .bind(program.active)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected() == 1)
    }
}
