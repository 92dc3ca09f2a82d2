//! `init-db` seeding.
//!
//! Every step is idempotent: the administrator is only created when none
//! exists, programs are inserted by slug with `ON CONFLICT DO NOTHING`, and the
//! email template row is created lazily.

use domain::models::{NewProgram, ProgramVariant};
use persistence::repositories::{AdminUserRepository, EmailTemplateRepository, ProgramRepository};
use shared::password::{hash_password, PasswordError};
use sqlx::PgPool;
use tracing::{info, warn};
use validator::Validate;

use crate::config::AdminBootstrapConfig;

/// Error types for bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordError),

    #[error("Invalid seed program: {0}")]
    InvalidProgram(#[from] validator::ValidationErrors),
}

/// What a bootstrap run changed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub admin_created: bool,
    pub programs_created: Vec<&'static str>,
}

pub async fn bootstrap(
    pool: &PgPool,
    config: &AdminBootstrapConfig,
) -> Result<BootstrapReport, BootstrapError> {
    let mut report = BootstrapReport {
        admin_created: bootstrap_admin(pool, config).await?,
        ..Default::default()
    };

    let programs = ProgramRepository::new(pool.clone());
    for variant in ProgramVariant::ALL {
        let seed = NewProgram::seed(variant);
        seed.validate()?;
        if programs.create_if_missing(&seed).await? {
            info!(slug = variant.slug(), "Seeded program");
            report.programs_created.push(variant.slug());
        }
    }

    EmailTemplateRepository::new(pool.clone())
        .get_or_create()
        .await?;

    Ok(report)
}

/// Creates the configured administrator unless any administrator exists.
async fn bootstrap_admin(
    pool: &PgPool,
    config: &AdminBootstrapConfig,
) -> Result<bool, BootstrapError> {
    let admins = AdminUserRepository::new(pool.clone());
    if admins.exists_any().await? {
        info!("Administrator already exists - skipping bootstrap");
        return Ok(false);
    }

    if config.bootstrap_email.trim().is_empty() || config.bootstrap_password.is_empty() {
        warn!("Bootstrap administrator credentials are empty - skipping");
        return Ok(false);
    }

    let password_hash = hash_password(&config.bootstrap_password)?;
    let admin = admins
        .create(config.bootstrap_email.trim(), &password_hash)
        .await?;

    info!(email = %admin.email, admin_id = admin.id, "Bootstrap administrator created");
    if config.bootstrap_password == "admin123" {
        warn!(
            "SECURITY: the bootstrap administrator uses the default password. \
             Set PORTAL__ADMIN__BOOTSTRAP_PASSWORD before exposing the portal."
        );
    }

    Ok(true)
}
