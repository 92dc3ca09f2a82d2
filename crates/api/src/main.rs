use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use registration_portal_api::{app, config, middleware, services};

/// Program registration portal.
#[derive(Parser, Debug)]
#[command(name = "registration-portal")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run migrations and start the HTTP server (default)
    Serve,

    /// Run migrations and seed the administrator, programs and email template
    InitDb,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = config::Config::load().context("Failed to load configuration")?;

    // Initialize logging
    middleware::logging::init_logging(&config.logging);

    // Create database pool
    let pool = persistence::db::create_pool(&config.database.pool_config())
        .await
        .context("Failed to connect to the database")?;

    persistence::db::run_migrations(&pool).await?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::InitDb => {
            let report = services::admin_bootstrap::bootstrap(&pool, &config.admin).await?;
            info!(
                admin_created = report.admin_created,
                programs_created = ?report.programs_created,
                "Database initialized"
            );
        }
        Commands::Serve => serve(config, pool).await?,
    }

    Ok(())
}

async fn serve(config: config::Config, pool: sqlx::PgPool) -> Result<()> {
    info!("Starting registration portal v{}", env!("CARGO_PKG_VERSION"));

    middleware::init_metrics().context("Failed to install metrics recorder")?;

    let addr = config.socket_addr().context("Invalid server address")?;
    let state = app::AppState::new(config, pool)?;
    state.uploads.ensure_dir().await?;

    let app = app::create_app(state);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
