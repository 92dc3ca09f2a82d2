use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_admin_session, security_headers_middleware,
    trace_id,
};
use crate::routes::{admin_auth, admin_config, admin_dashboard, announcements, applications, health, public};
use crate::services::{Mailer, SessionStore, UploadStore};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub sessions: SessionStore,
    pub mailer: Arc<dyn Mailer>,
    pub uploads: UploadStore,
}

impl AppState {
    /// Builds the shared state. Fails when the session secret or the SMTP
    /// settings are unusable.
    pub fn new(config: Config, pool: PgPool) -> anyhow::Result<Self> {
        let sessions = SessionStore::new(&config.security.secret_key, config.security.cookie_secure)?;
        let mailer = crate::services::mailer_from_config(&config.email)?;
        let uploads = UploadStore::new(config.uploads.dir.clone());

        Ok(Self {
            pool,
            config: Arc::new(config),
            sessions,
            mailer,
            uploads,
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    let config = state.config.clone();

    // Admin pages; the session gate redirects to the login form.
    let admin_routes = Router::new()
        .route("/admin", get(admin_dashboard::dashboard))
        .route("/admin/inscricao/:id", get(admin_dashboard::application_detail))
        .route("/admin/inscricao/:id/status", post(admin_dashboard::update_status))
        .route(
            "/admin/config",
            get(admin_config::show_config).post(admin_config::update_config),
        )
        .route("/admin/avisos/novo", post(announcements::create_announcement))
        .route("/admin/avisos/:id/toggle", post(announcements::toggle_announcement))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin_session,
        ));

    let public_routes = Router::new()
        .route("/", get(public::index))
        .route("/programa/:slug", get(public::program_detail))
        .route(
            "/inscricao/:slug",
            get(applications::application_form).post(applications::submit_application),
        )
        .route(
            "/admin/login",
            get(admin_auth::login_form).post(admin_auth::login),
        )
        .route("/admin/logout", post(admin_auth::logout));

    let ops_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(ops_routes)
        .nest_service("/static/uploads", ServeDir::new(state.uploads.dir()))
        // Global middleware (order matters: bottom layers run first)
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .with_state(state)
}
