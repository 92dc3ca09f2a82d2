//! Dashboard, application detail and status changes.

use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form,
};
use domain::models::{ApplicationFilter, ApplicationStatus, DashboardQuery};
use persistence::repositories::{ApplicationRepository, ProgramRepository};
use serde::Deserialize;
use tracing::info;

use super::RecordId;
use crate::app::AppState;
use crate::error::ApiError;
use crate::services::Session;
use crate::views;

pub const INVALID_STATUS: &str = "Status inválido.";

/// `GET /admin`
///
/// Filters narrow the table only; the counts always cover every application.
pub async fn dashboard(
    State(state): State<AppState>,
    mut session: Session,
    Query(query): Query<DashboardQuery>,
) -> Result<(Session, Html<String>), ApiError> {
    let filter = ApplicationFilter::from(&query);

    let programs = ProgramRepository::new(state.pool.clone()).list_all().await?;
    let applications = ApplicationRepository::new(state.pool.clone());
    let items = applications.list_filtered(&filter).await?;
    let counts = applications.status_counts().await?;

    let flashes = session.take_flashes();
    let page = views::admin::dashboard(&programs, &items, &filter, &counts, &flashes);
    Ok((session, page))
}

/// `GET /admin/inscricao/:id`
pub async fn application_detail(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    mut session: Session,
) -> Result<(Session, Html<String>), ApiError> {
    let application = ApplicationRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(ApiError::not_found)?;

    let program_name = ProgramRepository::new(state.pool.clone())
        .find_by_id(application.program_id)
        .await?
        .map(|p| p.name)
        .unwrap_or_default();

    let flashes = session.take_flashes();
    Ok((
        session,
        views::admin::application_detail(&application, &program_name, &flashes),
    ))
}

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    #[serde(default)]
    pub status: String,
}

/// `POST /admin/inscricao/:id/status`
///
/// The status value is checked before the id is looked up.
pub async fn update_status(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    mut session: Session,
    Form(form): Form<StatusForm>,
) -> Result<(Session, Redirect), ApiError> {
    let Ok(status) = form.status.parse::<ApplicationStatus>() else {
        session.danger(INVALID_STATUS);
        return Ok((session, Redirect::to("/admin")));
    };

    let application = ApplicationRepository::new(state.pool.clone())
        .update_status(id, status)
        .await?
        .ok_or_else(ApiError::not_found)?;

    info!(application_id = application.id, status = %status, "Application status updated");
    session.success("Status atualizado com sucesso.");
    Ok((session, Redirect::to("/admin")))
}
