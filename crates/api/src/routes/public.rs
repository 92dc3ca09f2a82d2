//! Public program pages.

use axum::{
    extract::{Path, State},
    response::Html,
};
use persistence::repositories::{AnnouncementRepository, ProgramRepository};

use super::today;
use crate::app::AppState;
use crate::error::ApiError;
use crate::services::Session;
use crate::views;

/// `GET /`: active programs.
pub async fn index(
    State(state): State<AppState>,
    mut session: Session,
) -> Result<(Session, Html<String>), ApiError> {
    let programs = ProgramRepository::new(state.pool.clone())
        .list_active()
        .await?;

    let flashes = session.take_flashes();
    Ok((session, views::public::index(&programs, &flashes)))
}

/// `GET /programa/:slug`: details, window state and active announcements.
/// Inactive programs are not found.
pub async fn program_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    mut session: Session,
) -> Result<(Session, Html<String>), ApiError> {
    let program = ProgramRepository::new(state.pool.clone())
        .find_active_by_slug(&slug)
        .await?
        .ok_or_else(ApiError::not_found)?;

    let announcements = AnnouncementRepository::new(state.pool.clone())
        .list_active_for_program(program.id)
        .await?;

    let window = program.window_state(today());
    let flashes = session.take_flashes();
    Ok((
        session,
        views::public::program_detail(&program, window, &announcements, &flashes),
    ))
}
