//! Announcement creation and activation toggle.

use axum::{
    extract::State,
    response::Redirect,
    Form,
};
use domain::models::NewAnnouncement;
use persistence::repositories::{AnnouncementRepository, ProgramRepository};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use super::admin_config::CONFIG_PATH;
use super::RecordId;
use crate::app::AppState;
use crate::error::ApiError;
use crate::services::Session;

pub const INVALID_PROGRAM: &str = "Programa inválido.";
pub const MISSING_FIELDS: &str = "Título e descrição do aviso são obrigatórios.";
pub const TITLE_TOO_LONG: &str = "O título do aviso deve ter no máximo 255 caracteres.";

#[derive(Debug, Deserialize)]
pub struct AnnouncementForm {
    #[serde(default)]
    pub programa_id: String,
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub descricao: String,
}

fn parse_program_id(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// `POST /admin/avisos/novo`
pub async fn create_announcement(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<AnnouncementForm>,
) -> Result<(Session, Redirect), ApiError> {
    let redirect = Redirect::to(CONFIG_PATH);

    let program = match parse_program_id(&form.programa_id) {
        Some(id) => ProgramRepository::new(state.pool.clone()).find_by_id(id).await?,
        None => None,
    };
    let Some(program) = program else {
        session.danger(INVALID_PROGRAM);
        return Ok((session, redirect));
    };

    let announcement = NewAnnouncement {
        program_id: program.id,
        title: form.titulo.trim().to_string(),
        body: form.descricao.trim().to_string(),
    };
    if announcement.title.is_empty() || announcement.body.is_empty() {
        session.danger(MISSING_FIELDS);
        return Ok((session, redirect));
    }
    if announcement.validate().is_err() {
        session.danger(TITLE_TOO_LONG);
        return Ok((session, redirect));
    }

    let created = AnnouncementRepository::new(state.pool.clone())
        .create(&announcement)
        .await?;

    info!(announcement_id = created.id, program = %program.slug, "Announcement created");
    session.success("Aviso criado com sucesso.");
    Ok((session, redirect))
}

/// `POST /admin/avisos/:id/toggle`
pub async fn toggle_announcement(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    mut session: Session,
) -> Result<(Session, Redirect), ApiError> {
    let announcement = AnnouncementRepository::new(state.pool.clone())
        .toggle(id)
        .await?
        .ok_or_else(ApiError::not_found)?;

    info!(announcement_id = announcement.id, active = announcement.active, "Announcement toggled");
    session.success("Aviso atualizado com sucesso.");
    Ok((session, Redirect::to(CONFIG_PATH)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_program_id() {
        assert_eq!(parse_program_id("12"), Some(12));
        assert_eq!(parse_program_id(" 3 "), Some(3));
        assert_eq!(parse_program_id(""), None);
        assert_eq!(parse_program_id("-1"), None);
        assert_eq!(parse_program_id("abc"), None);
    }
}
