//! Program schedules and the confirmation email template.

use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use chrono::NaiveDate;
use domain::models::{EmailTemplateUpdate, Program, ProgramSchedule, SubmittedForm};
use persistence::repositories::{
    AnnouncementRepository, EmailTemplateRepository, ProgramRepository, SettingsRepository,
};
use tracing::{info, warn};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::Session;
use crate::views;

pub const CONFIG_PATH: &str = "/admin/config";

/// `GET /admin/config`
pub async fn show_config(
    State(state): State<AppState>,
    mut session: Session,
) -> Result<(Session, Html<String>), ApiError> {
    let programs = ProgramRepository::new(state.pool.clone()).list_all().await?;
    let template = EmailTemplateRepository::new(state.pool.clone())
        .get_or_create()
        .await?;
    let announcements = AnnouncementRepository::new(state.pool.clone())
        .list_all_with_program()
        .await?;

    let flashes = session.take_flashes();
    Ok((
        session,
        views::admin::config(&programs, &template, &announcements, &flashes),
    ))
}

/// `POST /admin/config`
///
/// Either every change is applied or, when any date is rejected, none is.
pub async fn update_config(
    State(state): State<AppState>,
    mut session: Session,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<(Session, Redirect), ApiError> {
    let form: SubmittedForm = pairs.into_iter().collect();
    let programs = ProgramRepository::new(state.pool.clone()).list_all().await?;

    let schedules = match parse_schedules(&programs, &form) {
        Ok(schedules) => schedules,
        Err(errors) => {
            warn!(errors = errors.len(), "Configuration update rejected");
            for error in errors {
                session.danger(error);
            }
            return Ok((session, Redirect::to(CONFIG_PATH)));
        }
    };

    let template_update = EmailTemplateUpdate::from_form(
        form.get("template_assunto").unwrap_or_default(),
        form.get("template_corpo").unwrap_or_default(),
    );
    let template = EmailTemplateRepository::new(state.pool.clone())
        .get_or_create()
        .await?;

    SettingsRepository::new(state.pool.clone())
        .apply(&schedules, template.id, &template_update)
        .await?;

    info!(programs = schedules.len(), "Configuration updated");
    session.success("Configurações atualizadas com sucesso.");
    Ok((session, Redirect::to(CONFIG_PATH)))
}

/// Blank means unset; anything else must be `YYYY-MM-DD`.
fn parse_optional_date(value: &str) -> Result<Option<NaiveDate>, ()> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ())
}

/// Reads `programa_<id>_data_abertura`, `programa_<id>_data_fechamento` and
/// `programa_<id>_ativo` for every program.
pub fn parse_schedules(
    programs: &[Program],
    form: &SubmittedForm,
) -> Result<Vec<ProgramSchedule>, Vec<String>> {
    let mut schedules = Vec::with_capacity(programs.len());
    let mut errors = Vec::new();

    for program in programs {
        let prefix = format!("programa_{}_", program.id);
        let open = parse_optional_date(&form.trimmed(&format!("{prefix}data_abertura")));
        let close = parse_optional_date(&form.trimmed(&format!("{prefix}data_fechamento")));

        let (open_date, close_date) = match (open, close) {
            (Ok(open), Ok(close)) => (open, close),
            (open, close) => {
                if open.is_err() {
                    errors.push(format!("Data de abertura inválida para {}.", program.name));
                }
                if close.is_err() {
                    errors.push(format!("Data de fechamento inválida para {}.", program.name));
                }
                continue;
            }
        };

        let schedule = ProgramSchedule {
            program_id: program.id,
            open_date,
            close_date,
            active: form.is_checked(&format!("{prefix}ativo")),
        };
        if schedule.validate().is_err() {
            errors.push(format!(
                "A data de abertura de {} não pode ser posterior à data de fechamento.",
                program.name
            ));
            continue;
        }
        schedules.push(schedule);
    }

    if errors.is_empty() {
        Ok(schedules)
    } else {
        Err(errors)
    }
}
