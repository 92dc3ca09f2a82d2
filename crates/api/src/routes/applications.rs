//! Application form and submission.

use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use domain::models::{Program, SubmittedForm};
use persistence::repositories::{ApplicationRepository, EmailTemplateRepository, ProgramRepository};
use tracing::info;

use super::today;
use crate::app::AppState;
use crate::error::ApiError;
use crate::services::submission::{
    notify_applicant, persist_submission, validate_submission, SubmissionForm,
};
use crate::services::Session;
use crate::views;

pub const SUBMISSION_SUCCESS: &str =
    "Inscrição realizada com sucesso! Você receberá um email de confirmação.";

async fn find_program(state: &AppState, slug: &str) -> Result<Program, ApiError> {
    ProgramRepository::new(state.pool.clone())
        .find_active_by_slug(slug)
        .await?
        .ok_or_else(ApiError::not_found)
}

fn program_page(program: &Program) -> Redirect {
    Redirect::to(&format!("/programa/{}", program.slug))
}

/// Flashes the window warning and returns the redirect when the program is
/// not accepting submissions today.
fn reject_outside_window(program: &Program, session: &mut Session) -> Option<Redirect> {
    let message = program.window_state(today()).rejection_message()?;
    session.warning(message);
    Some(program_page(program))
}

/// `GET /inscricao/:slug`
pub async fn application_form(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    mut session: Session,
) -> Result<Response, ApiError> {
    let program = find_program(&state, &slug).await?;
    if let Some(redirect) = reject_outside_window(&program, &mut session) {
        return Ok((session, redirect).into_response());
    }

    let flashes = session.take_flashes();
    let page = views::public::application_form(&program, &SubmittedForm::new(), &[], &flashes);
    Ok((session, page).into_response())
}

/// `POST /inscricao/:slug`
///
/// Validation failures re-render the form with every message. A stored
/// application is followed by the confirmation email and a redirect to the
/// program page.
pub async fn submit_application(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    mut session: Session,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let program = find_program(&state, &slug).await?;
    if let Some(redirect) = reject_outside_window(&program, &mut session) {
        return Ok((session, redirect).into_response());
    }

    let form = SubmissionForm::from_multipart(multipart).await?;
    let fields = form.fields.clone();

    let submission = match validate_submission(&program, form, Utc::now()) {
        Ok(submission) => submission,
        Err(errors) => {
            info!(program = %program.slug, errors = errors.len(), "Submission rejected");
            let flashes = session.take_flashes();
            let page = views::public::application_form(&program, &fields, &errors, &flashes);
            return Ok((session, page).into_response());
        }
    };

    let application = persist_submission(
        &state.uploads,
        &ApplicationRepository::new(state.pool.clone()),
        submission,
    )
    .await?;

    info!(
        application_id = application.id,
        program = %program.slug,
        "Application submitted"
    );

    notify_applicant(
        state.mailer.as_ref(),
        &EmailTemplateRepository::new(state.pool.clone()),
        &application,
        &program,
    )
    .await;

    session.success(SUBMISSION_SUCCESS);
    Ok((session, program_page(&program)).into_response())
}
