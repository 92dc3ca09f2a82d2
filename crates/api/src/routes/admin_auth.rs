//! Admin login and logout.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use persistence::repositories::AdminUserRepository;
use serde::Deserialize;
use shared::password::{verify_against_decoy, verify_password};
use shared::session::{Flash, FlashLevel};
use tracing::{info, warn};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::admin_session::LOGIN_PATH;
use crate::services::Session;
use crate::views;

pub const INVALID_CREDENTIALS: &str = "Credenciais inválidas.";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub senha: String,
}

/// `GET /admin/login`
pub async fn login_form(mut session: Session) -> (Session, Html<String>) {
    let flashes = session.take_flashes();
    (session, views::admin::login("", &flashes))
}

/// `POST /admin/login`
///
/// Unknown emails still pay for one hash verification.
pub async fn login(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    let email = form.email.trim();
    let password = form.senha.trim();

    let admin = AdminUserRepository::new(state.pool.clone())
        .find_by_email(email)
        .await?;

    let verified = match &admin {
        Some(admin) => verify_password(password, &admin.password_hash).unwrap_or_else(|e| {
            warn!(admin_id = admin.id, error = %e, "Stored password hash is unusable");
            false
        }),
        None => verify_against_decoy(password),
    };

    match admin {
        Some(admin) if verified => {
            info!(admin_id = admin.id, "Admin logged in");
            session.log_in(&admin.email);
            session.success("Login realizado com sucesso.");
            Ok((session, Redirect::to("/admin")).into_response())
        }
        _ => {
            warn!(email = %email, "Failed admin login");
            let mut flashes = session.take_flashes();
            flashes.push(Flash {
                level: FlashLevel::Danger,
                message: INVALID_CREDENTIALS.to_string(),
            });
            Ok((session, views::admin::login(email, &flashes)).into_response())
        }
    }
}

/// `POST /admin/logout`: drops the whole session.
pub async fn logout(mut session: Session) -> (Session, Redirect) {
    session.clear();
    session.success("Logout realizado com sucesso.");
    (session, Redirect::to(LOGIN_PATH))
}
