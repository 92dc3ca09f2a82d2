//! Gate for admin-only routes.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::app::AppState;

pub const LOGIN_PATH: &str = "/admin/login";

/// Redirects to the login page unless the session carries the admin flag.
pub async fn require_admin_session(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let session = state.sessions.load(req.headers());
    if !session.admin_logged_in {
        debug!(path = %req.uri().path(), "Admin session required");
        return Redirect::to(LOGIN_PATH).into_response();
    }

    next.run(req).await
}
