//! HTTP route handlers.

pub mod admin_auth;
pub mod admin_config;
pub mod admin_dashboard;
pub mod announcements;
pub mod applications;
pub mod health;
pub mod public;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use chrono::{Local, NaiveDate};

use crate::error::ApiError;

/// Date used for submission windows, in the server's local time zone.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Numeric `:id` path segment.
///
/// Anything that does not parse as an id renders the not-found page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::not_found())?;
        raw.parse().map(RecordId).map_err(|_| ApiError::not_found())
    }
}
