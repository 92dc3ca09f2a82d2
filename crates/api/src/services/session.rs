//! Cookie-backed admin session and flash messages.
//!
//! Handlers take a [`Session`] extractor, mutate it, and return it as part of
//! the response; a `Set-Cookie` header is only emitted when something changed.

use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue},
    response::{IntoResponseParts, ResponseParts},
};
use shared::session::{Flash, FlashLevel, SessionCodec, SessionData, SessionError};

use crate::app::AppState;

pub const SESSION_COOKIE: &str = "session";

/// Reads and writes the session cookie.
#[derive(Debug, Clone)]
pub struct SessionStore {
    codec: Arc<SessionCodec>,
    secure: bool,
}

impl SessionStore {
    pub fn new(secret: &str, secure: bool) -> Result<Self, SessionError> {
        Ok(Self {
            codec: Arc::new(SessionCodec::new(secret)?),
            secure,
        })
    }

    /// Decodes the session from request headers. A missing, tampered or
    /// malformed cookie yields an empty session.
    pub fn load(&self, headers: &HeaderMap) -> SessionData {
        let Some(token) = extract_cookie(headers, SESSION_COOKIE) else {
            return SessionData::default();
        };

        match self.codec.decode(token) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(error = %e, "Discarding invalid session cookie");
                SessionData::default()
            }
        }
    }

    /// Builds the `Set-Cookie` value persisting `data`, or clearing the cookie
    /// when there is nothing left to store.
    pub fn set_cookie_header(&self, data: &SessionData) -> Result<String, SessionError> {
        if data.is_empty() {
            return Ok(self.build_cookie("", Some(0)));
        }
        let token = self.codec.encode(data)?;
        Ok(self.build_cookie(&token, None))
    }

    fn build_cookie(&self, value: &str, max_age: Option<i64>) -> String {
        let mut cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, value);
        if let Some(max_age) = max_age {
            cookie.push_str(&format!(
                "; Max-Age={}; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
                max_age
            ));
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// Extract a cookie value from request headers by name.
pub fn extract_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .map(str::trim)
        .find_map(|cookie| {
            let (cookie_name, value) = cookie.split_once('=')?;
            (cookie_name == name).then_some(value)
        })
}

/// The current request's session.
#[derive(Debug)]
pub struct Session {
    data: SessionData,
    store: SessionStore,
    dirty: bool,
}

impl Session {
    pub fn new(data: SessionData, store: SessionStore) -> Self {
        Self {
            data,
            store,
            dirty: false,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.data.admin_logged_in
    }

    pub fn log_in(&mut self, email: &str) {
        self.data.admin_logged_in = true;
        self.data.admin_email = Some(email.to_string());
        self.dirty = true;
    }

    /// Drops everything, including pending flashes.
    pub fn clear(&mut self) {
        self.data = SessionData::default();
        self.dirty = true;
    }

    pub fn flash(&mut self, level: FlashLevel, message: impl Into<String>) {
        self.data.flashes.push(Flash {
            level,
            message: message.into(),
        });
        self.dirty = true;
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.flash(FlashLevel::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.flash(FlashLevel::Warning, message);
    }

    pub fn danger(&mut self, message: impl Into<String>) {
        self.flash(FlashLevel::Danger, message);
    }

    /// Removes and returns pending flashes for rendering.
    pub fn take_flashes(&mut self) -> Vec<Flash> {
        if self.data.flashes.is_empty() {
            return Vec::new();
        }
        self.dirty = true;
        std::mem::take(&mut self.data.flashes)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let data = state.sessions.load(&parts.headers);
        Ok(Session::new(data, state.sessions.clone()))
    }
}

impl IntoResponseParts for Session {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if !self.dirty {
            return Ok(res);
        }

        match self
            .store
            .set_cookie_header(&self.data)
            .map(|cookie| HeaderValue::from_str(&cookie))
        {
            Ok(Ok(value)) => {
                res.headers_mut().append(header::SET_COOKIE, value);
            }
            Ok(Err(e)) => tracing::error!(error = %e, "Session cookie is not a valid header"),
            Err(e) => tracing::error!(error = %e, "Failed to encode session"),
        }
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    fn store() -> SessionStore {
        SessionStore::new("test-secret", false).unwrap()
    }

    fn cookie_value(set_cookie: &str) -> &str {
        set_cookie
            .split(';')
            .next()
            .and_then(|kv| kv.split_once('='))
            .map(|(_, v)| v)
            .unwrap()
    }

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("other=1; {}={}", SESSION_COOKIE, value)).unwrap(),
        );
        headers
    }

    #[test]
    fn test_cookie_roundtrip() {
        let store = store();
        let mut data = SessionData::default();
        data.admin_logged_in = true;
        data.admin_email = Some("admin@example.com".to_string());

        let set_cookie = store.set_cookie_header(&data).unwrap();
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=Lax"));
        assert!(!set_cookie.contains("Secure"));

        let loaded = store.load(&headers_with_cookie(cookie_value(&set_cookie)));
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_empty_session_clears_cookie() {
        let cookie = store().set_cookie_header(&SessionData::default()).unwrap();
        assert!(cookie.starts_with("session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_secure_flag() {
        let store = SessionStore::new("test-secret", true).unwrap();
        let cookie = store.set_cookie_header(&SessionData::default()).unwrap();
        assert!(cookie.ends_with("; Secure"));
    }

    #[test]
    fn test_tampered_cookie_is_ignored() {
        let loaded = store().load(&headers_with_cookie("not-a-token"));
        assert!(loaded.is_empty());

        let other = SessionStore::new("another-secret", false).unwrap();
        let mut data = SessionData::default();
        data.admin_logged_in = true;
        let forged = other.set_cookie_header(&data).unwrap();
        assert!(!store()
            .load(&headers_with_cookie(cookie_value(&forged)))
            .admin_logged_in);
    }

    #[test]
    fn test_extract_cookie() {
        let headers = headers_with_cookie("abc");
        assert_eq!(extract_cookie(&headers, "other"), Some("1"));
        assert_eq!(extract_cookie(&headers, SESSION_COOKIE), Some("abc"));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_flashes_are_one_shot() {
        let mut session = Session::new(SessionData::default(), store());
        session.success("Login realizado com sucesso.");
        let flashes = session.take_flashes();
        assert_eq!(flashes.len(), 1);
        assert_eq!(flashes[0].level, FlashLevel::Success);
        assert!(session.take_flashes().is_empty());
    }

    #[test]
    fn test_untouched_session_sets_no_cookie() {
        let session = Session::new(SessionData::default(), store());
        let response = (session, "ok").into_response();
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[test]
    fn test_log_in_sets_cookie_and_clear_removes_it() {
        let mut session = Session::new(SessionData::default(), store());
        session.log_in("admin@example.com");
        assert!(session.is_admin());
        assert_eq!(session.data.admin_email.as_deref(), Some("admin@example.com"));
        let response = (session, "ok").into_response();
        let cookie = response.headers().get(header::SET_COOKIE).unwrap();
        assert!(!cookie.to_str().unwrap().starts_with("session=;"));

        let mut session = Session::new(SessionData::default(), store());
        session.log_in("admin@example.com");
        session.clear();
        assert!(!session.is_admin());
        let response = (session, "ok").into_response();
        let cookie = response.headers().get(header::SET_COOKIE).unwrap();
        assert!(cookie.to_str().unwrap().starts_with("session=;"));
    }
}
