//! Session cookie extractor.
//!
//! Reads `sessionid` and `django_language` from every `Cookie` header of the
//! request. Never rejects: a request without cookies yields an empty session
//! and the backend decides what an anonymous caller may see.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;

use chatddx_core::session::SessionCookies;

/// The browser's session cookies, ready to forward to the backend.
#[derive(Debug, Clone, Default)]
pub struct Session(pub SessionCookies);

impl<S: Send + Sync> FromRequestParts<S> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let headers = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok());

        Ok(Session(SessionCookies::from_cookie_headers(headers)))
    }
}
