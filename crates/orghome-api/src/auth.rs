//! Resolving the requesting viewer from the session cookie.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use orghome_core::organization::Viewer;
use sha2::{Digest, Sha256};

use crate::AppState;
use crate::error::ApiError;

/// Cookie holding the raw session token.
pub const SESSION_COOKIE: &str = "orghome_session";

/// The signed-in viewer, or `None` for anonymous requests.
#[derive(Debug, Clone)]
pub struct CurrentViewer(pub Option<Viewer>);

/// Sessions are stored by the hex SHA-256 of their token.
pub fn hash_session_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

impl FromRequestParts<AppState> for CurrentViewer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = match jar.get(SESSION_COOKIE) {
            Some(cookie) if !cookie.value().is_empty() => cookie.value().to_string(),
            _ => return Ok(CurrentViewer(None)),
        };

        let viewer = state
            .users
            .get_viewer_by_session(&hash_session_token(&token))
            .await
            .map_err(|e| ApiError::server_error("session lookup", e))?;

        Ok(CurrentViewer(viewer))
    }
}
