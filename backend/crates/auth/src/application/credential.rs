//! Session Credential
//!
//! The client credential is a signed cookie whose payload is the user id,
//! base64url-encoded so any backend id survives the cookie header.
//! Decoding yields a candidate session store key, nothing more.

use axum::http::HeaderMap;
use kernel::id::UserId;

use crate::application::config::AuthConfig;

/// Cookie value for a logged-in user
pub fn issue_token(config: &AuthConfig, id: &UserId) -> String {
    platform::crypto::sign_token(&config.session_secret, id.as_str())
}

/// Verified payload of a cookie value
pub fn decode_token(config: &AuthConfig, token: &str) -> Option<String> {
    platform::crypto::verify_token(&config.session_secret, token)
}

/// Candidate session id carried by the request, if any
///
/// A missing cookie, a bad signature and a malformed value are all `None`.
pub fn session_id_from_headers(config: &AuthConfig, headers: &HeaderMap) -> Option<String> {
    let token = platform::cookie::extract_cookie(headers, &config.session_cookie_name)?;
    match decode_token(config, &token) {
        Some(session_id) => Some(session_id),
        None => {
            tracing::debug!("Discarding session cookie with invalid signature");
            None
        }
    }
}
