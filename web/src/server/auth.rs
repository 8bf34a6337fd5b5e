//! Identity resolution and password hashing.
//!
//! Sessions are plain rows keyed by an opaque token carried in an HttpOnly
//! cookie. Passwords are stored as Argon2id PHC strings.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::http::{header, HeaderMap};
use leptos::ServerFnError;

use crate::app::AppState;
use crate::server::store::StoreError;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "taxa_session";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

// ─── Passwords ───────────────────────────────────────────────────────────────

/// Hash a password with Argon2id, returning the PHC-formatted string that
/// embeds the salt and parameters.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// Verify a password against a stored PHC hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AuthError::Hash(format!("invalid password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

// ─── Session cookie ──────────────────────────────────────────────────────────

/// Pull the session token out of a request's Cookie headers.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((name, token)) = pair.trim().split_once('=') {
                if name == SESSION_COOKIE && !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }
    None
}

/// Set-Cookie value establishing a session.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// Set-Cookie value tearing a session down.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

// ─── Identity resolution ─────────────────────────────────────────────────────

/// Resolve the current caller's profile id from the request's session
/// cookie. `Ok(None)` means no live session; callers decide whether that is
/// an error (the edit path) or normal (the nav indicator).
pub async fn current_profile(state: &AppState) -> Result<Option<String>, ServerFnError> {
    let headers: HeaderMap = leptos_axum::extract().await?;
    let Some(token) = session_token(&headers) else {
        return Ok(None);
    };
    state
        .sessions
        .session_profile(&token)
        .map_err(|e| ServerFnError::new(format!("Session lookup error: {e}")))
}

// ─── tests ───────────────────────────────────────────────────────────────────
