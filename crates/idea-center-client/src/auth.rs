// crates/idea-center-client/src/auth.rs
// ============================================================================
// Module: Authentication
// Description: One-shot credential exchange for an Idea Center bearer token.
// Purpose: Obtain the session token attached to every subsequent call.
// Dependencies: reqwest, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! The service issues a JWT from `POST /api/User/Authentication`. The token is
//! treated as an opaque string: it is never parsed, refreshed, or logged.
//! Any non-200 status, undecodable body, or absent/empty `accessToken` is an
//! [`AuthError`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::client::MAX_RESPONSE_BYTES;
use crate::client::read_body_with_limit;
use crate::config::ClientConfig;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Authentication endpoint path.
pub const AUTHENTICATION_PATH: &str = "/api/User/Authentication";

/// JSON field carrying the issued token.
const ACCESS_TOKEN_FIELD: &str = "accessToken";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Opaque bearer token for one suite run.
///
/// # Invariants
/// - The wrapped value is non-empty.
/// - The value never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Returns the raw token for the `Authorization` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Authentication failures.
///
/// # Invariants
/// - Variants are stable for setup-failure reporting.
/// - `body` is untrusted server text.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Service answered with a status other than 200.
    #[error("authentication failed: http status {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },
    /// Service answered 200 without a usable token.
    #[error("authentication failed: no token received")]
    MissingToken,
    /// Request could not be sent or the body could not be read.
    #[error("authentication transport error: {0}")]
    Transport(String),
    /// Response body was not JSON.
    #[error("authentication response decode error: {0}")]
    Decode(String),
}

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Exchanges the configured credentials for a bearer token.
///
/// # Errors
///
/// Returns [`AuthError`] when the service is unreachable, rejects the
/// credentials, or returns no token.
pub async fn authenticate(config: &ClientConfig) -> Result<SessionToken, AuthError> {
    let url = format!("{}{AUTHENTICATION_PATH}", config.base_url());
    tracing::info!(base_url = config.base_url(), "requesting session token");
    let http = Client::builder().build().map_err(|err| AuthError::Transport(err.to_string()))?;
    let response = http
        .post(&url)
        .json(config.credentials())
        .send()
        .await
        .map_err(|err| AuthError::Transport(err.to_string()))?;
    let status = response.status().as_u16();
    let body = read_body_with_limit(response, MAX_RESPONSE_BYTES)
        .await
        .map_err(|err| AuthError::Transport(err.to_string()))?;
    let result = parse_access_token(status, &String::from_utf8_lossy(&body));
    match &result {
        Ok(_) => tracing::info!(status, "session token issued"),
        Err(err) => tracing::warn!(status, error = %err, "authentication failed"),
    }
    result
}

/// Extracts the token from an authentication response.
///
/// # Errors
///
/// Returns [`AuthError::Rejected`] for non-200 statuses,
/// [`AuthError::Decode`] for non-JSON bodies, and
/// [`AuthError::MissingToken`] when the token is absent, not a string, or empty.
pub fn parse_access_token(status: u16, body: &str) -> Result<SessionToken, AuthError> {
    if status != 200 {
        return Err(AuthError::Rejected {
            status,
            body: body.to_string(),
        });
    }
    let value: Value =
        serde_json::from_str(body).map_err(|err| AuthError::Decode(err.to_string()))?;
    match value.get(ACCESS_TOKEN_FIELD).and_then(Value::as_str) {
        Some(token) if !token.trim().is_empty() => Ok(SessionToken(token.to_string())),
        _ => Err(AuthError::MissingToken),
    }
}
