// crates/idea-center-client/src/model.rs
// ============================================================================
// Module: Idea Center Model
// Description: Wire types for the Idea Center REST API.
// Purpose: Define request bodies, response envelopes, and raw responses.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Request and response payloads exchanged with the Idea Center service.
//! Envelopes are decoded leniently: unknown fields are ignored and a missing
//! `msg` decodes as an empty string, since assertions compare it explicitly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de::DeserializeOwned;

// ============================================================================
// SECTION: Credentials
// ============================================================================

/// Account credentials exchanged for a bearer token.
///
/// # Invariants
/// - The password never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Account email.
    email: String,
    /// Account password.
    password: String,
}

impl Credentials {
    /// Creates credentials from an email and password.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns the account email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the account password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// Idea body submitted to create and edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaDto {
    /// Idea title; the service rejects an empty title.
    pub title: String,
    /// Idea description.
    pub description: String,
    /// Optional image URL.
    #[serde(default)]
    pub url: Option<String>,
}

impl IdeaDto {
    /// Builds an idea body.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url,
        }
    }
}

/// Response envelope returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponseDto {
    /// Human-readable status message; `null` decodes as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub msg: String,
    /// Entity identifier when the response refers to one idea.
    #[serde(default)]
    pub id: Option<String>,
}

/// Decodes a nullable string, mapping `null` to an empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// SECTION: Raw Response
// ============================================================================

/// Raw status and body of one service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as UTF-8 (lossy).
    pub body: String,
}

impl ApiResponse {
    /// Returns true when the status equals `expected`.
    #[must_use]
    pub const fn has_status(&self, expected: u16) -> bool {
        self.status == expected
    }

    /// Returns true when the body contains `needle`.
    #[must_use]
    pub fn body_contains(&self, needle: &str) -> bool {
        self.body.contains(needle)
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the body is not the expected JSON shape.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Decodes the body as a single envelope.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the body is not an envelope object.
    pub fn envelope(&self) -> Result<ApiResponseDto, serde_json::Error> {
        self.json()
    }

    /// Decodes the body as an ordered list of envelopes.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the body is not an array of envelopes.
    pub fn envelopes(&self) -> Result<Vec<ApiResponseDto>, serde_json::Error> {
        self.json()
    }
}
