// crates/idea-center-client/src/config/env.rs
// ============================================================================
// Module: Client Environment
// Description: Environment-backed configuration for the Idea Center client.
// Purpose: Centralize env parsing with strict UTF-8 and URL validation.
// Dependencies: thiserror, url
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Missing, empty, or invalid values fail closed with the
//! offending variable name.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsString;

use thiserror::Error;
use url::Url;

use crate::model::Credentials;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for client configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientEnv {
    /// Account email used for authentication.
    UserEmail,
    /// Account password used for authentication.
    UserPassword,
    /// Base URL of the Idea Center service.
    BaseUrl,
}

impl ClientEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserEmail => "TEST_USER_EMAIL",
            Self::UserPassword => "TEST_USER_PASSWORD",
            Self::BaseUrl => "BASE_URL",
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors raised before any network traffic.
///
/// # Invariants
/// - `name` always carries the environment variable that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Required variable is not set.
    #[error("{name} is required but not set")]
    Missing {
        /// Variable name.
        name: String,
    },
    /// Variable is set but empty or whitespace.
    #[error("{name} must not be empty")]
    Empty {
        /// Variable name.
        name: String,
    },
    /// Variable is not valid UTF-8.
    #[error("{name} must be valid UTF-8")]
    InvalidUtf8 {
        /// Variable name.
        name: String,
    },
    /// Base URL is not an absolute http(s) URL.
    #[error("{name} is not a valid http(s) url: {reason}")]
    InvalidBaseUrl {
        /// Variable name.
        name: String,
        /// Parser or validation detail.
        reason: String,
    },
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed client configuration derived from environment variables.
///
/// # Invariants
/// - `base_url` is an absolute http(s) URL without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Normalized service base URL.
    base_url: String,
    /// Account credentials.
    credentials: Credentials,
}

impl ClientConfig {
    /// Builds configuration from an explicit base URL and credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when the URL is not absolute http(s).
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(ClientEnv::BaseUrl.as_str(), base_url)?;
        Ok(Self {
            base_url,
            credentials,
        })
    }

    /// Loads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when a required variable is missing, empty, not valid
    /// UTF-8, or when the base URL fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    /// Loads configuration through an injected variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::load`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let email = require(&lookup, ClientEnv::UserEmail.as_str())?;
        let password = require(&lookup, ClientEnv::UserPassword.as_str())?;
        let base_url = require(&lookup, ClientEnv::BaseUrl.as_str())?;
        Self::new(&base_url, Credentials::new(email, password))
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the configured credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, ConfigError> {
    decode(name, std::env::var_os(name))
}

/// Converts a raw lookup result into UTF-8.
fn decode(name: &str, raw: Option<OsString>) -> Result<Option<String>, ConfigError> {
    raw.map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| ConfigError::InvalidUtf8 {
            name: name.to_string(),
        })
    })
}

/// Reads a required variable through the lookup and rejects empty values.
fn require<F>(lookup: &F, name: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<OsString>,
{
    match decode(name, lookup(name))? {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty {
            name: name.to_string(),
        }),
        Some(value) => Ok(value),
        None => Err(ConfigError::Missing {
            name: name.to_string(),
        }),
    }
}

/// Validates an absolute http(s) URL and strips trailing slashes.
fn normalize_base_url(name: &str, raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        name: name.to_string(),
        reason,
    };
    let parsed = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", parsed.scheme())));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_string()));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
