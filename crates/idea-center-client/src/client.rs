// crates/idea-center-client/src/client.rs
// ============================================================================
// Module: Idea Client
// Description: Authenticated HTTP client for Idea Center CRUD endpoints.
// Purpose: Issue create/list/edit/delete calls and capture a call transcript.
// Dependencies: reqwest, serde, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! [`IdeaClient`] attaches the session token to every request and returns the
//! raw status and body so callers decide what counts as success; a 400 is a
//! normal result here, not an error. Calls are never retried.
//! Security posture: response bodies are untrusted and size-capped; the token
//! is excluded from the transcript and from log fields.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;

use reqwest::Client;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::auth::SessionToken;
use crate::config::ClientConfig;
use crate::model::ApiResponse;
use crate::model::IdeaDto;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum response body size accepted from the service.
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Create endpoint path.
pub const CREATE_PATH: &str = "/api/Idea/Create";
/// List endpoint path.
pub const LIST_PATH: &str = "/api/Idea/All";
/// Edit endpoint path.
pub const EDIT_PATH: &str = "/api/Idea/Edit";
/// Delete endpoint path.
pub const DELETE_PATH: &str = "/api/Idea/Delete";
/// Query parameter carrying the target idea id.
pub const IDEA_ID_PARAM: &str = "ideaId";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Idea client errors.
///
/// # Invariants
/// - Variants are stable for scenario failure mapping.
/// - A non-2xx status is not an error; it is returned in [`ApiResponse`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP client could not be constructed.
    #[error("idea client build error: {0}")]
    Build(String),
    /// Request could not be sent or the body could not be read.
    #[error("idea client transport error: {0}")]
    Transport(String),
    /// Request body could not be serialized.
    #[error("idea client json error: {0}")]
    Json(String),
    /// Response body exceeds the size limit.
    #[error("idea client response exceeds size limit ({actual} > {limit})")]
    ResponseTooLarge {
        /// Actual size in bytes.
        actual: usize,
        /// Maximum size in bytes.
        limit: usize,
    },
}

/// One recorded service call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    /// 1-based call order.
    pub sequence: u64,
    /// HTTP method.
    pub method: String,
    /// Endpoint path.
    pub path: String,
    /// `ideaId` query value when present.
    pub idea_id: Option<String>,
    /// JSON request body when present.
    pub request: Option<Value>,
    /// HTTP status code.
    pub status: u16,
    /// Response body text.
    pub response: String,
}

/// Authenticated client for the Idea Center API.
///
/// # Invariants
/// - Every request carries the bearer token.
/// - Transcript entries are appended in call order.
pub struct IdeaClient {
    /// Underlying HTTP client.
    http: Client,
    /// Normalized base URL.
    base_url: String,
    /// Bearer token for the run.
    token: SessionToken,
    /// Recorded calls.
    transcript: Mutex<Vec<TranscriptEntry>>,
}

impl std::fmt::Debug for IdeaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdeaClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

impl IdeaClient {
    /// Builds a client for the configured service with an issued token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] when the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig, token: SessionToken) -> Result<Self, ClientError> {
        let http = Client::builder().build().map_err(|err| ClientError::Build(err.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            token,
            transcript: Mutex::new(Vec::new()),
        })
    }

    /// Returns the base URL for the service.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a snapshot of the transcript entries.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Issues `POST /api/Idea/Create`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or body-size failures.
    pub async fn create_idea(&self, idea: &IdeaDto) -> Result<ApiResponse, ClientError> {
        self.send(Method::POST, CREATE_PATH, None, Some(idea)).await
    }

    /// Issues `GET /api/Idea/All`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or body-size failures.
    pub async fn list_ideas(&self) -> Result<ApiResponse, ClientError> {
        self.send(Method::GET, LIST_PATH, None, None).await
    }

    /// Issues `PUT /api/Idea/Edit?ideaId=<id>`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or body-size failures.
    pub async fn edit_idea(&self, id: &str, idea: &IdeaDto) -> Result<ApiResponse, ClientError> {
        self.send(Method::PUT, EDIT_PATH, Some(id), Some(idea)).await
    }

    /// Issues `DELETE /api/Idea/Delete?ideaId=<id>`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or body-size failures.
    pub async fn delete_idea(&self, id: &str) -> Result<ApiResponse, ClientError> {
        self.send(Method::DELETE, DELETE_PATH, Some(id), None).await
    }

    /// Sends one authenticated request and records it.
    async fn send(
        &self,
        method: Method,
        path: &str,
        idea_id: Option<&str>,
        body: Option<&IdeaDto>,
    ) -> Result<ApiResponse, ClientError> {
        let request_body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|err| ClientError::Json(err.to_string()))?;
        let url = format!("{}{path}", self.base_url);
        let mut request =
            self.http.request(method.clone(), &url).bearer_auth(self.token.as_str());
        if let Some(id) = idea_id {
            request = request.query(&[(IDEA_ID_PARAM, id)]);
        }
        if let Some(body) = &request_body {
            request = request.json(body);
        }
        let response =
            request.send().await.map_err(|err| ClientError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let bytes = read_body_with_limit(response, MAX_RESPONSE_BYTES).await?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        tracing::debug!(method = %method, path, idea_id, status, "idea center call");
        self.record(&method, path, idea_id, request_body, status, &text);
        Ok(ApiResponse {
            status,
            body: text,
        })
    }

    /// Appends a transcript entry.
    fn record(
        &self,
        method: &Method,
        path: &str,
        idea_id: Option<&str>,
        request: Option<Value>,
        status: u16,
        response: &str,
    ) {
        let Ok(mut guard) = self.transcript.lock() else {
            return;
        };
        let sequence = u64::try_from(guard.len()).unwrap_or(u64::MAX).saturating_add(1);
        guard.push(TranscriptEntry {
            sequence,
            method: method.as_str().to_string(),
            path: path.to_string(),
            idea_id: idea_id.map(ToString::to_string),
            request,
            status,
            response: response.to_string(),
        });
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a response body, failing once it exceeds `limit` bytes.
///
/// # Errors
///
/// Returns [`ClientError::ResponseTooLarge`] when the limit is exceeded and
/// [`ClientError::Transport`] when a chunk cannot be read.
pub(crate) async fn read_body_with_limit(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, ClientError> {
    let mut body = Vec::new();
    while let Some(chunk) =
        response.chunk().await.map_err(|err| ClientError::Transport(err.to_string()))?
    {
        let next_total = body.len().checked_add(chunk.len()).ok_or(
            ClientError::ResponseTooLarge {
                actual: usize::MAX,
                limit,
            },
        )?;
        if next_total > limit {
            return Err(ClientError::ResponseTooLarge {
                actual: next_total,
                limit,
            });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
