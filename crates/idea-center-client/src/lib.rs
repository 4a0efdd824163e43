// crates/idea-center-client/src/lib.rs
// ============================================================================
// Module: Idea Center Client Library
// Description: Typed HTTP client for the Idea Center REST API.
// Purpose: Provide configuration, authentication, and CRUD calls for system tests.
// Dependencies: reqwest, serde, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! This crate wraps the Idea Center REST surface used by the system-test
//! suite: environment-backed configuration, the one-shot bearer token
//! exchange, and verb-specific calls that return the raw status and body so
//! callers can assert on them.
//! Security posture: remote responses are untrusted; bodies are size-capped
//! and credentials never appear in `Debug` output or log fields.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod auth;
pub mod client;
pub mod config;
pub mod model;
pub mod telemetry;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use auth::AuthError;
pub use auth::SessionToken;
pub use auth::authenticate;
pub use client::ClientError;
pub use client::IdeaClient;
pub use client::TranscriptEntry;
pub use config::ClientConfig;
pub use config::ConfigError;
pub use model::ApiResponse;
pub use model::ApiResponseDto;
pub use model::Credentials;
pub use model::IdeaDto;
