// crates/idea-center-client/src/config/mod.rs
// ============================================================================
// Module: Client Configuration
// Description: Centralized configuration for the Idea Center client.
// Purpose: Provide typed access to the service URL and test credentials.
// Dependencies: thiserror, url
// ============================================================================

//! ## Overview
//! Client configuration is read from environment variables and mapped into a
//! small typed structure. Every required variable is checked up front so a
//! missing value fails with its name instead of a later network error.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::ClientConfig;
pub use env::ClientEnv;
pub use env::ConfigError;
pub use env::read_env_strict;
