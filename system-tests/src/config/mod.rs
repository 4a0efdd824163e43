// system-tests/src/config/mod.rs
// ============================================================================
// Module: System Test Configuration
// Description: Optional settings for Idea Center system-test runs.
// Purpose: Provide typed access to artifact and fixture overrides.
// Dependencies: idea-center-client
// ============================================================================

//! ## Overview
//! Service URL and credentials live in [`idea_center_client::ClientConfig`].
//! This module covers the run-level knobs: where artifacts go and which seed
//! generates fixture values.

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

pub use env::SystemTestConfig;
pub use env::SystemTestEnv;
