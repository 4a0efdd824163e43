// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for Idea Center system-tests.
// Purpose: Provide the in-process Idea Center stub and driver helpers.
// Dependencies: axum, idea-center-client
// ============================================================================

//! ## Overview
//! Shared helpers for Idea Center system-tests.
//! Invariants:
//! - Stub servers bind loopback only and shut down on drop.
//! - Stub state is inspectable so tests can check server-side effects.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod idea_stub;
