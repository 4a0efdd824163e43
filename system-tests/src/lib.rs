// system-tests/src/lib.rs
// ============================================================================
// Module: Idea Center System Tests Library
// Description: Ordered scenario runner for the Idea Center API.
// Purpose: Provide the fixture context, scenarios, driver, and run artifacts.
// Dependencies: idea-center-client, rand, serde, serde_jcs, thiserror, tracing
// ============================================================================

//! ## Overview
//! This crate runs the Idea Center CRUD lifecycle as a fixed sequence of
//! scenarios. Scenarios depend on each other, so the order is hardcoded in
//! [`runner::SuiteRunner::run`] and the shared state is an explicit
//! [`fixture::FixtureState`] passed by `&mut` into each scenario.
//! A setup failure (configuration or authentication) aborts the run before
//! any scenario executes; an assertion failure is recorded and the run goes on.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod artifacts;
pub mod config;
pub mod fixture;
pub mod report;
pub mod runner;
pub mod scenarios;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use fixture::FixtureState;
pub use fixture::IdeaGenerator;
pub use report::ScenarioOutcome;
pub use report::ScenarioStatus;
pub use report::SuiteReport;
pub use runner::SetupFailure;
pub use runner::SuiteRunner;
pub use runner::run_suite;
pub use scenarios::AssertionFailure;
pub use scenarios::Scenario;
