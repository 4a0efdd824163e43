// system-tests/src/runner.rs
// ============================================================================
// Module: Suite Runner
// Description: Sequential driver for the ordered Idea Center scenarios.
// Purpose: Authenticate once, then run scenarios 1 through 7 in order.
// Dependencies: idea-center-client, thiserror, tracing
// ============================================================================

//! ## Overview
//! [`SuiteRunner::setup`] performs the one-time token exchange and builds the
//! authenticated client; any failure there is a [`SetupFailure`] and no
//! scenario runs. [`SuiteRunner::run`] then executes [`Scenario::ORDERED`]
//! one at a time, recording every outcome. An assertion failure never stops
//! the run; scenarios that need a slot an earlier one failed to fill report a
//! precondition failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Instant;

use idea_center_client::AuthError;
use idea_center_client::ClientConfig;
use idea_center_client::ClientError;
use idea_center_client::ConfigError;
use idea_center_client::IdeaClient;
use idea_center_client::TranscriptEntry;
use idea_center_client::authenticate;
use thiserror::Error;

use crate::fixture::FixtureState;
use crate::fixture::IdeaGenerator;
use crate::report::ScenarioOutcome;
use crate::report::SuiteReport;
use crate::scenarios::Scenario;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Fatal failures that abort the run before any scenario executes.
#[derive(Debug, Error)]
pub enum SetupFailure {
    /// Configuration could not be loaded.
    #[error("setup failed: {0}")]
    Config(#[from] ConfigError),
    /// Token exchange failed.
    #[error("setup failed: {0}")]
    Authentication(#[from] AuthError),
    /// Authenticated client could not be built.
    #[error("setup failed: {0}")]
    Client(#[from] ClientError),
}

impl SetupFailure {
    /// Returns a stable label for the failed setup step.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Authentication(_) => "authentication",
            Self::Client(_) => "client",
        }
    }
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Ordered scenario driver.
///
/// # Invariants
/// - The client and token are fixed after setup.
/// - Only the runner mutates the fixture, one scenario at a time.
#[derive(Debug)]
pub struct SuiteRunner {
    /// Authenticated client.
    client: IdeaClient,
    /// Cross-scenario context.
    fixture: FixtureState,
    /// Idea body source for scenario 1.
    generator: IdeaGenerator,
}

impl SuiteRunner {
    /// Authenticates and builds the runner.
    ///
    /// # Errors
    ///
    /// Returns [`SetupFailure`] when authentication or client construction fails.
    pub async fn setup(config: &ClientConfig) -> Result<Self, SetupFailure> {
        let token = authenticate(config).await?;
        let client = IdeaClient::new(config, token)?;
        Ok(Self::with_client(client))
    }

    /// Builds a runner around an already authenticated client.
    #[must_use]
    pub fn with_client(client: IdeaClient) -> Self {
        Self {
            client,
            fixture: FixtureState::default(),
            generator: IdeaGenerator::from_entropy(),
        }
    }

    /// Replaces the idea generator.
    #[must_use]
    pub fn with_generator(mut self, generator: IdeaGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Returns the authenticated client.
    #[must_use]
    pub const fn client(&self) -> &IdeaClient {
        &self.client
    }

    /// Returns the fixture state.
    #[must_use]
    pub const fn fixture(&self) -> &FixtureState {
        &self.fixture
    }

    /// Returns the recorded calls.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.client.transcript()
    }

    /// Runs every scenario in the fixed order.
    pub async fn run(&mut self) -> SuiteReport {
        let mut report = SuiteReport::default();
        for scenario in Scenario::ORDERED {
            report.push(self.run_scenario(scenario).await);
        }
        tracing::info!(
            scenarios = report.outcomes.len(),
            failed = report.failures().len(),
            "suite finished"
        );
        report
    }

    /// Runs one scenario against the current fixture.
    pub async fn run_scenario(&mut self, scenario: Scenario) -> ScenarioOutcome {
        tracing::info!(scenario = scenario.name(), number = scenario.number(), "scenario started");
        let started = Instant::now();
        let result = scenario.execute(&self.client, &mut self.fixture, &mut self.generator).await;
        let outcome = ScenarioOutcome::from_result(scenario, result, started.elapsed());
        match &outcome.failure {
            None => tracing::info!(scenario = scenario.name(), "scenario passed"),
            Some(err) => tracing::warn!(scenario = scenario.name(), error = %err, "scenario failed"),
        }
        outcome
    }
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Authenticates and runs the full ordered suite.
///
/// # Errors
///
/// Returns [`SetupFailure`] when setup fails; scenario failures are reported
/// in the returned [`SuiteReport`].
pub async fn run_suite(config: &ClientConfig) -> Result<SuiteReport, SetupFailure> {
    let mut runner = SuiteRunner::setup(config).await?;
    Ok(runner.run().await)
}
