// system-tests/src/report.rs
// ============================================================================
// Module: Suite Report
// Description: Per-scenario outcomes for one ordered run.
// Purpose: Record pass/fail results in run order for output and artifacts.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`SuiteReport`] holds one [`ScenarioOutcome`] per executed scenario, in
//! execution order. Failures keep their typed [`AssertionFailure`] for tests
//! and serialize as their display text for artifacts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use serde::Serialize;
use serde::Serializer;

use crate::scenarios::AssertionFailure;
use crate::scenarios::Scenario;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Scenario result classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    /// All assertions held.
    Passed,
    /// A precondition, call, or assertion failed.
    Failed,
}

impl ScenarioStatus {
    /// Returns a stable label for output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "pass",
            Self::Failed => "fail",
        }
    }
}

/// Result of one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioOutcome {
    /// 1-based run position.
    pub number: u8,
    /// Scenario identifier.
    pub scenario: Scenario,
    /// Pass/fail classification.
    pub status: ScenarioStatus,
    /// Failure detail when failed.
    #[serde(serialize_with = "serialize_failure")]
    pub failure: Option<AssertionFailure>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl ScenarioOutcome {
    /// Builds an outcome from a scenario result.
    #[must_use]
    pub fn from_result(
        scenario: Scenario,
        result: Result<(), AssertionFailure>,
        elapsed: Duration,
    ) -> Self {
        let (status, failure) = match result {
            Ok(()) => (ScenarioStatus::Passed, None),
            Err(err) => (ScenarioStatus::Failed, Some(err)),
        };
        Self {
            number: scenario.number(),
            scenario,
            status,
            failure,
            duration_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Returns true when the scenario passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == ScenarioStatus::Passed
    }

    /// Renders a single summary line.
    #[must_use]
    pub fn line(&self) -> String {
        match &self.failure {
            None => format!("[{}] {}", self.status.as_str(), self.scenario),
            Some(err) => format!("[{}] {}: {err}", self.status.as_str(), self.scenario),
        }
    }
}

/// Outcomes of one ordered run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    /// Outcomes in execution order.
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    /// Appends an outcome.
    pub fn push(&mut self, outcome: ScenarioOutcome) {
        self.outcomes.push(outcome);
    }

    /// Returns true when every recorded scenario passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(ScenarioOutcome::passed)
    }

    /// Returns the failed outcomes.
    #[must_use]
    pub fn failures(&self) -> Vec<&ScenarioOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.passed()).collect()
    }

    /// Returns the outcome for `scenario`, if it ran.
    #[must_use]
    pub fn outcome(&self, scenario: Scenario) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|outcome| outcome.scenario == scenario)
    }

    /// Renders the per-scenario lines followed by a totals line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for outcome in &self.outcomes {
            out.push_str(&outcome.line());
            out.push('\n');
        }
        let failed = self.failures().len();
        let passed = self.outcomes.len().saturating_sub(failed);
        out.push_str(&format!("{passed} passed, {failed} failed\n"));
        out
    }
}

/// Serializes a failure as its display text.
fn serialize_failure<S: Serializer>(
    failure: &Option<AssertionFailure>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match failure {
        Some(err) => serializer.serialize_some(&err.to_string()),
        None => serializer.serialize_none(),
    }
}
