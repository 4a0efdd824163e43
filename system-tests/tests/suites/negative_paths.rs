// system-tests/tests/suites/negative_paths.rs
// ============================================================================
// Module: Negative Path Tests
// Description: Validation, not-found, and precondition behavior.
// Purpose: Validate 400 scenarios and cascading precondition failures.
// Dependencies: system-tests, helpers
// ============================================================================

//! Negative-path tests for the ordered suite.

use helpers::idea_stub::IdeaStubOptions;
use helpers::idea_stub::spawn_idea_stub;
use helpers::idea_stub::spawn_idea_stub_with;
use system_tests::AssertionFailure;
use system_tests::Scenario;
use system_tests::SuiteRunner;
use system_tests::artifacts::RunReporter;
use system_tests::artifacts::RunStatus;
use system_tests::scenarios::FixtureSlot;

use crate::helpers;

#[tokio::test(flavor = "multi_thread")]
async fn empty_title_is_rejected_without_prior_state() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = RunReporter::new("empty_title_is_rejected_without_prior_state")?;
    let stub = spawn_idea_stub()?;
    let mut runner = SuiteRunner::setup(&stub.client_config()?).await?;

    let outcome = runner.run_scenario(Scenario::CreateWithoutRequiredFields).await;
    if !outcome.passed() {
        return Err(format!("scenario 5 should pass standalone: {}", outcome.line()).into());
    }
    if !stub.ideas().is_empty() {
        return Err("rejected create must not store an idea".into());
    }

    reporter.finish(RunStatus::Pass, vec!["empty title rejected with 400".to_string()])?;
    drop(reporter);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn not_found_scenarios_need_a_captured_id() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = RunReporter::new("not_found_scenarios_need_a_captured_id")?;
    let stub = spawn_idea_stub()?;
    let mut runner = SuiteRunner::setup(&stub.client_config()?).await?;

    for scenario in [Scenario::EditNonExisting, Scenario::DeleteNonExisting] {
        let outcome = runner.run_scenario(scenario).await;
        if outcome.failure != Some(AssertionFailure::Precondition(FixtureSlot::IdeaId)) {
            return Err(format!("expected precondition failure: {}", outcome.line()).into());
        }
    }
    if !runner.transcript().is_empty() {
        return Err("precondition failures must not issue calls".into());
    }

    reporter.finish(
        RunStatus::Pass,
        vec!["missing id reported as precondition failure".to_string()],
    )?;
    drop(reporter);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_list_cascades_to_dependent_scenarios() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = RunReporter::new("empty_list_cascades_to_dependent_scenarios")?;
    let stub = spawn_idea_stub_with(IdeaStubOptions {
        hide_ideas_from_list: true,
        ..IdeaStubOptions::default()
    })?;
    let mut runner = SuiteRunner::setup(&stub.client_config()?).await?;

    let report = runner.run().await;
    reporter.artifacts().write_json("report.json", &report)?;
    if report.outcomes.len() != Scenario::ORDERED.len() {
        return Err("every scenario should still run after a failure".into());
    }
    let expectations = [
        (Scenario::CreateWithRequiredFields, None),
        (Scenario::ListAll, Some(AssertionFailure::EmptyList)),
        (Scenario::EditLastCreated, Some(AssertionFailure::Precondition(FixtureSlot::IdeaId))),
        (Scenario::DeleteLastCreated, Some(AssertionFailure::Precondition(FixtureSlot::IdeaId))),
        (Scenario::CreateWithoutRequiredFields, None),
        (Scenario::EditNonExisting, Some(AssertionFailure::Precondition(FixtureSlot::IdeaId))),
        (Scenario::DeleteNonExisting, Some(AssertionFailure::Precondition(FixtureSlot::IdeaId))),
    ];
    for (scenario, expected) in expectations {
        let outcome = report.outcome(scenario).ok_or("scenario did not run")?;
        if outcome.failure != expected {
            return Err(format!("unexpected outcome: {}", outcome.line()).into());
        }
    }
    if !report.render().ends_with("2 passed, 5 failed\n") {
        return Err(format!("unexpected totals:\n{}", report.render()).into());
    }

    reporter.finish(
        RunStatus::Pass,
        vec!["empty list cascaded as precondition failures".to_string()],
    )?;
    drop(reporter);
    Ok(())
}
