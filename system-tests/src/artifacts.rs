// system-tests/src/artifacts.rs
// ============================================================================
// Module: Run Artifacts
// Description: Run-root files for ordered Idea Center runs.
// Purpose: Persist the run summary and call transcript as canonical JSON.
// Dependencies: idea-center-client, serde, serde_jcs
// ============================================================================

//! ## Overview
//! Every run gets a root directory. [`RunReporter`] writes `summary.json`
//! (canonical JCS) and `summary.md` there; the summary carries the scenario
//! totals, the failed scenario names, each outcome, and the setup-failure
//! kind when the run never started. The driver adds `transcript.json`.
//! A reporter dropped without a summary still writes one, marked `panic`
//! or `unknown`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use idea_center_client::TranscriptEntry;
use serde::Serialize;

use crate::config::SystemTestConfig;
use crate::report::ScenarioOutcome;
use crate::report::SuiteReport;
use crate::runner::SetupFailure;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Summary file name.
pub const SUMMARY_JSON: &str = "summary.json";
/// Markdown summary file name.
pub const SUMMARY_MD: &str = "summary.md";
/// Transcript file name.
pub const TRANSCRIPT_JSON: &str = "transcript.json";

/// Parent of per-run roots when no override is configured.
const DEFAULT_RUNS_DIR: &str = "target/system-tests";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Final classification of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every scenario passed.
    Pass,
    /// At least one scenario failed.
    Fail,
    /// Configuration or authentication failed; no scenario ran.
    SetupFailed,
    /// The reporter was dropped while panicking.
    Panic,
    /// The reporter was dropped without a summary.
    Unknown,
}

impl RunStatus {
    /// Returns the serialized label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::SetupFailed => "setup_failed",
            Self::Panic => "panic",
            Self::Unknown => "unknown",
        }
    }
}

/// Contents of `summary.json`.
#[derive(Debug, Serialize)]
struct RunSummary {
    /// Suite or test name.
    suite: String,
    /// Final classification.
    status: RunStatus,
    /// Start time in unix milliseconds.
    started_at_ms: u64,
    /// End time in unix milliseconds.
    ended_at_ms: u64,
    /// Elapsed milliseconds.
    duration_ms: u64,
    /// Passed scenario count.
    passed: usize,
    /// Failed scenario count.
    failed: usize,
    /// Labels of failed scenarios, in run order.
    failed_scenarios: Vec<String>,
    /// Setup step that failed, when no scenario ran.
    setup_failure: Option<&'static str>,
    /// Per-scenario outcomes.
    scenarios: Vec<ScenarioOutcome>,
    /// Failure details and other remarks.
    notes: Vec<String>,
    /// Files present in the run root.
    artifacts: Vec<String>,
}

impl RunSummary {
    /// Builds an empty summary with the given status.
    fn new(suite: &str, status: RunStatus, started_at_ms: u64) -> Self {
        let ended_at_ms = now_millis();
        Self {
            suite: suite.to_string(),
            status,
            started_at_ms,
            ended_at_ms,
            duration_ms: ended_at_ms.saturating_sub(started_at_ms),
            passed: 0,
            failed: 0,
            failed_scenarios: Vec::new(),
            setup_failure: None,
            scenarios: Vec::new(),
            notes: Vec::new(),
            artifacts: Vec::new(),
        }
    }
}

/// Returns the current unix time in milliseconds.
fn now_millis() -> u64 {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

// ============================================================================
// SECTION: Artifacts
// ============================================================================

/// Run root directory.
#[derive(Debug, Clone)]
pub struct RunArtifacts {
    /// Artifact root directory.
    root: PathBuf,
}

impl RunArtifacts {
    /// Creates the root for `name` under `IDEA_CENTER_SYSTEM_TEST_RUN_ROOT`,
    /// or `target/system-tests/run_<unix_ms>/<name>` when unset.
    ///
    /// # Errors
    ///
    /// Returns an error when configuration is invalid or the directory cannot be created.
    pub fn for_run(name: &str) -> io::Result<Self> {
        let config = SystemTestConfig::load().map_err(io::Error::other)?;
        let root = config.run_root.unwrap_or_else(|| {
            PathBuf::from(DEFAULT_RUNS_DIR).join(format!("run_{}", now_millis())).join(name)
        });
        Self::at(root)
    }

    /// Creates the root at an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn at(root: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
        })
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `value` as canonical JSON.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the write fails.
    pub fn write_json<T: Serialize>(&self, name: &str, value: &T) -> io::Result<PathBuf> {
        let path = self.root.join(name);
        let bytes = serde_jcs::to_vec(value).map_err(|err| io::Error::other(err.to_string()))?;
        fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Writes the call transcript.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the write fails.
    pub fn write_transcript(&self, transcript: &[TranscriptEntry]) -> io::Result<PathBuf> {
        self.write_json(TRANSCRIPT_JSON, &transcript)
    }

    /// Returns the sorted file names in the root, plus the summary files.
    fn files(&self) -> io::Result<Vec<String>> {
        let mut names = vec![SUMMARY_JSON.to_string(), SUMMARY_MD.to_string()];
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        names.dedup();
        Ok(names)
    }
}

// ============================================================================
// SECTION: Reporter
// ============================================================================

/// Writes the run summary exactly once, including on early drop.
#[derive(Debug)]
pub struct RunReporter {
    /// Run root.
    artifacts: RunArtifacts,
    /// Suite or test name.
    suite: String,
    /// Start time in unix milliseconds.
    started_at_ms: u64,
    /// Set once a summary was written.
    finalized: bool,
}

impl RunReporter {
    /// Creates a reporter with a fresh run root for `suite`.
    ///
    /// # Errors
    ///
    /// Returns an error when the run root cannot be created.
    pub fn new(suite: &str) -> io::Result<Self> {
        Ok(Self::with_artifacts(suite, RunArtifacts::for_run(suite)?))
    }

    /// Creates a reporter writing into an existing run root.
    #[must_use]
    pub fn with_artifacts(suite: &str, artifacts: RunArtifacts) -> Self {
        Self {
            artifacts,
            suite: suite.to_string(),
            started_at_ms: now_millis(),
            finalized: false,
        }
    }

    /// Returns the run root.
    #[must_use]
    pub const fn artifacts(&self) -> &RunArtifacts {
        &self.artifacts
    }

    /// Summarizes a completed suite run.
    ///
    /// # Errors
    ///
    /// Returns an error when a summary file cannot be written.
    pub fn finish_report(&mut self, report: &SuiteReport) -> io::Result<()> {
        let status = if report.all_passed() { RunStatus::Pass } else { RunStatus::Fail };
        let mut summary = RunSummary::new(&self.suite, status, self.started_at_ms);
        let failures = report.failures();
        summary.failed = failures.len();
        summary.passed = report.outcomes.len().saturating_sub(failures.len());
        summary.failed_scenarios =
            failures.iter().map(|outcome| outcome.scenario.to_string()).collect();
        summary.notes = failures.iter().map(|outcome| outcome.line()).collect();
        summary.scenarios.clone_from(&report.outcomes);
        self.write_summary(summary)
    }

    /// Summarizes a run that stopped during setup.
    ///
    /// # Errors
    ///
    /// Returns an error when a summary file cannot be written.
    pub fn finish_setup_failure(&mut self, failure: &SetupFailure) -> io::Result<()> {
        let mut summary = RunSummary::new(&self.suite, RunStatus::SetupFailed, self.started_at_ms);
        summary.setup_failure = Some(failure.kind());
        summary.notes = vec![failure.to_string()];
        self.write_summary(summary)
    }

    /// Writes a summary with an explicit status and notes.
    ///
    /// # Errors
    ///
    /// Returns an error when a summary file cannot be written.
    pub fn finish(&mut self, status: RunStatus, notes: Vec<String>) -> io::Result<()> {
        let mut summary = RunSummary::new(&self.suite, status, self.started_at_ms);
        summary.notes = notes;
        self.write_summary(summary)
    }

    /// Writes both summary files and marks the reporter finalized.
    fn write_summary(&mut self, mut summary: RunSummary) -> io::Result<()> {
        summary.artifacts = self.artifacts.files()?;
        self.artifacts.write_json(SUMMARY_JSON, &summary)?;
        fs::write(self.artifacts.root.join(SUMMARY_MD), render_markdown(&summary))?;
        self.finalized = true;
        Ok(())
    }
}

impl Drop for RunReporter {
    fn drop(&mut self) {
        if self.finalized {
            return;
        }
        let status =
            if std::thread::panicking() { RunStatus::Panic } else { RunStatus::Unknown };
        let _ = self.finish(status, vec!["run ended without a summary".to_string()]);
    }
}

/// Renders `summary.md`.
fn render_markdown(summary: &RunSummary) -> String {
    let mut out = format!("# Idea Center Run: {}\n\n", summary.suite);
    let _ = writeln!(out, "Status: **{}**", summary.status.as_str());
    let _ = writeln!(out, "Scenarios: {} passed, {} failed", summary.passed, summary.failed);
    let _ = writeln!(out, "Duration: {} ms", summary.duration_ms);
    if let Some(kind) = summary.setup_failure {
        let _ = write!(out, "\nSetup failed at: {kind}\n");
    }
    if !summary.scenarios.is_empty() {
        out.push_str("\n| # | Scenario | Result |\n|---|---|---|\n");
        for outcome in &summary.scenarios {
            let _ = writeln!(
                out,
                "| {} | {} | {} |",
                outcome.number,
                outcome.scenario.name(),
                outcome.status.as_str()
            );
        }
    }
    if !summary.notes.is_empty() {
        out.push_str("\nNotes:\n");
        for note in &summary.notes {
            let _ = writeln!(out, "- {note}");
        }
    }
    out
}
