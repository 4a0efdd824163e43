// system-tests/src/scenarios.rs
// ============================================================================
// Module: Scenarios
// Description: The seven Idea Center CRUD scenarios and their assertions.
// Purpose: Pair each HTTP call with its expected status and body signal.
// Dependencies: idea-center-client, serde, thiserror
// ============================================================================

//! ## Overview
//! Each scenario checks its fixture precondition, issues one call, asserts on
//! the response, and writes its postcondition into [`FixtureState`].
//! Scenarios never panic; every mismatch is an [`AssertionFailure`].
//!
//! | # | Scenario | Expected |
//! |---|---|---|
//! | 1 | create with required fields | 200, `Successfully created!` |
//! | 2 | list all | 200, non-empty, last id captured |
//! | 3 | edit last created | 200, `Edited successfully` |
//! | 4 | delete last created | 200, contains `The idea is deleted!` |
//! | 5 | create without required fields | 400 |
//! | 6 | edit non-existing | 400, contains `There is no such idea!` |
//! | 7 | delete non-existing | 400, contains `There is no such idea!` |

// ============================================================================
// SECTION: Imports
// ============================================================================

use idea_center_client::ApiResponse;
use idea_center_client::ClientError;
use idea_center_client::IdeaClient;
use idea_center_client::IdeaDto;
use serde::Serialize;
use thiserror::Error;

use crate::fixture::FixtureState;
use crate::fixture::IDEA_IMAGE_URL;
use crate::fixture::IdeaGenerator;

// ============================================================================
// SECTION: Expected Messages
// ============================================================================

/// Create success message.
pub const CREATED_MSG: &str = "Successfully created!";
/// Edit success message.
pub const EDITED_MSG: &str = "Edited successfully";
/// Delete confirmation text.
pub const DELETED_MSG: &str = "The idea is deleted!";
/// Not-found text for edit and delete.
pub const NO_SUCH_IDEA_MSG: &str = "There is no such idea!";

/// HTTP 200.
const STATUS_OK: u16 = 200;
/// HTTP 400.
const STATUS_BAD_REQUEST: u16 = 400;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Scenario identifiers in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Create an idea with title, description, and url.
    CreateWithRequiredFields,
    /// List ideas and capture the last id.
    ListAll,
    /// Edit the captured idea.
    EditLastCreated,
    /// Delete the captured idea.
    DeleteLastCreated,
    /// Create an idea with an empty title.
    CreateWithoutRequiredFields,
    /// Edit an id that addresses no idea.
    EditNonExisting,
    /// Delete an id that addresses no idea.
    DeleteNonExisting,
}

impl Scenario {
    /// All scenarios in their fixed execution order.
    pub const ORDERED: [Self; 7] = [
        Self::CreateWithRequiredFields,
        Self::ListAll,
        Self::EditLastCreated,
        Self::DeleteLastCreated,
        Self::CreateWithoutRequiredFields,
        Self::EditNonExisting,
        Self::DeleteNonExisting,
    ];

    /// Returns the 1-based position in the run.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::CreateWithRequiredFields => 1,
            Self::ListAll => 2,
            Self::EditLastCreated => 3,
            Self::DeleteLastCreated => 4,
            Self::CreateWithoutRequiredFields => 5,
            Self::EditNonExisting => 6,
            Self::DeleteNonExisting => 7,
        }
    }

    /// Returns a stable label for reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreateWithRequiredFields => "create_idea_with_required_fields",
            Self::ListAll => "get_all_ideas",
            Self::EditLastCreated => "edit_last_created_idea",
            Self::DeleteLastCreated => "delete_last_created_idea",
            Self::CreateWithoutRequiredFields => "create_idea_without_required_fields",
            Self::EditNonExisting => "edit_non_existing_idea",
            Self::DeleteNonExisting => "delete_non_existing_idea",
        }
    }

    /// Runs the scenario against the client and fixture.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionFailure`] when a precondition, the call, or an
    /// assertion fails.
    pub async fn execute(
        self,
        client: &IdeaClient,
        fixture: &mut FixtureState,
        generator: &mut IdeaGenerator,
    ) -> Result<(), AssertionFailure> {
        match self {
            Self::CreateWithRequiredFields => {
                create_with_required_fields(client, fixture, generator).await
            }
            Self::ListAll => list_all(client, fixture).await,
            Self::EditLastCreated => edit_last_created(client, fixture).await,
            Self::DeleteLastCreated => delete_last_created(client, fixture).await,
            Self::CreateWithoutRequiredFields => {
                create_without_required_fields(client, fixture).await
            }
            Self::EditNonExisting => edit_non_existing(client, fixture).await,
            Self::DeleteNonExisting => delete_non_existing(client, fixture).await,
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.number(), self.name())
    }
}

/// Fixture slot a scenario depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureSlot {
    /// Captured idea id.
    IdeaId,
    /// Generated title.
    Title,
}

impl std::fmt::Display for FixtureSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::IdeaId => "idea id",
            Self::Title => "idea title",
        })
    }
}

/// Scenario-scoped failures.
///
/// # Invariants
/// - A failure aborts only the scenario that raised it.
/// - String payloads may include untrusted server text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionFailure {
    /// Status code mismatch.
    #[error("expected status {expected}, got {actual}: {body}")]
    Status {
        /// Expected status.
        expected: u16,
        /// Actual status.
        actual: u16,
        /// Response body.
        body: String,
    },
    /// Envelope `msg` mismatch.
    #[error("expected message {expected:?}, got {actual:?}")]
    Message {
        /// Expected message.
        expected: &'static str,
        /// Actual message.
        actual: String,
    },
    /// Body lacks the expected text.
    #[error("expected body to contain {expected:?}, got {body:?}")]
    MissingText {
        /// Expected substring.
        expected: &'static str,
        /// Response body.
        body: String,
    },
    /// List response was empty.
    #[error("expected at least one idea in the response")]
    EmptyList,
    /// Last listed idea carried no id.
    #[error("last listed idea has no id")]
    MissingId,
    /// A required fixture slot was never written.
    #[error("precondition not met: no {0} recorded by an earlier scenario")]
    Precondition(FixtureSlot),
    /// Body did not decode as the expected JSON shape.
    #[error("response decode failed: {0}")]
    Decode(String),
    /// Request could not complete.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl From<ClientError> for AssertionFailure {
    fn from(err: ClientError) -> Self {
        Self::Transport(err.to_string())
    }
}

// ============================================================================
// SECTION: Scenarios
// ============================================================================

/// Scenario 1: create with generated title and description.
async fn create_with_required_fields(
    client: &IdeaClient,
    fixture: &mut FixtureState,
    generator: &mut IdeaGenerator,
) -> Result<(), AssertionFailure> {
    let idea = generator.next_idea();
    fixture.record_created(idea.title.clone(), idea.description.clone());
    let response = client.create_idea(&idea).await?;
    expect_status(&response, STATUS_OK)?;
    expect_message(&response, CREATED_MSG)
}

/// Scenario 2: list and capture the last id.
async fn list_all(client: &IdeaClient, fixture: &mut FixtureState) -> Result<(), AssertionFailure> {
    let response = client.list_ideas().await?;
    expect_status(&response, STATUS_OK)?;
    let ideas = response.envelopes().map_err(|err| AssertionFailure::Decode(err.to_string()))?;
    let last = ideas.last().ok_or(AssertionFailure::EmptyList)?;
    let id = last.id.as_deref().filter(|id| !id.is_empty()).ok_or(AssertionFailure::MissingId)?;
    fixture.record_id(id);
    Ok(())
}

/// Scenario 3: edit the captured idea.
async fn edit_last_created(
    client: &IdeaClient,
    fixture: &FixtureState,
) -> Result<(), AssertionFailure> {
    let id = require_id(fixture)?;
    if fixture.title().is_none() {
        return Err(AssertionFailure::Precondition(FixtureSlot::Title));
    }
    let response = client.edit_idea(id, &fixture.updated_idea()).await?;
    expect_status(&response, STATUS_OK)?;
    expect_message(&response, EDITED_MSG)
}

/// Scenario 4: delete the captured idea.
async fn delete_last_created(
    client: &IdeaClient,
    fixture: &FixtureState,
) -> Result<(), AssertionFailure> {
    let id = require_id(fixture)?;
    let response = client.delete_idea(id).await?;
    expect_status(&response, STATUS_OK)?;
    expect_contains(&response, DELETED_MSG)
}

/// Scenario 5: create with an empty title.
async fn create_without_required_fields(
    client: &IdeaClient,
    fixture: &FixtureState,
) -> Result<(), AssertionFailure> {
    let idea = IdeaDto::new(
        String::new(),
        fixture.description().unwrap_or_default(),
        Some(IDEA_IMAGE_URL.to_string()),
    );
    let response = client.create_idea(&idea).await?;
    expect_status(&response, STATUS_BAD_REQUEST)
}

/// Scenario 6: edit a non-existing id.
async fn edit_non_existing(
    client: &IdeaClient,
    fixture: &FixtureState,
) -> Result<(), AssertionFailure> {
    let id = fixture.missing_id().ok_or(AssertionFailure::Precondition(FixtureSlot::IdeaId))?;
    let response = client.edit_idea(&id, &fixture.updated_idea()).await?;
    expect_status(&response, STATUS_BAD_REQUEST)?;
    expect_contains(&response, NO_SUCH_IDEA_MSG)
}

/// Scenario 7: delete a non-existing id.
async fn delete_non_existing(
    client: &IdeaClient,
    fixture: &FixtureState,
) -> Result<(), AssertionFailure> {
    let id = fixture.missing_id().ok_or(AssertionFailure::Precondition(FixtureSlot::IdeaId))?;
    let response = client.delete_idea(&id).await?;
    expect_status(&response, STATUS_BAD_REQUEST)?;
    expect_contains(&response, NO_SUCH_IDEA_MSG)
}

// ============================================================================
// SECTION: Assertions
// ============================================================================

/// Returns the captured id or a precondition failure.
fn require_id(fixture: &FixtureState) -> Result<&str, AssertionFailure> {
    fixture.id().ok_or(AssertionFailure::Precondition(FixtureSlot::IdeaId))
}

/// Asserts the response status.
///
/// # Errors
///
/// Returns [`AssertionFailure::Status`] on mismatch.
pub fn expect_status(response: &ApiResponse, expected: u16) -> Result<(), AssertionFailure> {
    if response.has_status(expected) {
        return Ok(());
    }
    Err(AssertionFailure::Status {
        expected,
        actual: response.status,
        body: response.body.clone(),
    })
}

/// Asserts the envelope `msg` equals `expected`.
///
/// # Errors
///
/// Returns [`AssertionFailure::Decode`] when the body is not an envelope and
/// [`AssertionFailure::Message`] on mismatch.
pub fn expect_message(
    response: &ApiResponse,
    expected: &'static str,
) -> Result<(), AssertionFailure> {
    let envelope = response.envelope().map_err(|err| AssertionFailure::Decode(err.to_string()))?;
    if envelope.msg == expected {
        return Ok(());
    }
    Err(AssertionFailure::Message {
        expected,
        actual: envelope.msg,
    })
}

/// Asserts the body contains `expected`.
///
/// # Errors
///
/// Returns [`AssertionFailure::MissingText`] when the text is absent.
pub fn expect_contains(
    response: &ApiResponse,
    expected: &'static str,
) -> Result<(), AssertionFailure> {
    if response.body_contains(expected) {
        return Ok(());
    }
    Err(AssertionFailure::MissingText {
        expected,
        body: response.body.clone(),
    })
}
