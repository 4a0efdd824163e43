// system-tests/src/fixture.rs
// ============================================================================
// Module: Fixture State
// Description: Cross-scenario context and generated idea values.
// Purpose: Carry the created idea's id, title, and description between steps.
// Dependencies: idea-center-client, rand
// ============================================================================

//! ## Overview
//! [`FixtureState`] is owned by the runner and lent to one scenario at a time,
//! so a writer always finishes before a dependent reader starts. Slots stay
//! populated after the idea is deleted; the not-found scenarios rely on that.

// ============================================================================
// SECTION: Imports
// ============================================================================

use idea_center_client::IdeaDto;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Image URL attached to every created or edited idea.
pub const IDEA_IMAGE_URL: &str =
    "https://cdn.pixabay.com/photo/2016/03/30/02/21/idea-1289871_640.jpg";

/// Suffix appended to title and description on edit.
pub const UPDATED_SUFFIX: &str = " Updated";

/// Suffix appended to a deleted id to address a non-existing idea.
pub const MISSING_ID_SUFFIX: &str = "00";

// ============================================================================
// SECTION: Fixture State
// ============================================================================

/// Mutable context shared by the ordered scenarios.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureState {
    /// Id of the last idea in the list response.
    last_created_id: Option<String>,
    /// Title generated for the last create.
    last_created_title: Option<String>,
    /// Description generated for the last create.
    last_created_description: Option<String>,
}

impl FixtureState {
    /// Stores the generated title and description.
    pub fn record_created(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.last_created_title = Some(title.into());
        self.last_created_description = Some(description.into());
    }

    /// Stores the id captured from the list response.
    pub fn record_id(&mut self, id: impl Into<String>) {
        self.last_created_id = Some(id.into());
    }

    /// Returns the captured id.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.last_created_id.as_deref()
    }

    /// Returns the generated title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.last_created_title.as_deref()
    }

    /// Returns the generated description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.last_created_description.as_deref()
    }

    /// Returns an id that addresses no idea: the captured id plus `"00"`.
    #[must_use]
    pub fn missing_id(&self) -> Option<String> {
        self.id().map(|id| format!("{id}{MISSING_ID_SUFFIX}"))
    }

    /// Builds the edit body from the stored title and description.
    ///
    /// Absent slots contribute an empty prefix.
    #[must_use]
    pub fn updated_idea(&self) -> IdeaDto {
        IdeaDto::new(
            format!("{}{UPDATED_SUFFIX}", self.title().unwrap_or_default()),
            format!("{}{UPDATED_SUFFIX}", self.description().unwrap_or_default()),
            Some(IDEA_IMAGE_URL.to_string()),
        )
    }
}

// ============================================================================
// SECTION: Generator
// ============================================================================

/// Source of fresh idea bodies for the create scenario.
#[derive(Debug, Clone)]
pub struct IdeaGenerator {
    /// Random source for the numeric suffix.
    rng: StdRng,
}

impl IdeaGenerator {
    /// Creates a generator seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a deterministic generator.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns `Title<n>` / `Description<n>` with `n` in `1000..=9999`.
    pub fn next_idea(&mut self) -> IdeaDto {
        let suffix: u16 = self.rng.gen_range(1000..=9999);
        IdeaDto::new(
            format!("Title{suffix}"),
            format!("Description{suffix}"),
            Some(IDEA_IMAGE_URL.to_string()),
        )
    }
}

impl Default for IdeaGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}
