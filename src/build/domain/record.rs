//! Completed build snapshot and its participants.

use super::{BuildDomainError, BuildNumber, BuildResult};
use serde::{Deserialize, Serialize};

/// A user the CI host associates with a build, either as a culprit or as a
/// commit author.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildParticipant {
    display_name: String,
    #[serde(default)]
    email: Option<String>,
}

impl BuildParticipant {
    /// Creates a participant without a known e-mail address.
    #[must_use]
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            email: None,
        }
    }

    /// Sets the participant's e-mail address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns the participant's display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the trimmed e-mail address, or `None` when it is missing or
    /// blank.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}

/// One change-set entry included in a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry {
    author: BuildParticipant,
    message: String,
}

impl ChangeEntry {
    /// Creates a change entry.
    #[must_use]
    pub fn new(author: BuildParticipant, message: impl Into<String>) -> Self {
        Self {
            author,
            message: message.into(),
        }
    }

    /// Returns the commit author.
    #[must_use]
    pub const fn author(&self) -> &BuildParticipant {
        &self.author
    }

    /// Returns the annotated commit message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Test result counts, present only when a test step reported results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTestTotals")]
pub struct TestTotals {
    total: u32,
    failed: u32,
}

#[derive(Deserialize)]
struct RawTestTotals {
    total: u32,
    failed: u32,
}

impl TryFrom<RawTestTotals> for TestTotals {
    type Error = BuildDomainError;

    fn try_from(raw: RawTestTotals) -> Result<Self, Self::Error> {
        Self::new(raw.total, raw.failed)
    }
}

impl TestTotals {
    /// Creates validated test totals.
    ///
    /// # Errors
    ///
    /// Returns [`BuildDomainError::InvalidTestTotals`] when `failed` exceeds
    /// `total`.
    pub const fn new(total: u32, failed: u32) -> Result<Self, BuildDomainError> {
        if failed > total {
            return Err(BuildDomainError::InvalidTestTotals { total, failed });
        }
        Ok(Self { total, failed })
    }

    /// Returns the total number of test cases.
    #[must_use]
    pub const fn total(self) -> u32 {
        self.total
    }

    /// Returns the number of failed test cases.
    #[must_use]
    pub const fn failed(self) -> u32 {
        self.failed
    }
}

/// Read-only snapshot of a completed build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
    number: BuildNumber,
    result: BuildResult,
    #[serde(default)]
    url: String,
    #[serde(default)]
    duration_text: String,
    #[serde(default)]
    change_entries: Vec<ChangeEntry>,
    #[serde(default)]
    culprits: Vec<BuildParticipant>,
    #[serde(default)]
    test_totals: Option<TestTotals>,
    #[serde(default)]
    previous: Option<BuildNumber>,
}

impl BuildRecord {
    /// Creates a build record with the required number and result.
    #[must_use]
    pub const fn new(number: BuildNumber, result: BuildResult) -> Self {
        Self {
            number,
            result,
            url: String::new(),
            duration_text: String::new(),
            change_entries: Vec::new(),
            culprits: Vec::new(),
            test_totals: None,
            previous: None,
        }
    }

    /// Sets the build URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the human-readable duration, such as `3 min 12 sec`.
    #[must_use]
    pub fn with_duration_text(mut self, duration_text: impl Into<String>) -> Self {
        self.duration_text = duration_text.into();
        self
    }

    /// Sets the change-set entries, in host order.
    #[must_use]
    pub fn with_changes(mut self, entries: impl IntoIterator<Item = ChangeEntry>) -> Self {
        self.change_entries = entries.into_iter().collect();
        self
    }

    /// Sets the culprits the host blames for this build.
    #[must_use]
    pub fn with_culprits(mut self, culprits: impl IntoIterator<Item = BuildParticipant>) -> Self {
        self.culprits = culprits.into_iter().collect();
        self
    }

    /// Sets the test result counts.
    #[must_use]
    pub const fn with_test_totals(mut self, totals: TestTotals) -> Self {
        self.test_totals = Some(totals);
        self
    }

    /// Sets the number of the immediately preceding build.
    #[must_use]
    pub const fn with_previous(mut self, previous: BuildNumber) -> Self {
        self.previous = Some(previous);
        self
    }

    /// Returns the build number.
    #[must_use]
    pub const fn number(&self) -> BuildNumber {
        self.number
    }

    /// Returns the build result.
    #[must_use]
    pub const fn result(&self) -> BuildResult {
        self.result
    }

    /// Returns the build URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the human-readable duration.
    #[must_use]
    pub fn duration_text(&self) -> &str {
        &self.duration_text
    }

    /// Returns the change-set entries in host order.
    #[must_use]
    pub fn change_entries(&self) -> &[ChangeEntry] {
        &self.change_entries
    }

    /// Returns the culprits.
    #[must_use]
    pub fn culprits(&self) -> &[BuildParticipant] {
        &self.culprits
    }

    /// Returns the test result counts, if a test step reported any.
    #[must_use]
    pub const fn test_totals(&self) -> Option<TestTotals> {
        self.test_totals
    }

    /// Returns the number of the preceding build, if any.
    #[must_use]
    pub const fn previous(&self) -> Option<BuildNumber> {
        self.previous
    }

    /// Returns every participant: culprits first, then change authors, in
    /// host order and without de-duplication.
    pub fn participants(&self) -> impl Iterator<Item = &BuildParticipant> {
        self.culprits
            .iter()
            .chain(self.change_entries.iter().map(ChangeEntry::author))
    }
}
