//! Build result reported by the CI host.

use super::BuildDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Final result of a completed build.
///
/// Only the boundary between [`BuildResult::Success`] and everything else
/// matters for failure tracking; the specific non-success kind is kept for
/// display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildResult {
    /// Build and tests passed.
    Success,
    /// Build passed but tests failed.
    Unstable,
    /// Build failed.
    Failure,
    /// Build was interrupted.
    Aborted,
    /// Build never ran, typically because an upstream build failed.
    NotBuilt,
}

impl BuildResult {
    /// Returns the canonical host representation, such as `NOT_BUILT`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Unstable => "UNSTABLE",
            Self::Failure => "FAILURE",
            Self::Aborted => "ABORTED",
            Self::NotBuilt => "NOT_BUILT",
        }
    }

    /// Returns `true` only for [`BuildResult::Success`].
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns human-readable text: capitalized, with underscores replaced
    /// by spaces (`NOT_BUILT` becomes `Not built`).
    #[must_use]
    pub fn display_text(self) -> String {
        let lowered = self.as_str().to_ascii_lowercase().replace('_', " ");
        let mut chars = lowered.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_ascii_uppercase().to_string() + chars.as_str()
        })
    }
}

impl TryFrom<&str> for BuildResult {
    type Error = BuildDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase().replace(' ', "_");
        match normalized.as_str() {
            "SUCCESS" => Ok(Self::Success),
            "UNSTABLE" => Ok(Self::Unstable),
            "FAILURE" => Ok(Self::Failure),
            "ABORTED" => Ok(Self::Aborted),
            "NOT_BUILT" => Ok(Self::NotBuilt),
            _ => Err(BuildDomainError::UnknownBuildResult(value.to_owned())),
        }
    }
}

impl fmt::Display for BuildResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
