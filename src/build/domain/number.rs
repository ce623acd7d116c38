//! Build number scalar.

use super::BuildDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positive, per-job build number assigned by the CI host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BuildNumber(u32);

impl BuildNumber {
    /// Creates a validated build number.
    ///
    /// # Errors
    ///
    /// Returns [`BuildDomainError::InvalidBuildNumber`] when the value is zero.
    pub const fn new(value: u32) -> Result<Self, BuildDomainError> {
        if value == 0 {
            return Err(BuildDomainError::InvalidBuildNumber(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for BuildNumber {
    type Error = BuildDomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BuildNumber> for u32 {
    fn from(number: BuildNumber) -> Self {
        number.0
    }
}

impl fmt::Display for BuildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
