//! Item lookup keys and results.

use super::ItemId;
use crate::build::domain::BuildNumber;
use std::fmt;

/// External key of a build's item: the build number as decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalKey(String);

impl ExternalKey {
    /// Returns the key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<BuildNumber> for ExternalKey {
    fn from(number: BuildNumber) -> Self {
        Self(number.to_string())
    }
}

impl AsRef<str> for ExternalKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ExternalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of filtering an application's items by external key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemLookup {
    /// Number of items the remote reports as matching the filter.
    pub filtered: u64,
    /// Identifiers of the returned items, in remote order.
    pub item_ids: Vec<ItemId>,
}

impl ItemLookup {
    /// Returns the matching item only when exactly one item matched.
    ///
    /// Any other filtered count is treated as absence.
    #[must_use]
    pub fn unique_item(&self) -> Option<ItemId> {
        if self.filtered != 1 {
            return None;
        }
        self.item_ids.first().copied()
    }
}
