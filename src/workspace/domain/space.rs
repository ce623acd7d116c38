//! Space, application and API status summaries.

use super::{AppId, SpaceId};

/// Space resolved from its URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceSummary {
    /// Space identifier.
    pub id: SpaceId,
    /// Space name.
    pub name: String,
    /// Name of the organization owning the space.
    pub organization_name: String,
}

/// Application and the space it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppSummary {
    /// Application identifier.
    pub id: AppId,
    /// Identifier of the containing space.
    pub space_id: SpaceId,
}

/// Remote API status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemStatus {
    /// Running API version.
    pub version: String,
}
