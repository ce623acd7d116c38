//! In-memory workspace for tests and dry runs.

mod workspace;

pub use workspace::{InMemoryWorkspace, StoredItem};
