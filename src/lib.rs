//! Podio notifier: CI build outcomes mirrored into a Podio workspace.
//!
//! Every completed build of a job is posted as one workspace item keyed by
//! its build number. When the job stops succeeding, a "fix the build" task
//! is assigned to each culprit and commit author; when it succeeds again,
//! the tasks opened for the first failing build of the streak are
//! completed.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (REST API, memory)
//!
//! # Modules
//!
//! - [`build`]: Build history model and failure-streak traversal
//! - [`config`]: Settings validation and task text templates
//! - [`notifier`]: Notification services and the host-facing handler
//! - [`workspace`]: Remote workspace model, client port and adapters

pub mod build;
pub mod config;
pub mod notifier;
pub mod workspace;
