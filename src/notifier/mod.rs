//! Build notification: keeps the workspace in step with a job's history.
//!
//! For each completed build the notifier resolves the people involved,
//! posts one item for the build, and opens or closes "fix the build" tasks
//! when the job crosses the success boundary. Services live in
//! [`services`]; [`BuildCompletionHandler`] is the seam a CI host adapter
//! calls once per finished build.

mod error;
mod handler;
pub mod services;

pub use error::{NotifierError, NotifierResult};
pub use handler::{BuildCompletionHandler, NotificationReport};

#[cfg(test)]
mod tests;
