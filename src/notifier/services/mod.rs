//! Notification services, from identity resolution to task lifecycle.

mod fields;
mod identity;
mod items;
mod notifier;
mod tasks;
mod validation;

pub use fields::{
    FIELD_BUILD_NUMBER, FIELD_CHANGES, FIELD_DEVELOPERS, FIELD_DURATION, FIELD_FAILED_TESTS,
    FIELD_RESULT, FIELD_TOTAL_TESTS, FIELD_URL, FieldMapper,
};
pub use identity::IdentityResolver;
pub use items::ItemSynchronizer;
pub use notifier::{BuildNotifier, NotificationOutcome, ResolvedTarget};
pub use tasks::{TaskLifecycleManager, TaskLifecycleOutcome, Transition, TransitionContext};
pub use validation::{ConnectionValidator, FormValidation};
