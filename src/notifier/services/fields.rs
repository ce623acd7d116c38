//! Mapping of builds to item fields.

use crate::build::domain::BuildRecord;
use crate::workspace::domain::{ItemField, RemoteIdentity};

/// External id of the build label field.
pub const FIELD_BUILD_NUMBER: &str = "build-number";
/// External id of the result field.
pub const FIELD_RESULT: &str = "result";
/// External id of the build URL field.
pub const FIELD_URL: &str = "url";
/// External id of the duration field.
pub const FIELD_DURATION: &str = "duration";
/// External id of the developers contact field.
pub const FIELD_DEVELOPERS: &str = "developers";
/// External id of the change messages field.
pub const FIELD_CHANGES: &str = "changes";
/// External id of the total test count field.
pub const FIELD_TOTAL_TESTS: &str = "total-test-cases";
/// External id of the failed test count field.
pub const FIELD_FAILED_TESTS: &str = "failed-test-cases";

/// Pure mapping from a build and its resolved identities to item fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldMapper;

impl FieldMapper {
    /// Fields for a newly created item, in posting order.
    #[must_use]
    pub fn create_fields(build: &BuildRecord, identities: &[RemoteIdentity]) -> Vec<ItemField> {
        let mut fields = vec![ItemField::text(
            FIELD_BUILD_NUMBER,
            format!("Build {}", build.number()),
        )];
        fields.extend(Self::update_fields(build, identities));
        fields
    }

    /// Fields for refreshing an existing item; the build label is left as
    /// it was created.
    #[must_use]
    pub fn update_fields(build: &BuildRecord, identities: &[RemoteIdentity]) -> Vec<ItemField> {
        let mut fields = vec![
            ItemField::text(FIELD_RESULT, build.result().display_text()),
            ItemField::text(FIELD_URL, build.url()),
            ItemField::text(FIELD_DURATION, build.duration_text()),
            ItemField::contacts(
                FIELD_DEVELOPERS,
                identities.iter().map(RemoteIdentity::profile_id),
            ),
        ];
        if let Some(changes) = Self::changes_text(build) {
            fields.push(ItemField::text(FIELD_CHANGES, changes));
        }
        if let Some(totals) = build.test_totals() {
            fields.push(ItemField::number(FIELD_TOTAL_TESTS, i64::from(totals.total())));
            fields.push(ItemField::number(FIELD_FAILED_TESTS, i64::from(totals.failed())));
        }
        fields
    }

    /// Change messages, trimmed and joined one per line.
    ///
    /// Returns `None` for an empty change set.
    #[must_use]
    pub fn changes_text(build: &BuildRecord) -> Option<String> {
        let entries = build.change_entries();
        if entries.is_empty() {
            return None;
        }
        Some(
            entries
                .iter()
                .map(|entry| entry.message().trim())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}
