//! Item field values.

use super::ProfileId;

/// One value of an item field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Free text.
    Text(String),
    /// Integral number.
    Number(i64),
    /// Reference to a contact profile.
    Contact(ProfileId),
}

/// Assignment of values to a field identified by its external id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemField {
    external_id: &'static str,
    values: Vec<FieldValue>,
}

impl ItemField {
    /// Creates a single-valued text field.
    #[must_use]
    pub fn text(external_id: &'static str, value: impl Into<String>) -> Self {
        Self {
            external_id,
            values: vec![FieldValue::Text(value.into())],
        }
    }

    /// Creates a single-valued number field.
    #[must_use]
    pub fn number(external_id: &'static str, value: i64) -> Self {
        Self {
            external_id,
            values: vec![FieldValue::Number(value)],
        }
    }

    /// Creates a multi-valued contact field; it may be empty.
    #[must_use]
    pub fn contacts(external_id: &'static str, profiles: impl IntoIterator<Item = ProfileId>) -> Self {
        Self {
            external_id,
            values: profiles.into_iter().map(FieldValue::Contact).collect(),
        }
    }

    /// Returns the field's external id.
    #[must_use]
    pub const fn external_id(&self) -> &'static str {
        self.external_id
    }

    /// Returns the field values in order.
    #[must_use]
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }
}
