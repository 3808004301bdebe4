//! Contact database custom field types.

use serde::{Deserialize, Serialize};

/// Data type of a custom field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Unix timestamp or `MM/DD/YYYY` date.
    Date,
    /// Free text.
    Text,
    /// Numeric value.
    Number,
}

/// A user-defined custom field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    /// Field ID.
    pub id: u64,
    /// Field name.
    pub name: String,
    /// Field type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

/// A field every recipient has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedField {
    /// Field name.
    pub name: String,
    /// Field type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

/// Request body for creating a custom field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct CreateCustomFieldRequest<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}
