//! Contact list and recipient types.

use serde::{Deserialize, Serialize};

use super::custom_fields::FieldType;

/// A contact list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// List ID.
    pub id: u64,
    /// List name.
    pub name: String,
    /// Number of recipients on the list.
    #[serde(default)]
    pub recipient_count: u64,
}

/// A recipient in the contact database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    /// Recipient ID (base64 of the lowercased email).
    pub id: String,
    /// Email address.
    pub email: String,
    /// First name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Creation time, unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    /// Last update time, unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    /// Last click time, unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_clicked: Option<i64>,
    /// Last send time, unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_emailed: Option<i64>,
    /// Last open time, unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_opened: Option<i64>,
    /// Custom field values.
    #[serde(default)]
    pub custom_fields: Vec<RecipientField>,
}

/// A custom field value on a recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipientField {
    /// Field ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Field name.
    pub name: String,
    /// Field value; its JSON type follows the field type.
    #[serde(default)]
    pub value: serde_json::Value,
    /// Field type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
}

/// Request body for creating or renaming a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ListNameRequest<'a> {
    pub name: &'a str,
}
