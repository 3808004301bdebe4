//! Contact database segment types.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A saved recipient search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Segment ID.
    pub id: u64,
    /// Segment name.
    pub name: String,
    /// List the segment draws from, when restricted to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<u64>,
    /// Conditions, evaluated left to right.
    #[serde(default)]
    pub conditions: Vec<SearchCondition>,
    /// Number of matching recipients.
    #[serde(default)]
    pub recipient_count: u64,
}

/// Comparison applied by a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionOperator {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Less than.
    Lt,
    /// Greater than.
    Gt,
    /// Text contains.
    Contains,
}

/// How a condition combines with the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AndOr {
    /// Both must match.
    And,
    /// Either may match.
    Or,
}

/// One condition of a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCondition {
    /// Recipient field name.
    pub field: String,
    /// Value to compare against.
    pub value: String,
    /// Comparison operator.
    pub operator: ConditionOperator,
    /// Connective to the previous condition; absent on the first one.
    #[serde(
        default,
        deserialize_with = "deserialize_and_or",
        skip_serializing_if = "Option::is_none"
    )]
    pub and_or: Option<AndOr>,
}

impl SearchCondition {
    /// Creates the first condition of a segment.
    pub fn new(
        field: impl Into<String>,
        operator: ConditionOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            operator,
            and_or: None,
        }
    }

    /// Sets the connective to the previous condition.
    #[must_use]
    pub fn joined_by(mut self, and_or: AndOr) -> Self {
        self.and_or = Some(and_or);
        self
    }
}

// The provider sends "" for the first condition's connective.
fn deserialize_and_or<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<AndOr>, D::Error> {
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some("and") => Ok(Some(AndOr::And)),
        Some("or") => Ok(Some(AndOr::Or)),
        Some(other) => Err(D::Error::unknown_variant(other, &["and", "or"])),
    }
}

/// Request body for creating a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateSegmentRequest {
    /// Segment name.
    pub name: String,
    /// Restrict the segment to one list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_id: Option<u64>,
    /// Conditions.
    pub conditions: Vec<SearchCondition>,
}

impl CreateSegmentRequest {
    /// Creates a request over the whole contact database.
    pub fn new(name: impl Into<String>, conditions: Vec<SearchCondition>) -> Self {
        Self {
            name: name.into(),
            list_id: None,
            conditions,
        }
    }

    /// Restricts the segment to a list.
    #[must_use]
    pub fn list_id(mut self, list_id: u64) -> Self {
        self.list_id = Some(list_id);
        self
    }
}

/// Request body for a partial segment update. Absent fields are unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateSegmentRequest {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New list restriction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_id: Option<u64>,
    /// Replacement conditions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<SearchCondition>>,
}
