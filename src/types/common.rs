//! Common types shared across resources.

use serde::{Deserialize, Deserializer, Serializer};

/// Page-number pagination used by the contact database endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    /// 1-based page number.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
}

impl PageParams {
    /// Default page.
    pub const DEFAULT_PAGE: u32 = 1;
    /// Default page size.
    pub const DEFAULT_PAGE_SIZE: u32 = 100;

    /// Creates parameters for a specific page.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Converts to query parameters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("page_size".to_string(), self.page_size.to_string()),
        ]
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Limit/offset pagination used by the whitelabel endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitOffsetParams {
    /// Maximum number of items to return.
    pub limit: u32,
    /// Number of items to skip.
    pub offset: u32,
}

impl LimitOffsetParams {
    /// Default limit.
    pub const DEFAULT_LIMIT: u32 = 50;

    /// Creates limit/offset parameters.
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    /// Converts to query parameters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("limit".to_string(), self.limit.to_string()),
            ("offset".to_string(), self.offset.to_string()),
        ]
    }
}

impl Default for LimitOffsetParams {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Serde adapter for flags SendGrid encodes as `0`/`1`.
///
/// Deserialization also accepts JSON booleans.
pub(crate) mod int_bool {
    use super::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Flag::deserialize(deserializer)? {
            Flag::Bool(b) => b,
            Flag::Int(i) => i != 0,
        })
    }

    /// Writes an optional flag as `0`/`1`; only used on request bodies.
    pub fn serialize_option<S: Serializer>(
        value: &Option<bool>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(flag) => serialize(flag, serializer),
            None => serializer.serialize_none(),
        }
    }
}
