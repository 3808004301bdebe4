//! Event Webhook payload models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::errors::{SendGridError, SendGridResult};

/// Fields common to every event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBase {
    /// Recipient address.
    pub email: String,
    /// When the event happened.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    /// SMTP message ID.
    #[serde(rename = "smtp-id", default, skip_serializing_if = "Option::is_none")]
    pub smtp_id: Option<String>,
    /// Unique event ID, usable for deduplication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sg_event_id: Option<String>,
    /// Provider message ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sg_message_id: Option<String>,
    /// Categories the message was sent with.
    #[serde(
        default,
        deserialize_with = "deserialize_category",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub category: Vec<String>,
    /// Custom arguments and any fields not modelled above.
    #[serde(flatten)]
    pub unique_args: HashMap<String, Value>,
}

/// One event posted by the Event Webhook.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Message accepted and ready to be delivered.
    Processed {
        /// Common fields.
        #[serde(flatten)]
        base: EventBase,
    },
    /// Receiving server temporarily rejected the message.
    Deferred {
        /// Common fields.
        #[serde(flatten)]
        base: EventBase,
        /// Receiving server's response.
        #[serde(default)]
        response: Option<String>,
        /// Delivery attempt number.
        #[serde(default, deserialize_with = "deserialize_attempt")]
        attempt: Option<u32>,
    },
    /// Message accepted by the receiving server.
    Delivered {
        /// Common fields.
        #[serde(flatten)]
        base: EventBase,
        /// Receiving server's response.
        #[serde(default)]
        response: Option<String>,
    },
    /// Recipient opened the message.
    Open {
        /// Common fields.
        #[serde(flatten)]
        base: EventBase,
        /// Recipient's user agent.
        #[serde(default)]
        useragent: Option<String>,
        /// Recipient's IP.
        #[serde(default)]
        ip: Option<String>,
    },
    /// Recipient clicked a link.
    Click {
        /// Common fields.
        #[serde(flatten)]
        base: EventBase,
        /// Clicked URL.
        url: String,
        /// Recipient's user agent.
        #[serde(default)]
        useragent: Option<String>,
        /// Recipient's IP.
        #[serde(default)]
        ip: Option<String>,
    },
    /// Receiving server permanently rejected the message.
    Bounce {
        /// Common fields.
        #[serde(flatten)]
        base: EventBase,
        /// Bounce reason from the receiving server.
        #[serde(default)]
        reason: Option<String>,
        /// Enhanced SMTP status code.
        #[serde(default)]
        status: Option<String>,
        /// `bounce` or `blocked`.
        #[serde(rename = "type", default)]
        bounce_type: Option<String>,
    },
    /// Message was not sent.
    Dropped {
        /// Common fields.
        #[serde(flatten)]
        base: EventBase,
        /// Why the message was dropped.
        #[serde(default)]
        reason: Option<String>,
        /// Enhanced SMTP status code.
        #[serde(default)]
        status: Option<String>,
    },
    /// Recipient marked the message as spam.
    #[serde(rename = "spamreport")]
    SpamReport {
        /// Common fields.
        #[serde(flatten)]
        base: EventBase,
    },
    /// Recipient unsubscribed from all mail.
    Unsubscribe {
        /// Common fields.
        #[serde(flatten)]
        base: EventBase,
    },
    /// Recipient unsubscribed from a suppression group.
    GroupUnsubscribe {
        /// Common fields.
        #[serde(flatten)]
        base: EventBase,
        /// Suppression group ID.
        asm_group_id: u64,
    },
    /// Recipient resubscribed to a suppression group.
    GroupResubscribe {
        /// Common fields.
        #[serde(flatten)]
        base: EventBase,
        /// Suppression group ID.
        asm_group_id: u64,
    },
    /// An event kind this crate does not model.
    #[serde(other)]
    Unknown,
}

impl Event {
    /// The `event` tag as sent by the webhook.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Processed { .. } => "processed",
            Event::Deferred { .. } => "deferred",
            Event::Delivered { .. } => "delivered",
            Event::Open { .. } => "open",
            Event::Click { .. } => "click",
            Event::Bounce { .. } => "bounce",
            Event::Dropped { .. } => "dropped",
            Event::SpamReport { .. } => "spamreport",
            Event::Unsubscribe { .. } => "unsubscribe",
            Event::GroupUnsubscribe { .. } => "group_unsubscribe",
            Event::GroupResubscribe { .. } => "group_resubscribe",
            Event::Unknown => "unknown",
        }
    }

    /// Common fields; `None` for [`Event::Unknown`].
    pub fn base(&self) -> Option<&EventBase> {
        match self {
            Event::Processed { base }
            | Event::Deferred { base, .. }
            | Event::Delivered { base, .. }
            | Event::Open { base, .. }
            | Event::Click { base, .. }
            | Event::Bounce { base, .. }
            | Event::Dropped { base, .. }
            | Event::SpamReport { base }
            | Event::Unsubscribe { base }
            | Event::GroupUnsubscribe { base, .. }
            | Event::GroupResubscribe { base, .. } => Some(base),
            Event::Unknown => None,
        }
    }
}

/// Decodes an Event Webhook POST body, a JSON array of events, in order.
pub fn parse_events(body: &[u8]) -> SendGridResult<Vec<Event>> {
    serde_json::from_slice(body).map_err(|e| SendGridError::decode(&e, body))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn deserialize_category<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(category)) => vec![category],
        Some(OneOrMany::Many(categories)) => categories,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u32),
    Text(String),
}

// Deferred events report the attempt as a string ("1"); accept both.
fn deserialize_attempt<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
