//! Event Webhook support.
//!
//! SendGrid posts batches of delivery and engagement events as a JSON
//! array. [`parse_events`] turns such a body into typed [`Event`]s.

mod events;

pub use events::{parse_events, Event, EventBase};
