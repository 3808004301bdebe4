//! Integration tests for Event Webhook parsing

use sendgrid_client::{parse_events, Event, SendGridError};

const BATCH: &str = r#"[
    {
        "email": "john.doe@sendgrid.com",
        "timestamp": 1588777534,
        "smtp-id": "<4FB4041F.6080505@sendgrid.com>",
        "event": "delivered",
        "category": ["cat facts"],
        "sg_event_id": "rWVYmVk90MjZJ9iohOBa3w==",
        "sg_message_id": "14c5d75ce93.dfd.64b469.filter0001.16648.5515E0B88.0",
        "response": "250 OK",
        "order_id": 4711
    },
    {
        "email": "john.doe@sendgrid.com",
        "timestamp": 1588777600,
        "event": "open",
        "useragent": "Mozilla/5.0",
        "ip": "255.255.255.255",
        "sg_machine_open": false
    },
    {
        "email": "john.doe@sendgrid.com",
        "timestamp": 1588777700,
        "event": "dropped",
        "reason": "Bounced Address",
        "status": "5.0.0"
    },
    {
        "email": "john.doe@sendgrid.com",
        "timestamp": 1588777800,
        "event": "group_resubscribe",
        "asm_group_id": 42
    }
]"#;

#[test]
fn test_parse_batch() {
    let events = parse_events(BATCH.as_bytes()).unwrap();

    assert_eq!(events.len(), 4);
    match &events[0] {
        Event::Delivered { base, response } => {
            assert_eq!(response.as_deref(), Some("250 OK"));
            assert_eq!(base.unique_args.get("order_id"), Some(&serde_json::json!(4711)));
            assert_eq!(base.timestamp.timestamp(), 1_588_777_534);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    match &events[1] {
        Event::Open { useragent, ip, base } => {
            assert_eq!(useragent.as_deref(), Some("Mozilla/5.0"));
            assert_eq!(ip.as_deref(), Some("255.255.255.255"));
            assert!(base.unique_args.contains_key("sg_machine_open"));
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(events[2].kind(), "dropped");
    assert!(matches!(
        events[3],
        Event::GroupResubscribe { asm_group_id: 42, .. }
    ));
}

#[test]
fn test_events_missing_required_fields_are_rejected() {
    let err = parse_events(br#"[{"event": "click", "email": "a@b.com", "timestamp": 1}]"#)
        .unwrap_err();

    assert!(matches!(err, SendGridError::Decode { .. }));
}
