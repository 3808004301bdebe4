//! Integration tests for lists, segments and custom fields

use super::*;
use pretty_assertions::assert_eq;
use sendgrid_client::{
    ConditionOperator, CreateSegmentRequest, FieldType, PageParams, SearchCondition,
    SendGridError,
};
use serde_json::json;
use wiremock::matchers::{body_json, query_param};

#[tokio::test]
async fn test_list_lists_unwraps_envelope() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/v3/contactdb/lists")
        .respond_with(success_response(json!({
            "lists": [
                {"id": 1, "name": "Newsletter", "recipient_count": 12},
                {"id": 2, "name": "Customers", "recipient_count": 0}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let lists = client.lists().list().await.unwrap();

    assert_eq!(lists.len(), 2);
    assert_eq!(lists[0].name, "Newsletter");
    assert_eq!(lists[0].recipient_count, 12);
}

#[tokio::test]
async fn test_create_list_sends_name() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("POST", "/v3/contactdb/lists")
        .and(body_json(json!({"name": "Newsletter"})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"id": 7, "name": "Newsletter", "recipient_count": 0})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let list = client.lists().create("Newsletter").await.unwrap();

    assert_eq!(list.id, 7);
}

#[tokio::test]
async fn test_delete_list_with_contacts() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("DELETE", "/v3/contactdb/lists/7")
        .and(query_param("delete_contacts", "true"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.lists().delete(7, true).await.unwrap();
}

#[tokio::test]
async fn test_delete_many_sends_id_array() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("DELETE", "/v3/contactdb/lists")
        .and(body_json(json!([1, 2, 3])))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.lists().delete_many(&[1, 2, 3]).await.unwrap();
}

#[tokio::test]
async fn test_list_recipients_paging() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/v3/contactdb/lists/7/recipients")
        .and(query_param("page", "2"))
        .and(query_param("page_size", "50"))
        .respond_with(success_response(json!({
            "recipients": [{
                "id": "YUBh",
                "email": "bob@example.com",
                "first_name": "Bob",
                "last_name": "Miller",
                "created_at": 1_422_313_607,
                "custom_fields": []
            }]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let recipients = client
        .lists()
        .recipients(7, PageParams::new(2, 50))
        .await
        .unwrap();

    assert_eq!(recipients.len(), 1);
    assert_eq!(recipients[0].email, "bob@example.com");
}

#[tokio::test]
async fn test_get_missing_list_is_api_error() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/v3/contactdb/lists/99")
        .respond_with(error_response(404, "List ID does not exist"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.lists().get(99).await.unwrap_err();

    match err {
        SendGridError::Api {
            status, message, ..
        } => {
            assert_eq!(status, 404);
            assert!(message.contains("List ID does not exist"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_create_segment() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("POST", "/v3/contactdb/segments")
        .and(body_json(json!({
            "name": "Millers",
            "list_id": 4,
            "conditions": [
                {"field": "last_name", "value": "Miller", "operator": "eq"}
            ]
        })))
        .respond_with(success_response(json!({
            "id": 1,
            "name": "Millers",
            "list_id": 4,
            "conditions": [
                {"field": "last_name", "value": "Miller", "operator": "eq", "and_or": ""}
            ],
            "recipient_count": 0
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = CreateSegmentRequest::new(
        "Millers",
        vec![SearchCondition::new("last_name", ConditionOperator::Eq, "Miller")],
    )
    .list_id(4);
    let segment = client.segments().create(&request).await.unwrap();

    assert_eq!(segment.conditions[0].and_or, None);
}

#[tokio::test]
async fn test_custom_fields_and_reserved_fields() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/v3/contactdb/custom_fields")
        .respond_with(success_response(json!({
            "custom_fields": [{"id": 1, "name": "pet", "type": "text"}]
        })))
        .mount(&mock_server)
        .await;
    mock_with_auth("GET", "/v3/contactdb/reserved_fields")
        .respond_with(success_response(json!({
            "reserved_fields": [
                {"name": "email", "type": "text"},
                {"name": "created_at", "type": "date"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let fields = client.custom_fields().list().await.unwrap();
    let reserved = client.custom_fields().reserved_fields().await.unwrap();

    assert_eq!(fields[0].field_type, FieldType::Text);
    assert_eq!(reserved[1].field_type, FieldType::Date);
}
