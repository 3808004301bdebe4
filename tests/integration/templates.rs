//! Integration tests for transactional templates

use super::*;
use sendgrid_client::{
    CreateVersionRequest, GenerationFilter, ListTemplatesParams, SendGridError,
    TemplateGeneration,
};
use serde_json::json;
use wiremock::matchers::{body_json, query_param};

fn version_body(active: u8) -> serde_json::Value {
    json!({
        "id": "ver-1",
        "template_id": "tmpl-1",
        "active": active,
        "name": "v1",
        "subject": "{{subject}}",
        "html_content": "<p>Hello {{name}}</p>",
        "plain_content": "Hello {{name}}",
        "editor": "code",
        "updated_at": "2024-01-01 10:00:00"
    })
}

#[tokio::test]
async fn test_create_dynamic_template() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("POST", "/v3/templates")
        .and(body_json(json!({"name": "Welcome", "generation": "dynamic"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "tmpl-1",
            "name": "Welcome",
            "generation": "dynamic",
            "updated_at": "2024-01-01 10:00:00",
            "versions": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let template = client
        .templates()
        .create("Welcome", TemplateGeneration::Dynamic)
        .await
        .unwrap();

    assert_eq!(template.id, "tmpl-1");
    assert_eq!(template.generation, Some(TemplateGeneration::Dynamic));
}

#[tokio::test]
async fn test_list_dynamic_templates_reads_result_envelope() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/v3/templates")
        .and(query_param("generations", "dynamic"))
        .and(query_param("page_size", "18"))
        .respond_with(success_response(json!({
            "result": [
                {"id": "tmpl-1", "name": "Welcome", "generation": "dynamic", "versions": []}
            ],
            "_metadata": {"count": 1}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let params = ListTemplatesParams::new()
        .generations(GenerationFilter::Dynamic)
        .page_size(18);
    let templates = client.templates().list(&params).await.unwrap();

    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].name, "Welcome");
}

#[tokio::test]
async fn test_list_legacy_templates_by_default() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/v3/templates")
        .and(query_param("generations", "legacy"))
        .respond_with(success_response(json!({"templates": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let templates = client
        .templates()
        .list(&ListTemplatesParams::default())
        .await
        .unwrap();

    assert!(templates.is_empty());
}

#[tokio::test]
async fn test_version_lifecycle() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("POST", "/v3/templates/tmpl-1/versions")
        .and(body_json(json!({
            "name": "v1",
            "subject": "{{subject}}",
            "html_content": "<p>Hello {{name}}</p>",
            "active": 1
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(version_body(1)))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_with_auth("POST", "/v3/templates/tmpl-1/versions/ver-1/activate")
        .respond_with(success_response(version_body(1)))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_with_auth("DELETE", "/v3/templates/tmpl-1/versions/ver-1")
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let templates = client.templates();
    let request = CreateVersionRequest::new("v1")
        .subject("{{subject}}")
        .html_content("<p>Hello {{name}}</p>")
        .active(true);

    let version = templates.create_version("tmpl-1", &request).await.unwrap();
    assert!(version.active);

    let activated = templates.activate_version("tmpl-1", "ver-1").await.unwrap();
    assert_eq!(activated.id, "ver-1");

    templates.delete_version("tmpl-1", "ver-1").await.unwrap();
}

#[tokio::test]
async fn test_invalid_template_id_never_reaches_server() {
    let mock_server = setup_mock_server().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.templates().get("a/b").await.unwrap_err();

    assert!(matches!(err, SendGridError::Validation { .. }));
}

#[tokio::test]
async fn test_unexpected_body_is_decode_error() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/v3/templates/tmpl-1")
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.templates().get("tmpl-1").await.unwrap_err();

    match err {
        SendGridError::Decode { body, .. } => assert!(body.contains("oops")),
        other => panic!("unexpected error: {other:?}"),
    }
}
