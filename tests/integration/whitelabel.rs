//! Integration tests for sender authentication

use super::*;
use sendgrid_client::{
    CreateDomainRequest, DomainListParams, LimitOffsetParams, SendGridError, UpdateDomainRequest,
};
use serde_json::json;
use wiremock::matchers::{body_json, query_param};

fn domain_body(id: u64) -> serde_json::Value {
    json!({
        "id": id,
        "user_id": 7,
        "subdomain": "em",
        "domain": "example.com",
        "username": "jdoe",
        "ips": [],
        "custom_spf": false,
        "default": true,
        "legacy": false,
        "automatic_security": true,
        "valid": false,
        "dns": {
            "mail_cname": {
                "valid": false,
                "type": "cname",
                "host": "em.example.com",
                "data": "u7.wl.sendgrid.net"
            }
        }
    })
}

#[tokio::test]
async fn test_list_domains_with_filters() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/v3/whitelabel/domains")
        .and(query_param("limit", "10"))
        .and(query_param("offset", "0"))
        .and(query_param("exclude_subusers", "true"))
        .and(query_param("domain", "example.com"))
        .respond_with(success_response(json!([domain_body(1)])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let params = DomainListParams {
        page: LimitOffsetParams::new(10, 0),
        exclude_subusers: true,
        domain: Some("example.com".to_string()),
        ..Default::default()
    };
    let domains = client.whitelabel().domains().list(&params).await.unwrap();

    assert_eq!(domains.len(), 1);
    assert!(domains[0].is_default);
    assert_eq!(
        domains[0].dns.mail_cname.as_ref().map(|r| r.host.as_str()),
        Some("em.example.com")
    );
}

#[tokio::test]
async fn test_create_and_update_domain() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("POST", "/v3/whitelabel/domains")
        .and(body_json(json!({
            "domain": "example.com",
            "subdomain": "em",
            "automatic_security": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(domain_body(5)))
        .mount(&mock_server)
        .await;
    mock_with_auth("PATCH", "/v3/whitelabel/domains/5")
        .and(body_json(json!({"default": false})))
        .respond_with(success_response(domain_body(5)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let domains = client.whitelabel().domains();
    let created = domains
        .create(
            &CreateDomainRequest::new("example.com")
                .subdomain("em")
                .automatic_security(true),
        )
        .await
        .unwrap();
    let update = UpdateDomainRequest {
        is_default: Some(false),
        ..Default::default()
    };
    domains.update(created.id, &update).await.unwrap();
}

#[tokio::test]
async fn test_validate_domain_reports_failures() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("POST", "/v3/whitelabel/domains/5/validate")
        .respond_with(success_response(json!({
            "id": 5,
            "valid": false,
            "validation_results": {
                "mail_cname": {"valid": false, "reason": "Expected CNAME to match"},
                "dkim1": {"valid": true, "reason": null},
                "dkim2": {"valid": false, "reason": "Expected CNAME to match"}
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.whitelabel().domains().validate(5).await.unwrap();

    assert!(!result.valid);
    assert_eq!(result.failed_records(), vec!["dkim2", "mail_cname"]);
}

#[tokio::test]
async fn test_disassociate_domain_is_idempotent() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("DELETE", "/v3/whitelabel/domains/subuser")
        .and(query_param("username", "jdoe"))
        .respond_with(error_response(404, "no association found"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client
        .whitelabel()
        .domains()
        .disassociate("jdoe")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_missing_domain_surfaces_not_found() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("DELETE", "/v3/whitelabel/domains/404")
        .respond_with(error_response(404, "resource not found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.whitelabel().domains().delete(404).await.unwrap_err();

    assert!(matches!(err, SendGridError::Api { status: 404, .. }));
}

#[tokio::test]
async fn test_ip_and_link_endpoints() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/v3/whitelabel/ips/3")
        .respond_with(success_response(json!({
            "id": 3,
            "ip": "192.168.1.1",
            "rdns": "o1.email.example.com",
            "users": [],
            "valid": true,
            "legacy": false
        })))
        .mount(&mock_server)
        .await;
    mock_with_auth("GET", "/v3/whitelabel/links/default")
        .and(query_param("domain", "example.com"))
        .respond_with(success_response(json!({
            "id": 9,
            "domain": "example.com",
            "subdomain": "links",
            "default": true,
            "valid": true,
            "legacy": false,
            "dns": {}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let ip = client.whitelabel().ips().get(3).await.unwrap();
    let link = client
        .whitelabel()
        .links()
        .get_default(Some("example.com"))
        .await
        .unwrap();

    assert_eq!(ip.rdns, "o1.email.example.com");
    assert!(link.is_default);
    assert!(link.dns.domain_cname.is_none());
}
