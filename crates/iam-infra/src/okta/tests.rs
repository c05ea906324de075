use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use iam_core::domain::{NewProviderUser, PasswordCredential, ProviderCredentials, ProviderUserProfile};
use iam_core::error::ProviderError;
use iam_core::ports::IdentityProvider;

use super::{AuthorizationMode, OktaClient, OktaConfig};

fn client(server: &MockServer) -> OktaClient {
    OktaClient::new(OktaConfig::new(server.uri(), "test-token")).unwrap()
}

fn okta_user_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "status": status,
        "created": "2024-03-01T12:30:00.000Z",
        "activated": null,
        "lastUpdated": "2024-03-01T12:30:00.000Z",
        "profile": {
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "login": "ada@example.com",
            "mobilePhone": null
        },
        "credentials": { "provider": { "type": "OKTA", "name": "OKTA" } },
        "_links": {}
    })
}

#[test]
fn test_org_url_defaults_to_https() {
    let config = OktaConfig::new("dev-123.okta.com", "t");
    assert_eq!(config.org_url(), "https://dev-123.okta.com");

    let config = OktaConfig::new("http://127.0.0.1:9000/", "t");
    assert_eq!(config.org_url(), "http://127.0.0.1:9000");
}

#[test]
fn test_new_rejects_malformed_domain() {
    let result = OktaClient::new(OktaConfig::new("", "t"));
    assert!(matches!(result, Err(ProviderError::InvalidConfig(_))));
}

#[test]
fn test_new_rejects_token_that_cannot_be_a_header() {
    let result = OktaClient::new(OktaConfig::new("dev-123.okta.com", "bad\ntoken"));
    assert!(matches!(result, Err(ProviderError::InvalidConfig(_))));
}

#[test]
fn test_debug_redacts_token() {
    let config = OktaConfig::new("dev-123.okta.com", "super-secret");
    assert!(!format!("{:?}", config).contains("super-secret"));
}

#[tokio::test]
async fn test_create_user_posts_profile_and_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users"))
        .and(header("Authorization", "SSWS test-token"))
        .and(body_json(json!({
            "profile": { "email": "ada@example.com", "login": "ada@example.com" },
            "credentials": { "password": { "value": "pw" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(okta_user_json("00u1", "ACTIVE")))
        .expect(1)
        .mount(&server)
        .await;

    let payload = NewProviderUser {
        profile: ProviderUserProfile {
            email: Some("ada@example.com".to_string()),
            login: Some("ada@example.com".to_string()),
            ..Default::default()
        },
        credentials: ProviderCredentials {
            password: PasswordCredential {
                value: "pw".to_string(),
            },
        },
    };

    let user = client(&server).create_user(&payload).await.unwrap();
    assert_eq!(user.id, "00u1");
    assert_eq!(user.status, "ACTIVE");
    assert!(user.activated.is_none());
}

#[tokio::test]
async fn test_bearer_mode_sets_bearer_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/00u1"))
        .and(header("Authorization", "Bearer access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(okta_user_json("00u1", "ACTIVE")))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = OktaConfig::new(server.uri(), "access-token");
    config.authorization_mode = AuthorizationMode::Bearer;
    let client = OktaClient::new(config).unwrap();

    let user = client.get_user("00u1").await.unwrap();
    assert_eq!(user.profile.unwrap().first_name.as_deref(), Some("Ada"));
}

#[tokio::test]
async fn test_get_user_not_found_maps_okta_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errorCode": "E0000007",
            "errorSummary": "Not found: Resource not found: missing (User)",
            "errorLink": "E0000007",
            "errorId": "oaeXYZ",
            "errorCauses": []
        })))
        .mount(&server)
        .await;

    let err = client(&server).get_user("missing").await.unwrap_err();
    match err {
        ProviderError::Api {
            status,
            code,
            summary,
        } => {
            assert_eq!(status, 404);
            assert_eq!(code.as_deref(), Some("E0000007"));
            assert!(summary.contains("Resource not found"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_error_causes_are_appended_to_summary() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errorCode": "E0000001",
            "errorSummary": "Api validation failed: password",
            "errorCauses": [
                { "errorSummary": "password: Password requirements were not met." }
            ]
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .create_user(&NewProviderUser::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("Password requirements were not met"));
}

#[tokio::test]
async fn test_list_users_returns_provider_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            okta_user_json("00u2", "ACTIVE"),
            okta_user_json("00u1", "STAGED"),
        ])))
        .mount(&server)
        .await;

    let users = client(&server).list_users().await.unwrap();
    let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["00u2", "00u1"]);
}

#[tokio::test]
async fn test_list_users_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(client(&server).list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_deactivate_then_delete_hit_lifecycle_endpoints() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users/00u1/lifecycle/deactivate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/users/00u1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client.deactivate_user("00u1").await.unwrap();
    client.delete_user("00u1").await.unwrap();
}

#[tokio::test]
async fn test_user_id_is_percent_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(okta_user_json("a/b", "ACTIVE")))
        .expect(1)
        .mount(&server)
        .await;

    let user = client(&server).get_user("a/b").await.unwrap();
    assert_eq!(user.id, "a/b");
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/00u1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server).get_user("00u1").await.unwrap_err();
    assert!(matches!(err, ProviderError::Decode(_)));
}

#[tokio::test]
async fn test_validate_connection_ok() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "00o1",
            "companyName": "Example Inc",
            "subdomain": "example",
            "status": "ACTIVE"
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    client.validate_connection().await.unwrap();

    let org = client.org_settings().await.unwrap();
    assert_eq!(org.company_name.as_deref(), Some("Example Inc"));
}

#[tokio::test]
async fn test_validate_connection_reports_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/org"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server).validate_connection().await.unwrap_err();
    assert!(matches!(err, ProviderError::UnexpectedStatus(503)));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_validate_connection_unreachable() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = OktaClient::new(OktaConfig::new(uri, "t")).unwrap();
    let err = client.validate_connection().await.unwrap_err();
    assert!(matches!(err, ProviderError::Transport(_)));
}
