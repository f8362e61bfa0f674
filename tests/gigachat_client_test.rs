mod common;

use gigachat_token_releaser::domain::tokens::{ProviderError, TokenProvider};
use gigachat_token_releaser::infrastructure::gigachat::GigaChatClient;
use serde_json::{Value, json};
use uuid::Uuid;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> GigaChatClient {
    GigaChatClient::new(&common::gigachat_config(&server.uri())).unwrap()
}

#[tokio::test]
async fn test_request_token_sends_correlation_id() {
    let server = MockServer::start().await;
    let rq_uid = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path(common::OAUTH_PATH))
        .and(header("RqUID", rq_uid.to_string().as_str()))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "abc",
            "expires_at": 1700000000500i64
        })))
        .expect(1)
        .mount(&server)
        .await;

    let raw = client_for(&server).await.request_token(rq_uid).await.unwrap();

    assert_eq!(raw.access_token, "abc");
    assert_eq!(raw.minutes_valid, None);
    assert_eq!(raw.expires_at, 1_700_000_000_500);
}

#[tokio::test]
async fn test_plain_text_rejection_kept_as_string() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Bad Request"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .request_token(Uuid::new_v4())
        .await
        .unwrap_err();

    match err {
        ProviderError::Rejected { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, Value::String("Bad Request".to_string()));
        }
        other => panic!("Expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_unexpected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .request_token(Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Unexpected { status: 503 }));
}

#[tokio::test]
async fn test_success_without_token_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"expires_at": 1})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .request_token(Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Malformed(_)));
}

#[tokio::test]
async fn test_unreachable_upstream_is_transport_error() {
    let client = GigaChatClient::new(&common::gigachat_config("http://127.0.0.1:9")).unwrap();

    let err = client.request_token(Uuid::new_v4()).await.unwrap_err();

    assert!(matches!(err, ProviderError::Transport(_)));
}
