//! Integration tests for the reqwest transport.
//!
//! These run the real blocking client against a wiremock server. The
//! blocking client must not live on an async worker, so every client call
//! happens inside `spawn_blocking`.

use std::time::Duration;

use pix_client::{ClientError, PixClient, RouteStyle, Settings};
use pix_types::{PixError, TransferRequest, TransferStatus, TransportError};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer) -> Settings {
    Settings::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

async fn blocking<F, R>(f: F) -> R
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}

#[tokio::test]
async fn test_lookup_key_over_http() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/keys/ana@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "key": "ana@example.com",
            "account_name": "Ana",
            "bank": "Nubank",
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let settings = settings(&mock_server);
    let info = blocking(move || {
        let client = PixClient::new(settings).unwrap();
        client.lookup_key("ana@example.com")
    })
    .await
    .unwrap();

    assert_eq!(info.account_name, "Ana");
    assert_eq!(info.bank, "Nubank");
}

#[tokio::test]
async fn test_lookup_key_not_found_over_http() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/keys/00000000000"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let settings = settings(&mock_server);
    let err = blocking(move || {
        let client = PixClient::new(settings).unwrap();
        client.lookup_key("00000000000")
    })
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        ClientError::Pix(PixError::KeyNotFound(ref key)) if key == "00000000000"
    ));
}

#[tokio::test]
async fn test_search_route_sends_key_as_query() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("key", "+5511987654321"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"name": "Ana", "bank": "Nubank"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let settings = settings(&mock_server).with_routes(RouteStyle::Search);
    let info = blocking(move || {
        let client = PixClient::new(settings).unwrap();
        client.lookup_key("+5511987654321")
    })
    .await
    .unwrap();

    assert_eq!(info.key, "+5511987654321");
}

#[tokio::test]
async fn test_transfer_over_http() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/keys/ana@example.com"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"name": "Ana", "bank": "Nubank"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/transactions"))
        .and(body_json(serde_json::json!({
            "source_account": "772384558",
            "destination_key": "ana@example.com",
            "amount": 25.5,
            "idempotency_key": "order-42",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "tx_id": "abcdef123",
            "status": "SUCCESS",
            "created_at": "2024-05-01T12:00:00Z",
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let settings = settings(&mock_server);
    let result = blocking(move || {
        let client = PixClient::new(settings).unwrap();
        let req = TransferRequest::new("772384558", "ana@example.com", "25.5".parse().unwrap())
            .with_idempotency_key("order-42");
        client.transfer(req)
    })
    .await
    .unwrap();

    assert_eq!(result.tx_id, "abcdef123");
    assert_eq!(result.status, TransferStatus::Success);
}

#[tokio::test]
async fn test_transfer_never_posts_for_unknown_recipient() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/keys/999999999"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let settings = settings(&mock_server);
    let err = blocking(move || {
        let client = PixClient::new(settings).unwrap();
        client.transfer(TransferRequest::new(
            "772384558",
            "999999999",
            "10".parse().unwrap(),
        ))
    })
    .await
    .unwrap_err();

    assert!(matches!(err, ClientError::Pix(PixError::KeyNotFound(_))));
}

#[tokio::test]
async fn test_transfer_rejection_carries_body_text() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/keys/176086599"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"name": "Ausnia", "bank": "Nubank"})),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("erro interno"))
        .mount(&mock_server)
        .await;

    let settings = settings(&mock_server);
    let err = blocking(move || {
        let client = PixClient::new(settings).unwrap();
        client.transfer(TransferRequest::new(
            "772384558",
            "176086599",
            "5".parse().unwrap(),
        ))
    })
    .await
    .unwrap_err();

    match err {
        ClientError::Pix(PixError::TransferFailed(detail)) => {
            assert!(detail.contains("erro interno"))
        }
        other => panic!("expected TransferFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"name": "Ana", "bank": "Nubank"}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let settings = settings(&mock_server)
        .with_timeout(Duration::from_millis(200))
        .unwrap();
    let err = blocking(move || {
        let client = PixClient::new(settings).unwrap();
        client.lookup_key("ana@example.com")
    })
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        ClientError::Transport(TransportError::Timeout(_))
    ));
}
