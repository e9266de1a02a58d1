//! HTTP-level tests for the API wrapper against a mock server.
//!
//! The client is blocking, so each call runs under `spawn_blocking`
//! while wiremock serves from the test runtime.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use plantlab_client::{Api, EntityClient};
use plantlab_core::{Error, RecordStore};

async fn api_for(server: &MockServer, token: Option<&str>) -> Api {
    let base = format!("{}/api", server.uri());
    let token = token.map(str::to_string);
    tokio::task::spawn_blocking(move || Api::new(&base, token.as_deref()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn list_sends_bearer_token_and_parses_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/indoor/subculturing"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 2, "batch_name": "B-002", "transfer_date": "2024-01-10T00:00:00.000Z"},
            {"id": 1, "batch_name": "B-001", "transfer_date": "2024-01-01T00:00:00.000Z"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server, Some("tok-123")).await;
    let rows = tokio::task::spawn_blocking(move || api.list("/indoor/subculturing"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id(), Some(2));
    assert_eq!(rows[0].get_str("batch_name").as_deref(), Some("B-002"));
}

#[tokio::test]
async fn create_posts_json_payload() {
    let server = MockServer::start().await;
    let payload = json!({"batchName": "B-003", "noOfShoots": 0});
    Mock::given(method("POST"))
        .and(path("/api/indoor/subculturing"))
        .and(body_json(payload.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server, None).await;
    tokio::task::spawn_blocking(move || api.create("/indoor/subculturing", &payload))
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn update_and_delete_target_the_id_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/operators/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Operator updated"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/operators/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Operator deleted"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server, None).await;
    tokio::task::spawn_blocking(move || {
        api.update("/operators", 7, &json!({"firstName": "Asha"}))?;
        api.delete("/operators", 7)
    })
    .await
    .unwrap()
    .unwrap();
}

#[tokio::test]
async fn server_message_is_surfaced_on_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/indoor/incubation"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "table is locked"})),
        )
        .mount(&server)
        .await;

    let api = api_for(&server, None).await;
    let err = tokio::task::spawn_blocking(move || api.list("/indoor/incubation"))
        .await
        .unwrap()
        .unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "table is locked");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn error_without_message_reports_the_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/indoor/sampling"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let api = api_for(&server, None).await;
    let err = tokio::task::spawn_blocking(move || api.list("/indoor/sampling"))
        .await
        .unwrap()
        .unwrap_err();
    assert!(err.to_string().contains("404"), "got: {err}");
}

#[tokio::test]
async fn entity_client_implements_record_store() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/outdoor/shifting"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .mount(&server)
        .await;

    let api = api_for(&server, None).await;
    let rows = tokio::task::spawn_blocking(move || {
        let client = EntityClient::new(api, "/outdoor/shifting");
        client.list()
    })
    .await
    .unwrap()
    .unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn login_extracts_the_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"username": "root", "password": "pw"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "jwt-abc"})),
        )
        .mount(&server)
        .await;

    let api = api_for(&server, None).await;
    let token = tokio::task::spawn_blocking(move || api.login("root", "pw"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(token, "jwt-abc");
}
