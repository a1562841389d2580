//! Spin client behavior against a stub station API.

use axum::{http::StatusCode, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::Duration;

use wbor_sms_agent::config::Config;
use wbor_sms_agent::spins::{SpinClient, SpinError};

fn test_config(spins_api_url: String) -> Config {
    Config {
        openai_api_key: "test-key".to_string(),
        openai_model: "gpt-4o-mini".to_string(),
        openai_api_base: None,
        spins_api_url,
        spins_timeout_secs: 1,
        system_prompt: "test".to_string(),
        agent_max_iterations: 5,
        port: 0,
        langsmith_tracing: false,
        langsmith_api_key: None,
    }
}

async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn client_for(router: Router) -> SpinClient {
    let addr = spawn(router).await;
    let config = test_config(format!("http://{}/api/spins", addr));
    SpinClient::new(&config).unwrap()
}

#[tokio::test]
async fn fetch_parses_the_first_spin() {
    let router = Router::new().route(
        "/api/spins",
        get(|| async {
            Json(json!([
                {"title": "Foo", "artist": "Bar", "album": "Baz", "start": "2025-06-01T14:30:00Z"},
                {"title": "Older", "artist": "Entry"}
            ]))
        }),
    );

    let spin = client_for(router).await.fetch_current_spin().await.unwrap();
    assert_eq!(spin.title, "Foo");
    assert_eq!(spin.artist, "Bar");
    assert_eq!(spin.album.as_deref(), Some("Baz"));
}

#[tokio::test]
async fn empty_list_means_no_current_spin() {
    let router = Router::new().route("/api/spins", get(|| async { Json(json!([])) }));

    let err = client_for(router).await.fetch_current_spin().await.unwrap_err();
    assert!(matches!(err, SpinError::NoCurrentSpin));
}

#[tokio::test]
async fn server_error_carries_the_status() {
    let router = Router::new().route(
        "/api/spins",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );

    let err = client_for(router).await.fetch_current_spin().await.unwrap_err();
    match err {
        SpinError::Status(status) => assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR),
        other => panic!("expected Status, got {:?}", other),
    }
}

#[tokio::test]
async fn unparseable_body_is_malformed() {
    let router = Router::new().route("/api/spins", get(|| async { "not a spin list" }));

    let err = client_for(router).await.fetch_current_spin().await.unwrap_err();
    assert!(matches!(err, SpinError::Malformed(_)));
}

#[tokio::test]
async fn blank_fields_in_the_latest_spin_are_incomplete() {
    let router = Router::new().route(
        "/api/spins",
        get(|| async { Json(json!([{"title": "", "artist": "Bar"}])) }),
    );

    let err = client_for(router).await.fetch_current_spin().await.unwrap_err();
    assert!(matches!(err, SpinError::Incomplete));
}

#[tokio::test]
async fn slow_station_hits_the_client_timeout() {
    let router = Router::new().route(
        "/api/spins",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(Value::Array(vec![]))
        }),
    );

    let err = client_for(router).await.fetch_current_spin().await.unwrap_err();
    assert!(matches!(err, SpinError::Unreachable(_)));
}
