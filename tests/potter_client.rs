mod common;

use common::{GRYFFINDOR, HOUSES_BODY, client_config, mock_houses};
use httpmock::prelude::*;
use potter_houses::domain::ports::{HouseSource, TransportError};
use potter_houses::infrastructure::potter::{ClientConfig, PotterApiClient};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Upstream that answers the first request with 500 and then drops every
/// later connection before responding.
async fn server_error_then_disconnects() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut first, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = first.read(&mut buf).await;
        first
            .write_all(
                b"HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
            )
            .await
            .unwrap();
        drop(first);

        while let Ok((conn, _)) = listener.accept().await {
            drop(conn);
        }
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_fetch_houses_success() {
    let server = MockServer::start_async().await;
    let mock = mock_houses(&server, 200, HOUSES_BODY).await;

    let client = PotterApiClient::new(&client_config(&server.base_url(), 0)).unwrap();
    let response = client.fetch_houses().await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body, HOUSES_BODY);

    let houses = response.houses().unwrap();
    assert_eq!(houses.len(), 4);
    assert!(houses.contains(GRYFFINDOR));
}

#[tokio::test]
async fn test_wrong_api_key_is_not_matched() {
    let server = MockServer::start_async().await;
    let keyed = mock_houses(&server, 200, HOUSES_BODY).await;
    let rejected = server
        .mock_async(|when, then| {
            when.method(GET).path("/houses").header("apikey", "wrong-secret");
            then.status(401);
        })
        .await;

    let config = ClientConfig::new(server.base_url(), "wrong-secret");
    let response = PotterApiClient::new(&config)
        .unwrap()
        .fetch_houses()
        .await
        .unwrap();

    assert_eq!(response.status, 401);
    rejected.assert_hits_async(1).await;
    keyed.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_server_error_retried_then_returned() {
    let server = MockServer::start_async().await;
    let mock = mock_houses(&server, 500, "").await;

    let client = PotterApiClient::new(&client_config(&server.base_url(), 2)).unwrap();
    let response = client.fetch_houses().await.unwrap();

    assert_eq!(response.status, 500);
    mock.assert_hits_async(3).await;
}

#[tokio::test]
async fn test_client_error_not_retried() {
    let server = MockServer::start_async().await;
    let mock = mock_houses(&server, 404, r#"{"error":"not found"}"#).await;

    let client = PotterApiClient::new(&client_config(&server.base_url(), 3)).unwrap();
    let response = client.fetch_houses().await.unwrap();

    assert_eq!(response.status, 404);
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_no_retries_by_default() {
    let server = MockServer::start_async().await;
    let mock = mock_houses(&server, 503, "").await;

    let client = PotterApiClient::new(&client_config(&server.base_url(), 0)).unwrap();
    let response = client.fetch_houses().await.unwrap();

    assert_eq!(response.status, 503);
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_connection_refused_exhausts_attempts() {
    // Port 1 is reserved and nothing listens on it in test environments
    let client = PotterApiClient::new(&client_config("http://127.0.0.1:1/", 2)).unwrap();

    match client.fetch_houses().await {
        Err(TransportError::Exhausted {
            endpoint, attempts, ..
        }) => {
            assert_eq!(endpoint, "http://127.0.0.1:1/houses");
            assert_eq!(attempts, 3);
        }
        other => panic!("expected transport exhaustion, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_applies_per_attempt() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/houses");
            then.status(200)
                .body(HOUSES_BODY)
                .delay(Duration::from_millis(500));
        })
        .await;

    let config = client_config(&server.base_url(), 1).with_timeout(Duration::from_millis(100));
    let client = PotterApiClient::new(&config).unwrap();

    match client.fetch_houses().await {
        Err(TransportError::Exhausted {
            attempts, message, ..
        }) => {
            assert_eq!(attempts, 2);
            assert!(message.contains("timed out"), "unexpected message: {message}");
        }
        other => panic!("expected timeout, got {:?}", other),
    }

    assert!(mock.hits_async().await >= 1);
}

#[tokio::test]
async fn test_earlier_server_error_wins_over_later_disconnect() {
    let base_url = server_error_then_disconnects().await;
    let client = PotterApiClient::new(&client_config(&base_url, 1)).unwrap();

    let response = client.fetch_houses().await.unwrap();

    assert_eq!(response.status, 500);
}
