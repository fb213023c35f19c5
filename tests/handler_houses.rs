mod common;

use axum::http::StatusCode;
use httpmock::prelude::*;
use serde_json::Value;

use common::{
    HOUSES_BODY, RAVENCLAW, SLYTHERIN, UNKNOWN_HOUSE, cached_lookup, create_test_server,
    mock_houses, uncached_lookup,
};

#[tokio::test]
async fn test_house_exists() {
    let upstream = MockServer::start_async().await;
    mock_houses(&upstream, 200, HOUSES_BODY).await;
    let (lookup, _cache) = cached_lookup(&upstream.base_url(), 0);
    let server = create_test_server(lookup);

    let response = server.get(&format!("/api/houses/{}", RAVENCLAW)).await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["id"], RAVENCLAW);
    assert_eq!(json["exists"], true);
}

#[tokio::test]
async fn test_house_checks_share_cached_response() {
    let upstream = MockServer::start_async().await;
    let mock = mock_houses(&upstream, 200, HOUSES_BODY).await;
    let (lookup, _cache) = cached_lookup(&upstream.base_url(), 0);
    let server = create_test_server(lookup);

    server
        .get(&format!("/api/houses/{}", RAVENCLAW))
        .await
        .assert_status_ok();
    server
        .get(&format!("/api/houses/{}", SLYTHERIN))
        .await
        .assert_status_ok();
    server
        .get(&format!("/api/houses/{}", UNKNOWN_HOUSE))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_house_not_found() {
    let upstream = MockServer::start_async().await;
    mock_houses(&upstream, 200, HOUSES_BODY).await;
    let (lookup, _cache) = cached_lookup(&upstream.base_url(), 0);
    let server = create_test_server(lookup);

    let response = server.get(&format!("/api/houses/{}", UNKNOWN_HOUSE)).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let json = response.json::<Value>();
    assert_eq!(json["errors"][0]["source"], "house");
    assert_eq!(json["errors"][0]["detail"][0], "The house does not exist.");
}

#[tokio::test]
async fn test_house_malformed_id() {
    let upstream = MockServer::start_async().await;
    let mock = mock_houses(&upstream, 200, HOUSES_BODY).await;
    let lookup = uncached_lookup(&upstream.base_url(), 0);
    let server = create_test_server(lookup);

    let response = server.get("/api/houses/not-a-uuid").await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let json = response.json::<Value>();
    assert_eq!(
        json["errors"][0]["detail"][0],
        "The house must be a valid UUID."
    );
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_house_upstream_unreachable() {
    let (lookup, _cache) = cached_lookup("http://127.0.0.1:1", 0);
    let server = create_test_server(lookup);

    let response = server.get(&format!("/api/houses/{}", RAVENCLAW)).await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<Value>();
    assert_eq!(json["errors"][0]["status"], 503);
}
