#![allow(dead_code)]

use axum::{
    Router,
    routing::{get, post},
};
use axum_test::TestServer;
use httpmock::prelude::*;
use httpmock::Mock;
use potter_houses::api::handlers::{
    health_handler, house_check_handler, validate_character_handler,
};
use potter_houses::application::services::HouseLookupService;
use potter_houses::infrastructure::cache::{CacheService, MemoryCache, NullCache};
use potter_houses::infrastructure::potter::{ClientConfig, PotterApiClient};
use potter_houses::state::AppState;
use std::sync::Arc;
use std::time::Duration;

pub const SECRET: &str = "test-secret";

pub const GRYFFINDOR: &str = "1760529f-6d51-4cb1-bcb1-25087fce5bde";
pub const HUFFLEPUFF: &str = "542b28e2-9904-4008-b038-034ab312ad7e";
pub const RAVENCLAW: &str = "56cabe3a-9bce-4b83-ba63-dcd156e9be45";
pub const SLYTHERIN: &str = "df01bd60-e3ed-478c-b760-cdbd9afe51fc";
pub const UNKNOWN_HOUSE: &str = "00000000-0000-4000-8000-000000000000";

pub const HOUSES_BODY: &str = r#"{"houses":[
    {"id":"1760529f-6d51-4cb1-bcb1-25087fce5bde","name":"Gryffindor","mascot":"lion","colors":["scarlet","gold"],"founder":"Goderic Gryffindor"},
    {"id":"542b28e2-9904-4008-b038-034ab312ad7e","name":"Hufflepuff","mascot":"badger","colors":["yellow","black"],"founder":"Helga Hufflepuff"},
    {"id":"56cabe3a-9bce-4b83-ba63-dcd156e9be45","name":"Ravenclaw","mascot":"eagle","colors":["blue","bronze"],"founder":"Rowena Ravenclaw"},
    {"id":"df01bd60-e3ed-478c-b760-cdbd9afe51fc","name":"Slytherin","mascot":"serpent","colors":["green","silver"],"founder":"Salazar Slytherin"}
]}"#;

/// Mounts `GET /houses` answering `status` with `body`, requiring the API key.
pub async fn mock_houses<'a>(server: &'a MockServer, status: u16, body: &str) -> Mock<'a> {
    let body = body.to_string();
    server
        .mock_async(move |when, then| {
            when.method(GET).path("/houses").header("apikey", SECRET);
            then.status(status)
                .header("content-type", "application/json")
                .body(body);
        })
        .await
}

pub fn client_config(base_url: &str, retry_amount: u32) -> ClientConfig {
    ClientConfig::new(base_url, SECRET)
        .with_timeout(Duration::from_secs(2))
        .with_retry(retry_amount, Duration::from_millis(10))
}

/// Lookup against `base_url` with a fresh in-memory cache.
pub fn cached_lookup(
    base_url: &str,
    retry_amount: u32,
) -> (Arc<HouseLookupService>, Arc<MemoryCache>) {
    let config = client_config(base_url, retry_amount);
    let cache = Arc::new(MemoryCache::new());
    let client = PotterApiClient::new(&config).unwrap();

    let lookup = HouseLookupService::new(
        Arc::new(client),
        cache.clone(),
        config.effective_cache_ttl(),
    );

    (Arc::new(lookup), cache)
}

/// Lookup against `base_url` that never caches.
pub fn uncached_lookup(base_url: &str, retry_amount: u32) -> Arc<HouseLookupService> {
    let config = client_config(base_url, retry_amount).with_cache(false, Duration::ZERO);
    let client = PotterApiClient::new(&config).unwrap();
    let cache: Arc<dyn CacheService> = Arc::new(NullCache::new());

    Arc::new(HouseLookupService::new(
        Arc::new(client),
        cache,
        config.effective_cache_ttl(),
    ))
}

pub fn create_test_server(lookup: Arc<HouseLookupService>) -> TestServer {
    let state = AppState::new(lookup);

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/characters/validate", post(validate_character_handler))
        .route("/api/houses/{house}", get(house_check_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}
