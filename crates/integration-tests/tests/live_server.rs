//! Smoke tests against a running catalog server.
//!
//! These tests require:
//! - The server running (cargo run -p catalog-admin)
//! - `CATALOG_BASE_URL` pointing at it, or the default `http://localhost:3000/`
//!
//! Run with: cargo test -p catalog-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use catalog_client::{CategoryApi, ClientError, HttpCategoryApi};
use catalog_core::CategoryInput;
use catalog_integration_tests::live_base_url;
use reqwest::{Client, StatusCode};

#[tokio::test]
#[ignore = "Requires running catalog server"]
async fn test_live_health() {
    let client = Client::new();
    let base_url = live_base_url();

    let resp = client
        .get(format!("{}/health", base_url.trim_end_matches('/')))
        .send()
        .await
        .expect("Failed to reach health endpoint");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running catalog server"]
async fn test_live_create_and_delete() {
    let (api, _page) = HttpCategoryApi::connect(&live_base_url()).await.unwrap();

    let input = CategoryInput {
        name: format!("Smoke {}", std::process::id()),
        description: None,
        is_active: false,
    };
    let created = api.create(&input).await.unwrap();

    let err = api.create(&input).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    api.delete(created.category.id).await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running catalog server"]
async fn test_live_mutation_without_token_is_forbidden() {
    let client = Client::new();
    let base_url = live_base_url();

    let resp = client
        .post(format!("{}/categories", base_url.trim_end_matches('/')))
        .json(&serde_json::json!({"name": "Forged"}))
        .send()
        .await
        .expect("Failed to reach server");

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
