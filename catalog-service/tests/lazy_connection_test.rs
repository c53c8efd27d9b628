mod common;

use catalog_service::startup::Application;
use common::test_config;
use reqwest::{Client, StatusCode};
use serde_json::Value;

/// Boot against an Atlas-style cluster name that cannot resolve.
async fn spawn_against_unresolvable_cluster() -> String {
    let mut config = test_config("catalog_unresolvable");
    config.mongodb.scheme = "mongodb+srv".to_string();
    config.mongodb.host = "cluster0.does-not-exist.invalid".to_string();
    config.mongodb.options = "retryWrites=true&w=majority".to_string();
    config.mongodb.server_selection_timeout_secs = 1;

    let app = Application::build(config)
        .await
        .expect("Startup must not depend on reaching the cluster");
    let address = format!("http://127.0.0.1:{}", app.port());

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    address
}

/// GET with a short retry loop while the listener comes up.
async fn get(url: &str) -> reqwest::Response {
    let client = Client::new();
    for _ in 0..50 {
        if let Ok(response) = client.get(url).send().await {
            return response;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    }
    panic!("Server never came up at {}", url);
}

#[tokio::test]
async fn unresolvable_cluster_fails_catalog_request_not_startup() {
    let address = spawn_against_unresolvable_cluster().await;

    let response = get(&format!("{}/plats", address)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Database error");
}

#[tokio::test]
async fn unresolvable_cluster_reports_unhealthy() {
    let address = spawn_against_unresolvable_cluster().await;

    let health = get(&format!("{}/health", address)).await;
    assert_eq!(health.status(), StatusCode::SERVICE_UNAVAILABLE);

    let ready = get(&format!("{}/ready", address)).await;
    assert_eq!(ready.status(), StatusCode::SERVICE_UNAVAILABLE);
}
