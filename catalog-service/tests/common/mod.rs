#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use catalog_service::config::{CatalogConfig, MongoConfig};
use catalog_service::services::{CatalogStore, MongoDb};
use catalog_service::startup::{build_router, AppState, Application};
use mongodb::bson::Document;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use service_core::error::AppError;
use std::sync::Arc;
use tower::util::ServiceExt;
use uuid::Uuid;

pub const TEST_COLLECTION: &str = "plats";

/// Configuration pointing at a local unauthenticated MongoDB.
pub fn test_config(database: &str) -> CatalogConfig {
    CatalogConfig {
        common: CoreConfig {
            port: 0, // Random port for testing
            ..CoreConfig::default()
        },
        mongodb: MongoConfig {
            scheme: "mongodb".to_string(),
            host: "localhost:27017".to_string(),
            user: None,
            password: Secret::new(String::new()),
            database: database.to_string(),
            collection: TEST_COLLECTION.to_string(),
            options: String::new(),
            server_selection_timeout_secs: 2,
        },
    }
}

/// Store double: serves a fixed set of documents, or fails every call the
/// way an unreachable cluster does.
pub struct InMemoryCatalog {
    documents: Vec<Document>,
    reachable: bool,
}

impl InMemoryCatalog {
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents,
            reachable: true,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            documents: Vec::new(),
            reachable: false,
        }
    }

    fn check_reachable(&self) -> Result<(), AppError> {
        if self.reachable {
            Ok(())
        } else {
            Err(AppError::DatabaseError(anyhow::anyhow!(
                "Server selection timeout: No available servers"
            )))
        }
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn find_all(&self) -> Result<Vec<Document>, AppError> {
        self.check_reachable()?;
        Ok(self.documents.clone())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.check_reachable()
    }
}

/// Router over an in-memory store, no network involved.
pub fn router_with(store: InMemoryCatalog) -> Router {
    build_router(AppState {
        config: test_config("catalog_test"),
        store: Arc::new(store),
    })
}

/// Send a GET and return status plus raw body.
pub async fn get(router: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("Failed to execute request");

    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    (status, headers, body.to_vec())
}

/// A running application backed by a real MongoDB on localhost.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: MongoDb,
    pub db_name: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db_name = format!("catalog_test_{}", Uuid::new_v4().simple());
        let config = test_config(&db_name);

        let db = MongoDb::new(config.mongodb.clone());

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
        }
    }

    pub async fn seed(&self, documents: Vec<Document>) {
        if documents.is_empty() {
            return;
        }
        self.db
            .catalog()
            .await
            .expect("Failed to connect to MongoDB")
            .insert_many(documents, None)
            .await
            .expect("Failed to seed catalog");
    }

    /// Drop the per-test database.
    pub async fn cleanup(&self) {
        if let Ok(client) = self.db.client().await {
            let _ = client.database(&self.db_name).drop(None).await;
        }
    }
}
