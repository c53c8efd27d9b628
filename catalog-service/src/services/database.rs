use crate::config::MongoConfig;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::ClientOptions,
    Client as MongoClient, Collection,
};
use service_core::error::AppError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

/// Read side of the catalog collection.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every document in the collection, in the order the store yields them.
    async fn find_all(&self) -> Result<Vec<Document>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

/// MongoDB-backed catalog.
///
/// The client is created on first use, not at startup: with `mongodb+srv`
/// the driver resolves SRV/TXT records while parsing the connection string,
/// and an unresolvable or unreachable cluster must surface as a failed
/// request rather than a failed boot. A failed attempt leaves the cell
/// empty, so the next request tries again.
#[derive(Clone)]
pub struct MongoDb {
    config: Arc<MongoConfig>,
    client: Arc<OnceCell<MongoClient>>,
}

impl MongoDb {
    pub fn new(config: MongoConfig) -> Self {
        tracing::info!(
            uri = %config.connection_uri(),
            database = %config.database,
            collection = %config.collection,
            "MongoDB catalog configured"
        );
        Self {
            config: Arc::new(config),
            client: Arc::new(OnceCell::new()),
        }
    }

    /// The shared client, connecting on the first call.
    pub async fn client(&self) -> Result<&MongoClient, AppError> {
        self.client
            .get_or_try_init(|| connect(&self.config))
            .await
    }

    pub async fn catalog(&self) -> Result<Collection<Document>, AppError> {
        let client = self.client().await?;
        Ok(client
            .database(&self.config.database)
            .collection(&self.config.collection))
    }
}

async fn connect(config: &MongoConfig) -> Result<MongoClient, AppError> {
    let uri = config.connection_uri();
    tracing::info!(uri = %uri, "Connecting to MongoDB");

    let mut options = ClientOptions::parse(&uri).await.map_err(|e| {
        tracing::error!("Failed to resolve MongoDB connection string {}: {}", uri, e);
        AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
    })?;
    options.app_name = Some(crate::SERVICE_NAME.to_string());
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));
    if let Some(credential) = config.credential() {
        options.credential = Some(credential);
    }

    MongoClient::with_options(options).map_err(|e| {
        tracing::error!("Failed to create MongoDB client for {}: {}", uri, e);
        AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
    })
}

#[async_trait]
impl CatalogStore for MongoDb {
    async fn find_all(&self) -> Result<Vec<Document>, AppError> {
        let collection = &self.config.collection;
        let mut cursor = self.catalog().await?.find(None, None).await.map_err(|e| {
            tracing::error!(collection = %collection, "Failed to scan catalog: {}", e);
            AppError::from(e)
        })?;

        let mut documents = Vec::new();
        while let Some(document) = cursor.try_next().await.map_err(|e| {
            tracing::error!(collection = %collection, "Failed to read catalog cursor: {}", e);
            AppError::from(e)
        })? {
            documents.push(document);
        }

        tracing::debug!(
            collection = %collection,
            count = documents.len(),
            "Catalog scan complete"
        );
        Ok(documents)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client()
            .await?
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }
}
