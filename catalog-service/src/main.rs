use catalog_service::config::CatalogConfig;
use catalog_service::services::init_metrics;
use catalog_service::startup::Application;
use catalog_service::SERVICE_NAME;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = CatalogConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(
        SERVICE_NAME,
        &config.common.log_level,
        config.common.log_format,
        config.common.otlp_endpoint.as_deref(),
    )
    .map_err(|e| std::io::Error::other(e.to_string()))?;

    // Initialize metrics recorder (must be before any metrics are recorded)
    init_metrics().map_err(|e| {
        tracing::error!("Failed to initialize metrics: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
