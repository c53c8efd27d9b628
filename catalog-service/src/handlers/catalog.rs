use crate::models::into_payload;
use crate::services::{record_catalog_request, record_catalog_served, record_scan_failure};
use crate::startup::AppState;
use axum::{extract::State, http::Uri, response::IntoResponse, Json};
use service_core::error::AppError;

/// `GET /plats`: the whole collection as a JSON array, `_id` as string.
pub async fn list_catalog(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let collection = &state.config.mongodb.collection;
    record_catalog_request(collection);

    let documents = state.store.find_all().await.map_err(|e| {
        record_scan_failure(collection);
        tracing::error!(collection = %collection, error = %e, "Catalog scan failed");
        e
    })?;

    let payload = into_payload(documents);

    record_catalog_served(collection, payload.len());
    tracing::info!(collection = %collection, count = payload.len(), "Catalog served");

    Ok(Json(payload))
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(anyhow::anyhow!("No route for {}", uri.path()))
}
