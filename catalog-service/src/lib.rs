//! catalog-service: serves the documents of one MongoDB collection as a JSON
//! array, with each document's `_id` rendered as a string.
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

pub const SERVICE_NAME: &str = "catalog-service";
