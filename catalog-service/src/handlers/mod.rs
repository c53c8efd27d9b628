pub mod catalog;
pub mod health;

pub use catalog::{list_catalog, not_found};
pub use health::{health_check, metrics_endpoint, readiness_check};
