pub mod database;
pub mod metrics;

pub use database::{CatalogStore, MongoDb};
pub use metrics::{
    get_metrics, init_metrics, record_catalog_request, record_catalog_served, record_scan_failure,
};
