pub mod catalog;
pub mod document_id;

pub use catalog::into_payload;
pub use document_id::{normalize_identifier, DocumentId, ID_FIELD};
