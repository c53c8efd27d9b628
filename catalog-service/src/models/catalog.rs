//! Shaping a scanned catalog into the JSON response payload.

use super::document_id::normalize_identifier;
use mongodb::bson::{Bson, Document};
use serde_json::Value;

/// Convert scanned documents into JSON objects, preserving scan order.
///
/// Each `_id` becomes a string; all other fields go through relaxed
/// Extended JSON, so plain numbers, strings, booleans, arrays and
/// sub-documents come out as their natural JSON form.
pub fn into_payload(documents: Vec<Document>) -> Vec<Value> {
    documents
        .into_iter()
        .map(|mut document| {
            normalize_identifier(&mut document);
            Bson::Document(document).into_relaxed_extjson()
        })
        .collect()
}
