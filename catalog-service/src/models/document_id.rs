//! Store-assigned document identifiers and their string form.

use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::fmt;

/// Name of the identifier field MongoDB assigns to every document.
pub const ID_FIELD: &str = "_id";

/// Identifier of a stored document.
///
/// MongoDB assigns a 12-byte ObjectId unless the writer supplied its own
/// `_id`, which may be any BSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentId {
    ObjectId(ObjectId),
    Other(Bson),
}

impl DocumentId {
    pub fn from_bson(value: &Bson) -> Self {
        match value {
            Bson::ObjectId(oid) => DocumentId::ObjectId(*oid),
            other => DocumentId::Other(other.clone()),
        }
    }
}

/// ObjectIds render as 24 lowercase hex characters, strings verbatim,
/// integers in decimal, and anything else as relaxed Extended JSON.
impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentId::ObjectId(oid) => write!(f, "{}", oid.to_hex()),
            DocumentId::Other(Bson::String(s)) => f.write_str(s),
            DocumentId::Other(Bson::Int32(n)) => write!(f, "{}", n),
            DocumentId::Other(Bson::Int64(n)) => write!(f, "{}", n),
            DocumentId::Other(other) => write!(f, "{}", other.clone().into_relaxed_extjson()),
        }
    }
}

impl From<ObjectId> for DocumentId {
    fn from(oid: ObjectId) -> Self {
        DocumentId::ObjectId(oid)
    }
}

/// Replace the document's `_id` with its string form, in place.
///
/// Field order is untouched. Documents without `_id` are left as they are.
pub fn normalize_identifier(document: &mut Document) {
    if let Some(value) = document.get_mut(ID_FIELD) {
        let id = DocumentId::from_bson(value);
        *value = Bson::String(id.to_string());
    }
}
