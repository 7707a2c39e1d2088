//! Opaque documents and the write they take part in.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// A database document.
///
/// The payload is opaque: validation hooks decide on *existence*, never on
/// content. Only the reserved `_id`, `_rev` and `_deleted` members are read,
/// and only for classification and logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Value);

impl Document {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Parse a document from JSON text.
    ///
    /// Documents are JSON objects; any other JSON value is rejected.
    pub fn from_json_str(s: &str) -> DomainResult<Self> {
        let value: Value =
            serde_json::from_str(s).map_err(|e| DomainError::malformed(e.to_string()))?;
        if !value.is_object() {
            return Err(DomainError::NotAnObject(json_kind(&value)));
        }
        Ok(Self(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn id(&self) -> Option<&str> {
        doc_id(&self.0)
    }

    pub fn rev(&self) -> Option<&str> {
        self.0.get("_rev").and_then(Value::as_str)
    }

    /// `true` for a deletion tombstone (`"_deleted": true`).
    pub fn is_deleted(&self) -> bool {
        is_tombstone(&self.0)
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// What a write does to the stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteKind {
    /// No prior revision exists.
    Create,
    /// A prior revision exists and is being replaced.
    Update,
    /// A prior revision exists and the new revision is a tombstone.
    Delete,
}

impl WriteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteKind::Create => "create",
            WriteKind::Update => "update",
            WriteKind::Delete => "delete",
        }
    }

    /// Whether the write touches an existing document.
    pub fn modifies_existing(&self) -> bool {
        !matches!(self, WriteKind::Create)
    }
}

impl core::fmt::Display for WriteKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed write: the new revision and the stored one, either possibly absent.
///
/// Borrows its documents; building one never copies a payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentWrite<'a> {
    new_doc: Option<&'a Value>,
    old_doc: Option<&'a Value>,
}

impl<'a> DocumentWrite<'a> {
    pub fn new(new_doc: Option<&'a Document>, old_doc: Option<&'a Document>) -> Self {
        Self {
            new_doc: new_doc.map(Document::as_value),
            old_doc: old_doc.map(Document::as_value),
        }
    }

    /// A creation: there is no stored revision.
    pub fn create(new_doc: &'a Document) -> Self {
        Self::new(Some(new_doc), None)
    }

    /// An update (or deletion) of a stored revision.
    pub fn update(new_doc: &'a Document, old_doc: &'a Document) -> Self {
        Self::new(Some(new_doc), Some(old_doc))
    }

    /// Build from the raw values a host passes in. JSON `null` means absent.
    pub fn from_json(new_doc: &'a Value, old_doc: &'a Value) -> Self {
        Self {
            new_doc: present(new_doc),
            old_doc: present(old_doc),
        }
    }

    pub fn new_doc(&self) -> Option<&'a Value> {
        self.new_doc
    }

    pub fn old_doc(&self) -> Option<&'a Value> {
        self.old_doc
    }

    pub fn is_creation(&self) -> bool {
        self.old_doc.is_none()
    }

    pub fn kind(&self) -> WriteKind {
        match (self.old_doc, self.new_doc) {
            (None, _) => WriteKind::Create,
            (Some(_), Some(new)) if is_tombstone(new) => WriteKind::Delete,
            (Some(_), _) => WriteKind::Update,
        }
    }

    /// Id of the target document, preferring the new revision's `_id`.
    pub fn doc_id(&self) -> Option<&'a str> {
        self.new_doc
            .and_then(doc_id)
            .or_else(|| self.old_doc.and_then(doc_id))
    }
}

fn present(value: &Value) -> Option<&Value> {
    if value.is_null() { None } else { Some(value) }
}

fn doc_id(value: &Value) -> Option<&str> {
    value.get("_id").and_then(Value::as_str)
}

fn is_tombstone(value: &Value) -> bool {
    value.get("_deleted").and_then(Value::as_bool).unwrap_or(false)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_str_accepts_objects() {
        let doc = Document::from_json_str(r#"{"_id":"packet-1","_rev":"1-abc"}"#).unwrap();
        assert_eq!(doc.id(), Some("packet-1"));
        assert_eq!(doc.rev(), Some("1-abc"));
        assert!(!doc.is_deleted());
    }

    #[test]
    fn from_json_str_rejects_non_objects() {
        let err = Document::from_json_str("[1, 2]").unwrap_err();
        assert_eq!(err, DomainError::NotAnObject("array"));
    }

    #[test]
    fn from_json_str_rejects_garbage() {
        let err = Document::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, DomainError::Malformed(_)));
    }

    #[test]
    fn missing_old_doc_is_a_creation() {
        let new = Document::new(json!({"_id": "a"}));
        let write = DocumentWrite::create(&new);
        assert!(write.is_creation());
        assert_eq!(write.kind(), WriteKind::Create);
        assert!(!write.kind().modifies_existing());
    }

    #[test]
    fn tombstone_over_existing_doc_is_a_delete() {
        let old = Document::new(json!({"_id": "a", "_rev": "1-x"}));
        let new = Document::new(json!({"_id": "a", "_rev": "1-x", "_deleted": true}));
        let write = DocumentWrite::update(&new, &old);
        assert_eq!(write.kind(), WriteKind::Delete);
        assert!(write.kind().modifies_existing());
    }

    #[test]
    fn tombstone_without_prior_revision_is_still_a_creation() {
        let new = Document::new(json!({"_id": "a", "_deleted": true}));
        assert_eq!(DocumentWrite::create(&new).kind(), WriteKind::Create);
    }

    #[test]
    fn null_slots_are_absent() {
        let new = json!({"_id": "a"});
        let write = DocumentWrite::from_json(&new, &Value::Null);
        assert!(write.is_creation());

        let old = json!({"id": 1});
        let write = DocumentWrite::from_json(&Value::Null, &old);
        assert_eq!(write.kind(), WriteKind::Update);
        assert!(write.new_doc().is_none());
    }

    #[test]
    fn doc_id_falls_back_to_old_revision() {
        let new = Document::new(json!({"payload": 1}));
        let old = Document::new(json!({"_id": "stored"}));
        assert_eq!(DocumentWrite::update(&new, &old).doc_id(), Some("stored"));

        let new = Document::new(json!({"_id": "incoming"}));
        assert_eq!(DocumentWrite::update(&new, &old).doc_id(), Some("incoming"));
    }
}
