//! Document models and the JSON document read-back wrapper.
//!
//! # Design
//! The editor stores a document as a JSON tree, but the RPCs carry that tree
//! as a *string*: `getJSONDocument` answers `{payload: {json: "<tree>"}}` and
//! the replace/append calls expect `content: "<node list>"`. The request types
//! here do the encoding; `JsonDocument` holds the decoded read side.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::Kind;
use super::ApiResponse;
use crate::document::Node;
use crate::error::{Result, VaizError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub kind: Option<Kind>,
    #[serde(default)]
    pub kind_id: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDocumentsRequest {
    pub kind: Kind,
    pub kind_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    pub kind: Kind,
    pub kind_id: String,
    pub title: String,
    /// Position among the scope's documents.
    pub index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditDocumentRequest {
    pub document_id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDocumentRequest {
    pub document_id: String,
}

/// Plain-text replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceDocumentRequest {
    pub document_id: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendDocumentRequest {
    pub document_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<Value>>,
}

/// Body of `replaceJSONDocument` and `appendJSONDocument`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonContentRequest {
    pub document_id: String,
    /// The node list, JSON-encoded.
    pub content: String,
}

impl JsonContentRequest {
    pub fn new(document_id: impl Into<String>, nodes: &[Node]) -> Result<Self> {
        let content = serde_json::to_string(nodes).map_err(|e| VaizError::Serialization(e.to_string()))?;
        Ok(Self {
            document_id: document_id.into(),
            content,
        })
    }

    /// Decode `content` back into nodes.
    pub fn nodes(&self) -> Result<Vec<Node>> {
        serde_json::from_str(&self.content).map_err(|e| VaizError::Deserialization(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentsPayload {
    pub documents: Vec<Document>,
}

pub type GetDocumentsResponse = ApiResponse<DocumentsPayload>;

impl GetDocumentsResponse {
    pub fn documents(&self) -> &[Document] {
        &self.payload.documents
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPayload {
    pub document: Document,
}

/// Returned by `createDocument` and `editDocument`.
pub type DocumentResponse = ApiResponse<DocumentPayload>;

impl DocumentResponse {
    pub fn document(&self) -> &Document {
        &self.payload.document
    }
}

/// `getJSONDocument` as sent by the server, before the inner decode.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawJsonDocumentResponse {
    #[serde(default)]
    pub payload: RawJsonDocumentPayload,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawJsonDocumentPayload {
    #[serde(default)]
    pub json: Option<String>,
}

/// A fetched document tree.
///
/// The editor wraps the top-level blocks as `{"default": {"type": "doc",
/// "content": [...]}}`. A document whose `payload.json` was missing or not
/// valid JSON reads back as an empty object with no blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonDocument {
    value: Value,
}

impl JsonDocument {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    pub fn empty() -> Self {
        Self {
            value: Value::Object(Default::default()),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.blocks().is_empty()
    }

    /// Top-level blocks in document order.
    pub fn blocks(&self) -> &[Value] {
        let root = self.value.get("default").unwrap_or(&self.value);
        root.get("content")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// `type` of each top-level block.
    pub fn block_types(&self) -> Vec<&str> {
        self.blocks()
            .iter()
            .filter_map(|b| b.get("type").and_then(Value::as_str))
            .collect()
    }

    /// Top-level blocks decoded as nodes.
    pub fn nodes(&self) -> Result<Vec<Node>> {
        self.blocks()
            .iter()
            .map(|b| Node::deserialize(b).map_err(|e| VaizError::Deserialization(e.to_string())))
            .collect()
    }

    /// Whether any text run in the tree contains `needle`, including the
    /// stringified payloads of envelope blocks.
    pub fn contains_text(&self, needle: &str) -> bool {
        value_contains_text(&self.value, needle)
    }
}

fn value_contains_text(value: &Value, needle: &str) -> bool {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(text)) = map.get("text") {
                if text.contains(needle) {
                    return true;
                }
            }
            map.values().any(|v| value_contains_text(v, needle))
        }
        Value::Array(items) => items.iter().any(|v| value_contains_text(v, needle)),
        _ => false,
    }
}
