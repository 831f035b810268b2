//! `uploadFile` models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ApiResponse;

/// Category the server files an upload under. Sent as the multipart `type`
/// field and echoed back on the stored file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UploadFileType {
    Image,
    File,
    Video,
    #[default]
    Pdf,
}

impl UploadFileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadFileType::Image => "Image",
            UploadFileType::File => "File",
            UploadFileType::Video => "Video",
            UploadFileType::Pdf => "Pdf",
        }
    }
}

/// A file stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    #[serde(rename = "_id")]
    pub id: String,
    pub url: String,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: UploadFileType,
    pub ext: String,
    pub size: u64,
    pub mime: String,
    pub original_name: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub access_kind: Option<String>,
    #[serde(default)]
    pub access_kind_id: Option<String>,
    /// `[width, height]` for images.
    #[serde(default)]
    pub dimension: Vec<u32>,
    #[serde(default)]
    pub dominant_color: Option<Value>,
}

impl UploadedFile {
    /// `(width, height)` when the server measured the file.
    pub fn dimensions(&self) -> Option<[u32; 2]> {
        match self.dimension.as_slice() {
            [w, h, ..] => Some([*w, *h]),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadFilePayload {
    pub file: UploadedFile,
}

pub type UploadFileResponse = ApiResponse<UploadFilePayload>;

impl UploadFileResponse {
    pub fn file(&self) -> &UploadedFile {
        &self.payload.file
    }
}
