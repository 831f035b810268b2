//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `VaizClient` builds `HttpRequest`
//! values and parses `HttpResponse` values without touching the network; a
//! `Transport` (see `session`) or any other host executes the round-trip.
//!
//! JSON RPC bodies are UTF-8 bytes. An upload carries a `MultipartBody`
//! instead: a description of the form whose file part names a path on disk,
//! so the transport can stream the file rather than hold it in memory.

use std::path::PathBuf;

/// HTTP method for a request. Every Vaiz RPC is a `POST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `path` is the absolute URL, e.g. `https://api.vaiz.com/v4/getJSONDocument`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    /// Set instead of `body` for `multipart/form-data` requests.
    pub multipart: Option<MultipartBody>,
}

/// A `multipart/form-data` body described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBody {
    pub text_fields: Vec<(String, String)>,
    pub file: FilePart,
}

impl MultipartBody {
    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.text_fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// The file part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name.
    pub field: String,
    pub path: PathBuf,
    /// File name sent in `Content-Disposition`.
    pub file_name: String,
    pub content_type: String,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The body as text, for logging. Non-UTF-8 bytes are replaced and a
    /// multipart body is summarised rather than read from disk.
    pub fn body_text(&self) -> String {
        if let Some(form) = &self.multipart {
            let fields: Vec<String> = form.text_fields.iter().map(|(k, v)| format!("{k}={v}")).collect();
            return format!(
                "multipart {}={} ({}) {}",
                form.file.field,
                form.file.file_name,
                form.file.content_type,
                fields.join(" ")
            );
        }
        self.body
            .as_deref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .unwrap_or_default()
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
