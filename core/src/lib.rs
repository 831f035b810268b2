//! Client SDK for the Vaiz project-management API.
//!
//! # Overview
//! - `document`: builders for the editor's rich-text JSON (headings, lists,
//!   tables, mentions, embeds, checklists) and an opt-in validator.
//! - `types`: typed request and response models for every RPC.
//! - `client`: `VaizClient`, which builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network.
//! - `session`: `Session`, which runs those requests over a `Transport`
//!   (blocking `ureq` by default).
//!
//! # Design
//! - The core is host-does-IO: every RPC is a `build_*`/`parse_*` pair, so
//!   the wire contract is testable from plain data (see `test-vectors/`).
//! - Document nodes are a sum type, one variant per wire `type`. Blocks the
//!   server stores as stringified JSON keep a typed payload that is encoded
//!   only at serialisation time.
//! - Errors carry the server's code, fields and description.

pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod http;
pub mod session;
pub mod types;

pub use client::VaizClient;
pub use config::ClientConfig;
pub use document::{Content, Node};
pub use error::{Result, ServerError, VaizError};
pub use http::{FilePart, HttpMethod, HttpRequest, HttpResponse, MultipartBody};
pub use session::{Session, Transport, UreqTransport};
