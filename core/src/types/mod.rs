//! Typed request and response models for the Vaiz RPC API.
//!
//! # Design
//! Field names follow Rust conventions and map to the wire with serde
//! `rename`/`rename_all` (`_id` becomes `id`, `createdAt` becomes
//! `created_at`). Timestamps parse to `DateTime<Utc>` only on endpoints
//! whose format is consistent (tasks, boards, comments, profile, projects);
//! milestones, spaces, members and documents keep the raw strings.
//!
//! Field and value helpers for board custom fields live in `custom_fields`
//! and are not re-exported at this level.
//!
//! Every successful response is `{type, payload}`. `ApiResponse<P>` models
//! that envelope and each area adds accessors on its own instantiation.

pub mod boards;
pub mod comments;
pub mod custom_fields;
pub mod documents;
pub mod enums;
pub mod history;
pub mod members;
pub mod milestones;
pub mod profile;
pub mod projects;
pub mod spaces;
pub mod tasks;
pub mod upload;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use boards::*;
pub use comments::*;
pub use custom_fields::{IsoDate, MemberValue, SelectOption};
pub use documents::*;
pub use enums::*;
pub use history::*;
pub use members::*;
pub use milestones::*;
pub use profile::*;
pub use projects::*;
pub use spaces::*;
pub use tasks::*;
pub use upload::*;

/// Success envelope shared by every RPC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<P> {
    /// Operation name echoed by the server, e.g. `GetTasks`.
    #[serde(rename = "type", default)]
    pub kind: String,
    pub payload: P,
}

/// Envelope for RPCs whose payload carries nothing the client reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptyResponse {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}
