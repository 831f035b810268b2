//! `getSpace`. Timestamps are kept as sent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::{AvatarMode, ColorInfo};
use super::ApiResponse;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: ColorInfo,
    pub avatar_mode: AvatarMode,
    #[serde(default)]
    pub avatar: Option<String>,
    /// A user id, or the expanded user object.
    pub creator: Value,
    pub plan: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub is_foreign: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSpaceRequest {
    pub space_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacePayload {
    pub space: Space,
}

pub type GetSpaceResponse = ApiResponse<SpacePayload>;

impl GetSpaceResponse {
    pub fn space(&self) -> &Space {
        &self.payload.space
    }
}
