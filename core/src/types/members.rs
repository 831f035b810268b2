//! `getSpaceMembers`. Dates are kept as sent.

use serde::{Deserialize, Serialize};

use super::enums::{AvatarMode, ColorInfo};
use super::ApiResponse;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub nick_name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub avatar_mode: AvatarMode,
    #[serde(default)]
    pub color: ColorInfo,
    pub space: String,
    pub status: String,
    pub joined_date: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembersPayload {
    pub members: Vec<Member>,
}

pub type GetSpaceMembersResponse = ApiResponse<MembersPayload>;

impl GetSpaceMembersResponse {
    pub fn members(&self) -> &[Member] {
        &self.payload.members
    }
}
