//! `getProfile`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{AvatarMode, ColorInfo};
use super::ApiResponse;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEmail {
    pub email: String,
    pub confirmed: bool,
    pub primary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub nick_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub emails: Vec<ProfileEmail>,
    #[serde(default)]
    pub color: ColorInfo,
    pub avatar_mode: AvatarMode,
    #[serde(default)]
    pub incomplete_steps: Vec<String>,
    #[serde(default)]
    pub member_id: Option<String>,
    pub registered_date: DateTime<Utc>,
    #[serde(default)]
    pub password_changed_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, rename = "cData")]
    pub c_data: HashMap<String, Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilePayload {
    pub profile: Profile,
}

pub type ProfileResponse = ApiResponse<ProfilePayload>;

impl ProfileResponse {
    pub fn profile(&self) -> &Profile {
        &self.payload.profile
    }
}
