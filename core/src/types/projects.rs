//! `getProjects`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ApiResponse;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub creator: String,
    #[serde(default)]
    pub archiver: Option<String>,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub team: Vec<String>,
    /// Palette name or hex string.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub space: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectsPayload {
    pub projects: Vec<Project>,
}

pub type ProjectsResponse = ApiResponse<ProjectsPayload>;

impl ProjectsResponse {
    pub fn projects(&self) -> &[Project] {
        &self.payload.projects
    }
}
