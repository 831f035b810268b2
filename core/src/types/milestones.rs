//! Milestone models: `getMilestones`, `createMilestone`.
//!
//! Milestone timestamps are left as the strings the server sends.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ApiResponse;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_start: Option<String>,
    #[serde(default)]
    pub due_end: Option<String>,
    #[serde(default)]
    pub archiver: Option<String>,
    #[serde(default)]
    pub archived_at: Option<String>,
    pub project: String,
    #[serde(default)]
    pub followers: HashMap<String, String>,
    pub board: String,
    pub document: String,
    pub total: u32,
    pub completed: u32,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub deleter: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
    pub creator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMilestoneRequest {
    pub name: String,
    pub board: String,
    pub project: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestonesPayload {
    pub milestones: Vec<Milestone>,
}

pub type MilestonesResponse = ApiResponse<MilestonesPayload>;

impl MilestonesResponse {
    pub fn milestones(&self) -> &[Milestone] {
        &self.payload.milestones
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestonePayload {
    pub milestone: Milestone,
}

pub type MilestoneResponse = ApiResponse<MilestonePayload>;

impl MilestoneResponse {
    pub fn milestone(&self) -> &Milestone {
        &self.payload.milestone
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn timestamps_stay_strings() {
        let raw = json!({
            "_id": "m1", "name": "v1", "description": "", "project": "p", "board": "b",
            "document": "d", "total": 0, "completed": 0, "creator": "u",
            "createdAt": "2025-01-01T00:00:00.000Z", "updatedAt": "not-a-date"
        });
        let milestone: Milestone = serde_json::from_value(raw).unwrap();
        assert_eq!(milestone.updated_at, "not-a-date");
    }
}
