//! `getHistory`: the activity log of a task, document or other entity.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::Kind;
use super::ApiResponse;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetHistoryRequest {
    pub kind: Kind,
    pub kind_id: String,
    /// Event keys to leave out, e.g. `TASK_COMMENTED`.
    pub exclude_keys: Vec<String>,
    /// Millisecond timestamp of the oldest entry already loaded; `0` starts
    /// from the newest.
    pub last_loaded_date: i64,
}

impl GetHistoryRequest {
    pub fn new(kind: Kind, kind_id: impl Into<String>) -> Self {
        Self {
            kind,
            kind_id: kind_id.into(),
            exclude_keys: Vec::new(),
            last_loaded_date: 0,
        }
    }
}

/// One history entry. `data` is event-specific and kept as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    #[serde(rename = "_id")]
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub kind: Option<Kind>,
    #[serde(default)]
    pub kind_id: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPayload {
    #[serde(default)]
    pub histories: Vec<History>,
}

pub type GetHistoryResponse = ApiResponse<HistoryPayload>;

impl GetHistoryResponse {
    pub fn histories(&self) -> &[History] {
        &self.payload.histories
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_body() {
        let request = GetHistoryRequest {
            exclude_keys: vec!["TASK_COMMENTED".into()],
            ..GetHistoryRequest::new(Kind::Task, "t1")
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"kind": "Task", "kindId": "t1", "excludeKeys": ["TASK_COMMENTED"], "lastLoadedDate": 0})
        );
    }

    #[test]
    fn entries_keep_event_data() {
        let raw = json!({"type": "GetHistory", "payload": {"histories": [
            {"_id": "h1", "key": "TASK_CREATED", "kind": "Task", "kindId": "t1",
             "data": {"name": "Ship"}, "createdAt": "2025-02-01T08:00:00.000Z"}
        ]}});
        let response: GetHistoryResponse = serde_json::from_value(raw).unwrap();
        let entry = &response.histories()[0];
        assert_eq!(entry.key, "TASK_CREATED");
        assert_eq!(entry.data["name"], "Ship");
        assert_eq!(entry.kind, Some(Kind::Task));
    }
}
