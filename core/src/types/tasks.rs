//! Task models: `createTask`, `editTask`, `getTask`, `getTasks`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::upload::{UploadFileType, UploadedFile};
use super::ApiResponse;

/// Page size used by `getTasks` and by paginated fetches.
pub const TASKS_PAGE_SIZE: u32 = 50;

/// Upper bound accepted by `Session::get_all_tasks`.
pub const MAX_ALL_TASKS: usize = 10_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum TaskPriority {
    Low = 0,
    #[default]
    General = 1,
    Medium = 2,
    High = 3,
}

impl From<TaskPriority> for u8 {
    fn from(priority: TaskPriority) -> u8 {
        priority as u8
    }
}

impl TryFrom<u8> for TaskPriority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TaskPriority::Low),
            1 => Ok(TaskPriority::General),
            2 => Ok(TaskPriority::Medium),
            3 => Ok(TaskPriority::High),
            other => Err(format!("unknown task priority {other}")),
        }
    }
}

/// Custom field value sent with a task request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    pub id: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCustomField {
    pub id: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub group: String,
    pub board: String,
    pub project: String,
    #[serde(default)]
    pub parent_task: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    pub priority: TaskPriority,
    pub hrid: String,
    #[serde(default)]
    pub followers: HashMap<String, String>,
    pub completed: bool,
    #[serde(default)]
    pub assignees: Vec<String>,
    #[serde(default)]
    pub subtasks: Vec<String>,
    #[serde(default)]
    pub milestones: Vec<String>,
    #[serde(default)]
    pub milestone: Option<String>,
    #[serde(default)]
    pub due_start: Option<String>,
    #[serde(default)]
    pub due_end: Option<String>,
    #[serde(default)]
    pub right_connectors: Vec<String>,
    #[serde(default)]
    pub left_connectors: Vec<String>,
    #[serde(default)]
    pub custom_fields: Vec<TaskCustomField>,
    #[serde(default)]
    pub archiver: Option<String>,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleter: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub editor: Option<String>,
    pub creator: String,
    /// Id of the task's description document.
    pub document: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub name: String,
    pub group: String,
    pub board: String,
    pub project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_task: Option<String>,
    pub types: Vec<String>,
    pub priority: TaskPriority,
    pub completed: bool,
    pub assignees: Vec<String>,
    pub subtasks: Vec<String>,
    pub milestones: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_end: Option<String>,
    pub right_connectors: Vec<String>,
    pub left_connectors: Vec<String>,
    pub custom_fields: Vec<CustomField>,
    /// Plain-text description stored in the task's document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<TaskFile>,
}

/// An uploaded file attached to a task at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFile {
    #[serde(rename = "_id")]
    pub id: String,
    pub url: String,
    pub name: String,
    pub ext: String,
    #[serde(rename = "type")]
    pub file_type: UploadFileType,
    pub size: u64,
    #[serde(default)]
    pub dimension: Vec<u32>,
}

impl From<&UploadedFile> for TaskFile {
    fn from(file: &UploadedFile) -> Self {
        Self {
            id: file.id.clone(),
            url: file.url.clone(),
            name: file.name.clone(),
            ext: file.ext.clone(),
            file_type: file.file_type,
            size: file.size,
            dimension: file.dimension.clone(),
        }
    }
}

impl CreateTaskRequest {
    pub fn new(
        name: impl Into<String>,
        group: impl Into<String>,
        board: impl Into<String>,
        project: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            board: board.into(),
            project: project.into(),
            ..Default::default()
        }
    }
}

/// Partial update. Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTaskRequest {
    pub task_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_task: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestones: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_connectors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_connectors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<CustomField>>,
}

impl EditTaskRequest {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            ..Default::default()
        }
    }
}

/// Filters for `getTasks`. Unset filters are omitted from the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTasksRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_task: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestones: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
}

impl GetTasksRequest {
    /// Same filters, positioned at page `page` of `TASKS_PAGE_SIZE` tasks.
    pub fn page(&self, page: u32) -> Self {
        Self {
            limit: Some(TASKS_PAGE_SIZE),
            skip: Some(page * TASKS_PAGE_SIZE),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPayload {
    pub task: Task,
}

pub type TaskResponse = ApiResponse<TaskPayload>;

impl TaskResponse {
    pub fn task(&self) -> &Task {
        &self.payload.task
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetTasksPayload {
    pub tasks: Vec<Task>,
}

pub type GetTasksResponse = ApiResponse<GetTasksPayload>;

impl GetTasksResponse {
    pub fn tasks(&self) -> &[Task] {
        &self.payload.tasks
    }
}
