//! Board models: `getBoards`, `getBoard`, and the board type, group and
//! custom field RPCs.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::custom_fields::SelectOption;
use super::enums::{Color, Icon};
use super::ApiResponse;
use crate::error::{Result, VaizError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardGroup {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Work-in-progress limit.
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub hidden: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardType {
    #[serde(rename = "_id")]
    pub id: String,
    pub label: String,
    pub icon: String,
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hidden: Option<bool>,
}

/// Wire names of custom field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomFieldType {
    Text,
    Number,
    Checkbox,
    Date,
    Member,
    TaskRelations,
    Select,
    Url,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardCustomField {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<Value>>,
    #[serde(default)]
    pub hidden: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub archiver: Option<String>,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleter: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub groups: Vec<BoardGroup>,
    #[serde(default)]
    pub types_list: Vec<BoardType>,
    #[serde(default)]
    pub custom_fields: Vec<BoardCustomField>,
    #[serde(default)]
    pub task_order_by_groups: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Board {
    pub fn group_named(&self, name: &str) -> Option<&BoardGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn custom_field(&self, id: &str) -> Option<&BoardCustomField> {
        self.custom_fields.iter().find(|f| f.id == id)
    }
}

impl BoardCustomField {
    /// The options of a select field, decoded. Fields without options yield
    /// an empty list.
    pub fn select_options(&self) -> Result<Vec<SelectOption>> {
        self.options
            .iter()
            .flatten()
            .map(|o| SelectOption::deserialize(o).map_err(|e| VaizError::Deserialization(e.to_string())))
            .collect()
    }
}

// -- board types --------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardTypeRequest {
    pub board_id: String,
    pub label: String,
    pub icon: Icon,
    pub color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateBoardTypeRequest {
    pub fn new(board_id: impl Into<String>, label: impl Into<String>, icon: Icon, color: Color) -> Self {
        Self {
            board_id: board_id.into(),
            label: label.into(),
            icon,
            color,
            description: None,
        }
    }
}

/// Partial update. Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditBoardTypeRequest {
    pub board_type_id: String,
    pub board_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

impl EditBoardTypeRequest {
    pub fn new(board_type_id: impl Into<String>, board_id: impl Into<String>) -> Self {
        Self {
            board_type_id: board_type_id.into(),
            board_id: board_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardTypePayload {
    pub board_type: BoardType,
}

/// Returned by `createBoardType` and `editBoardType`.
pub type BoardTypeResponse = ApiResponse<BoardTypePayload>;

impl BoardTypeResponse {
    pub fn board_type(&self) -> &BoardType {
        &self.payload.board_type
    }
}

// -- board groups -------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardGroupRequest {
    pub name: String,
    pub board_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditBoardGroupRequest {
    pub board_group_id: String,
    pub board_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardGroupsPayload {
    pub board_groups: Vec<BoardGroup>,
}

/// Returned by `createBoardGroup` and `editBoardGroup`: every group of the
/// board after the change.
pub type BoardGroupsResponse = ApiResponse<BoardGroupsPayload>;

impl BoardGroupsResponse {
    pub fn board_groups(&self) -> &[BoardGroup] {
        &self.payload.board_groups
    }
}

// -- custom fields ------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardCustomFieldRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: CustomFieldType,
    pub board_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
}

/// Partial update. `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditBoardCustomFieldRequest {
    pub field_id: String,
    pub board_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldPayload {
    pub custom_field: BoardCustomField,
}

/// Returned by `createBoardCustomField` and `editBoardCustomField`.
pub type CustomFieldResponse = ApiResponse<CustomFieldPayload>;

impl CustomFieldResponse {
    pub fn custom_field(&self) -> &BoardCustomField {
        &self.payload.custom_field
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBoardRequest {
    pub board_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardsPayload {
    pub boards: Vec<Board>,
}

pub type BoardsResponse = ApiResponse<BoardsPayload>;

impl BoardsResponse {
    pub fn boards(&self) -> &[Board] {
        &self.payload.boards
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardPayload {
    pub board: Board,
}

pub type BoardResponse = ApiResponse<BoardPayload>;

impl BoardResponse {
    pub fn board(&self) -> &Board {
        &self.payload.board
    }
}
