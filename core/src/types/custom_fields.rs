//! Helpers for board custom fields and the values tasks store in them.
//!
//! # Design
//! Field definitions are created and edited with `createBoardCustomField`
//! and `editBoardCustomField`; the constructors here fill in those requests
//! for each field type. Select options are edited by sending the complete
//! option list, so the option helpers take the field's current options and
//! return the request carrying the new list.
//!
//! Task values travel in `CustomField {id, value}` entries on
//! `createTask`/`editTask`. Text, number, checkbox and URL values are
//! strings on the wire; dates are ISO 8601 strings; date ranges are
//! `{start, end}`; relations are id lists; members are a bare id or a list.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use super::boards::{CreateBoardCustomFieldRequest, CustomFieldType, EditBoardCustomFieldRequest};
use super::enums::{Color, Icon};
use super::tasks::CustomField;
use crate::error::{Result, VaizError};

const OPTION_ID_LEN: usize = 24;

/// One choice of a select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub color: Color,
    pub icon: Icon,
}

impl SelectOption {
    /// An option whose id is derived from `title`, so building the same
    /// option twice yields the same id.
    pub fn new(title: impl Into<String>, color: Color, icon: Icon) -> Self {
        let title = title.into();
        let digest = hex::encode(Sha256::digest(title.as_bytes()));
        Self {
            id: digest[..OPTION_ID_LEN].to_string(),
            title,
            color,
            icon,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

// -- field definitions --------------------------------------------------------

impl CreateBoardCustomFieldRequest {
    pub fn new(name: impl Into<String>, field_type: CustomFieldType, board_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type,
            board_id: board_id.into(),
            description: None,
            hidden: false,
            options: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

pub fn text_field(name: impl Into<String>, board_id: impl Into<String>) -> CreateBoardCustomFieldRequest {
    CreateBoardCustomFieldRequest::new(name, CustomFieldType::Text, board_id)
}

pub fn number_field(name: impl Into<String>, board_id: impl Into<String>) -> CreateBoardCustomFieldRequest {
    CreateBoardCustomFieldRequest::new(name, CustomFieldType::Number, board_id)
}

pub fn checkbox_field(name: impl Into<String>, board_id: impl Into<String>) -> CreateBoardCustomFieldRequest {
    CreateBoardCustomFieldRequest::new(name, CustomFieldType::Checkbox, board_id)
}

pub fn date_field(name: impl Into<String>, board_id: impl Into<String>) -> CreateBoardCustomFieldRequest {
    CreateBoardCustomFieldRequest::new(name, CustomFieldType::Date, board_id)
}

pub fn member_field(name: impl Into<String>, board_id: impl Into<String>) -> CreateBoardCustomFieldRequest {
    CreateBoardCustomFieldRequest::new(name, CustomFieldType::Member, board_id)
}

pub fn task_relations_field(name: impl Into<String>, board_id: impl Into<String>) -> CreateBoardCustomFieldRequest {
    CreateBoardCustomFieldRequest::new(name, CustomFieldType::TaskRelations, board_id)
}

pub fn url_field(name: impl Into<String>, board_id: impl Into<String>) -> CreateBoardCustomFieldRequest {
    CreateBoardCustomFieldRequest::new(name, CustomFieldType::Url, board_id)
}

pub fn select_field(
    name: impl Into<String>,
    board_id: impl Into<String>,
    options: impl IntoIterator<Item = SelectOption>,
) -> CreateBoardCustomFieldRequest {
    CreateBoardCustomFieldRequest {
        options: Some(options.into_iter().collect()),
        ..CreateBoardCustomFieldRequest::new(name, CustomFieldType::Select, board_id)
    }
}

// -- field edits --------------------------------------------------------------

impl EditBoardCustomFieldRequest {
    /// An edit that changes nothing yet. Chain the setters for a combined
    /// edit.
    pub fn new(field_id: impl Into<String>, board_id: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            board_id: board_id.into(),
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// `None` clears the description.
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = Some(hidden);
        self
    }

    pub fn options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = Some(options);
        self
    }
}

pub fn rename_field(field_id: &str, board_id: &str, name: impl Into<String>) -> EditBoardCustomFieldRequest {
    EditBoardCustomFieldRequest::new(field_id, board_id).name(name)
}

pub fn describe_field(field_id: &str, board_id: &str, description: Option<String>) -> EditBoardCustomFieldRequest {
    EditBoardCustomFieldRequest::new(field_id, board_id).description(description)
}

pub fn set_field_hidden(field_id: &str, board_id: &str, hidden: bool) -> EditBoardCustomFieldRequest {
    EditBoardCustomFieldRequest::new(field_id, board_id).hidden(hidden)
}

/// Append `option` to `existing`.
pub fn add_select_option(
    field_id: &str,
    board_id: &str,
    existing: &[SelectOption],
    option: SelectOption,
) -> EditBoardCustomFieldRequest {
    let mut options = existing.to_vec();
    options.push(option);
    EditBoardCustomFieldRequest::new(field_id, board_id).options(options)
}

/// Drop the option with `option_id` from `existing`.
pub fn remove_select_option(
    field_id: &str,
    board_id: &str,
    existing: &[SelectOption],
    option_id: &str,
) -> Result<EditBoardCustomFieldRequest> {
    let options: Vec<SelectOption> = existing.iter().filter(|o| o.id != option_id).cloned().collect();
    if options.len() == existing.len() {
        return Err(unknown_option(option_id));
    }
    Ok(EditBoardCustomFieldRequest::new(field_id, board_id).options(options))
}

/// Replace the option with `option_id` by `updated`, keeping its id and its
/// position.
pub fn edit_select_option(
    field_id: &str,
    board_id: &str,
    existing: &[SelectOption],
    option_id: &str,
    updated: SelectOption,
) -> Result<EditBoardCustomFieldRequest> {
    let position = existing
        .iter()
        .position(|o| o.id == option_id)
        .ok_or_else(|| unknown_option(option_id))?;
    let mut options = existing.to_vec();
    options[position] = updated.with_id(option_id);
    Ok(EditBoardCustomFieldRequest::new(field_id, board_id).options(options))
}

fn unknown_option(option_id: &str) -> VaizError {
    VaizError::InvalidArgument(format!("option {option_id} not found in existing options"))
}

// -- task values --------------------------------------------------------------

impl CustomField {
    pub fn new(id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

pub fn text_value(text: impl Into<String>) -> Value {
    Value::String(text.into())
}

pub fn number_value(number: impl std::fmt::Display) -> Value {
    Value::String(number.to_string())
}

pub fn checkbox_value(checked: bool) -> Value {
    Value::String(if checked { "true" } else { "false" }.to_string())
}

pub fn url_value(url: impl Into<String>) -> Value {
    Value::String(url.into())
}

/// A date accepted by date fields.
pub trait IsoDate {
    fn to_iso(&self) -> String;
}

impl IsoDate for DateTime<Utc> {
    fn to_iso(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl IsoDate for NaiveDateTime {
    fn to_iso(&self) -> String {
        self.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

impl IsoDate for NaiveDate {
    fn to_iso(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }
}

/// Already formatted; sent as given.
impl IsoDate for &str {
    fn to_iso(&self) -> String {
        self.to_string()
    }
}

pub fn date_value(date: impl IsoDate) -> Value {
    Value::String(date.to_iso())
}

pub fn date_range_value(start: impl IsoDate, end: impl IsoDate) -> Value {
    json!({"start": start.to_iso(), "end": end.to_iso()})
}

/// Related task ids. Adding an id already present is a no-op.
pub fn add_task_relation(current: &[String], task_id: &str) -> Vec<String> {
    let mut relations = current.to_vec();
    if !relations.iter().any(|id| id == task_id) {
        relations.push(task_id.to_string());
    }
    relations
}

pub fn remove_task_relation(current: &[String], task_id: &str) -> Vec<String> {
    current.iter().filter(|id| *id != task_id).cloned().collect()
}

/// Value of a member field: the server stores one member as a bare id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemberValue {
    One(String),
    Many(Vec<String>),
}

impl MemberValue {
    pub fn ids(&self) -> Vec<&str> {
        match self {
            MemberValue::One(id) => vec![id.as_str()],
            MemberValue::Many(ids) => ids.iter().map(String::as_str).collect(),
        }
    }

    /// Add `member_id`, always producing a list.
    pub fn with_member(&self, member_id: &str) -> MemberValue {
        let mut ids: Vec<String> = self.ids().into_iter().map(str::to_string).collect();
        if !ids.iter().any(|id| id == member_id) {
            ids.push(member_id.to_string());
        }
        MemberValue::Many(ids)
    }

    /// Remove `member_id`. No members left is an empty list; exactly one
    /// left from a list collapses to a bare id.
    pub fn without_member(&self, member_id: &str) -> MemberValue {
        match self {
            MemberValue::One(id) if id == member_id => MemberValue::Many(Vec::new()),
            MemberValue::One(_) => self.clone(),
            MemberValue::Many(ids) => {
                let mut rest: Vec<String> = ids.iter().filter(|id| *id != member_id).cloned().collect();
                if rest.len() == 1 {
                    MemberValue::One(rest.remove(0))
                } else {
                    MemberValue::Many(rest)
                }
            }
        }
    }
}

impl From<MemberValue> for Value {
    fn from(value: MemberValue) -> Value {
        match value {
            MemberValue::One(id) => Value::String(id),
            MemberValue::Many(ids) => Value::from(ids),
        }
    }
}
