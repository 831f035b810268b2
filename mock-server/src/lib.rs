//! In-memory stand-in for the Vaiz RPC API.
//!
//! # Design
//! Every operation is `POST /{endpoint}` with a JSON body and answers with
//! `{type, payload}`, or with `{error: {code, fields, originalType, meta}}`
//! and a 4xx status. Only the endpoints the client's integration tests drive
//! are emulated: documents (plain and JSON content), tasks, comments, the
//! profile and multipart uploads.
//!
//! Requests must carry `Authorization: Bearer <key>` with the key the router
//! was built for (`API_KEY` for `app()`); anything else is `JwtIncorrect`.
//!
//! Document bodies are stored as a list of block nodes and served back from
//! `getJSONDocument` as the string-encoded `{"default": {"type": "doc",
//! "content": [...]}}` the real server produces.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Multipart, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Bearer token accepted by `app()`.
pub const API_KEY: &str = "test-key";

/// Tasks returned per `getTasks` call at most.
pub const MAX_PAGE: usize = 50;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub kind: String,
    pub kind_id: String,
    pub size: u64,
    pub creator: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub group: String,
    pub board: String,
    pub project: String,
    pub parent_task: Option<String>,
    pub types: Vec<String>,
    pub priority: u8,
    pub hrid: String,
    pub followers: HashMap<String, String>,
    pub completed: bool,
    pub assignees: Vec<String>,
    pub subtasks: Vec<String>,
    pub milestones: Vec<String>,
    pub due_start: Option<String>,
    pub due_end: Option<String>,
    pub right_connectors: Vec<String>,
    pub left_connectors: Vec<String>,
    pub custom_fields: Vec<Value>,
    pub archived_at: Option<DateTime<Utc>>,
    pub creator: String,
    pub document: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    pub document_id: String,
    pub author_id: String,
    pub content: String,
    pub files: Vec<Value>,
    pub reactions: Vec<Value>,
    pub reply_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub has_removed_files: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    #[serde(rename = "_id")]
    pub id: String,
    pub url: String,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub ext: String,
    pub size: u64,
    pub mime: String,
    pub original_name: String,
    pub date: DateTime<Utc>,
    pub owner: String,
    pub dimension: Vec<u32>,
}

#[derive(Clone, Debug)]
struct StoredDocument {
    meta: Document,
    blocks: Vec<Value>,
}

#[derive(Default)]
pub struct Store {
    documents: HashMap<String, StoredDocument>,
    tasks: Vec<Task>,
    comments: Vec<Comment>,
    files: Vec<StoredFile>,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    api_key: Arc<str>,
}

const MEMBER_ID: &str = "member-1";

// --- errors ---

/// A server error envelope with its HTTP status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    fields: Vec<String>,
    description: String,
}

impl ApiError {
    fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            code: "JwtIncorrect",
            fields: Vec::new(),
            description: "Token is incorrect".to_string(),
        }
    }

    fn not_found(what: &str, id: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: "NotFound",
            fields: Vec::new(),
            description: format!("{what} {id} not found"),
        }
    }

    fn validation(field: &str, description: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "ValidationError",
            fields: vec![field.to_string()],
            description: description.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "code": self.code,
                "fields": self.fields,
                "originalType": self.code,
                "meta": {"description": self.description},
            }
        });
        (self.status, Json(body)).into_response()
    }
}

type ApiResult = Result<Json<Value>, ApiError>;

fn ok(kind: &str, payload: Value) -> ApiResult {
    Ok(Json(json!({"type": kind, "payload": payload})))
}

// --- router ---

pub fn app() -> Router {
    app_with_key(API_KEY)
}

/// Router that accepts only `api_key` as bearer token.
pub fn app_with_key(api_key: &str) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Store::default())),
        api_key: Arc::from(api_key),
    };
    Router::new()
        .route("/createDocument", post(create_document))
        .route("/getDocuments", post(get_documents))
        .route("/editDocument", post(edit_document))
        .route("/getJSONDocument", post(get_json_document))
        .route("/replaceJSONDocument", post(replace_json_document))
        .route("/appendJSONDocument", post(append_json_document))
        .route("/replaceDocument", post(replace_document))
        .route("/appendDocument", post(append_document))
        .route("/createTask", post(create_task))
        .route("/editTask", post(edit_task))
        .route("/getTask", post(get_task))
        .route("/getTasks", post(get_tasks))
        .route("/postComment", post(post_comment))
        .route("/getComments", post(get_comments))
        .route("/editComment", post(edit_comment))
        .route("/deleteComment", post(delete_comment))
        .route("/getProfile", post(get_profile))
        .route("/UploadFile", post(upload_file))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_auth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if token != Some(&*state.api_key) {
        tracing::debug!(path = %request.uri().path(), "rejecting bad token");
        return ApiError::unauthorized().into_response();
    }
    next.run(request).await
}

fn now_string() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// One paragraph per non-blank line.
fn paragraphs(text: &str) -> Vec<Value> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| json!({"type": "paragraph", "content": [{"type": "text", "text": line}]}))
        .collect()
}

impl Store {
    fn insert_document(&mut self, kind: &str, kind_id: &str, title: &str, blocks: Vec<Value>) -> Document {
        let now = now_string();
        let mut stored = StoredDocument {
            meta: Document {
                id: new_id(),
                title: title.to_string(),
                kind: kind.to_string(),
                kind_id: kind_id.to_string(),
                size: 0,
                creator: MEMBER_ID.to_string(),
                created_at: now.clone(),
                updated_at: now,
            },
            blocks,
        };
        stored.meta.size = content_size(&stored.blocks);
        let meta = stored.meta.clone();
        self.documents.insert(meta.id.clone(), stored);
        meta
    }

    fn document_mut(&mut self, id: &str) -> Result<&mut StoredDocument, ApiError> {
        self.documents
            .get_mut(id)
            .ok_or_else(|| ApiError::not_found("Document", id))
    }

    fn task_index(&self, id: &str) -> Result<usize, ApiError> {
        self.tasks
            .iter()
            .position(|t| t.id == id || t.hrid == id)
            .ok_or_else(|| ApiError::not_found("Task", id))
    }

    fn comment_mut(&mut self, id: &str) -> Result<&mut Comment, ApiError> {
        self.comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ApiError::not_found("Comment", id))
    }
}

impl StoredDocument {
    fn set_blocks(&mut self, blocks: Vec<Value>) {
        self.blocks = blocks;
        self.touch();
    }

    fn extend_blocks(&mut self, blocks: Vec<Value>) {
        self.blocks.extend(blocks);
        self.touch();
    }

    fn touch(&mut self) {
        self.meta.size = content_size(&self.blocks);
        self.meta.updated_at = now_string();
    }
}

fn content_size(blocks: &[Value]) -> u64 {
    serde_json::to_vec(blocks).map(|v| v.len() as u64).unwrap_or(0)
}

// --- documents ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocument {
    pub kind: String,
    pub kind_id: String,
    pub title: String,
    #[serde(default)]
    pub index: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDocuments {
    pub kind: String,
    pub kind_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditDocument {
    pub document_id: String,
    pub title: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRef {
    pub document_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonContent {
    pub document_id: String,
    pub content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceDocument {
    pub document_id: String,
    pub description: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendDocument {
    pub document_id: String,
    pub description: Option<String>,
    #[serde(default)]
    pub files: Vec<Value>,
}

async fn create_document(State(state): State<AppState>, Json(input): Json<CreateDocument>) -> ApiResult {
    if input.title.trim().is_empty() {
        return Err(ApiError::validation("title", "title must not be empty"));
    }
    let document = state
        .db
        .write()
        .await
        .insert_document(&input.kind, &input.kind_id, &input.title, Vec::new());
    tracing::debug!(id = %document.id, index = input.index, "document created");
    ok("CreateDocument", json!({"document": document}))
}

async fn get_documents(State(state): State<AppState>, Json(input): Json<GetDocuments>) -> ApiResult {
    let store = state.db.read().await;
    let mut documents: Vec<&Document> = store
        .documents
        .values()
        .map(|d| &d.meta)
        .filter(|d| d.kind == input.kind && d.kind_id == input.kind_id)
        .collect();
    documents.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    ok("GetDocuments", json!({"documents": documents}))
}

async fn edit_document(State(state): State<AppState>, Json(input): Json<EditDocument>) -> ApiResult {
    let mut store = state.db.write().await;
    let document = store.document_mut(&input.document_id)?;
    document.meta.title = input.title;
    document.touch();
    ok("EditDocument", json!({"document": document.meta}))
}

async fn get_json_document(State(state): State<AppState>, Json(input): Json<DocumentRef>) -> ApiResult {
    let store = state.db.read().await;
    let document = store
        .documents
        .get(&input.document_id)
        .ok_or_else(|| ApiError::not_found("Document", &input.document_id))?;
    let doc = json!({"default": {"type": "doc", "content": document.blocks}});
    ok("GetJSONDocument", json!({"json": doc.to_string()}))
}

fn parse_content(content: &str) -> Result<Vec<Value>, ApiError> {
    serde_json::from_str(content).map_err(|e| ApiError::validation("content", format!("content is not a node list: {e}")))
}

async fn replace_json_document(State(state): State<AppState>, Json(input): Json<JsonContent>) -> ApiResult {
    let blocks = parse_content(&input.content)?;
    let mut store = state.db.write().await;
    store.document_mut(&input.document_id)?.set_blocks(blocks);
    ok("ReplaceJSONDocument", json!({}))
}

async fn append_json_document(State(state): State<AppState>, Json(input): Json<JsonContent>) -> ApiResult {
    let blocks = parse_content(&input.content)?;
    let mut store = state.db.write().await;
    store.document_mut(&input.document_id)?.extend_blocks(blocks);
    ok("AppendJSONDocument", json!({}))
}

async fn replace_document(State(state): State<AppState>, Json(input): Json<ReplaceDocument>) -> ApiResult {
    let mut store = state.db.write().await;
    store
        .document_mut(&input.document_id)?
        .set_blocks(paragraphs(&input.description));
    ok("ReplaceDocument", json!({}))
}

async fn append_document(State(state): State<AppState>, Json(input): Json<AppendDocument>) -> ApiResult {
    let mut store = state.db.write().await;
    let document = store.document_mut(&input.document_id)?;
    let mut blocks = paragraphs(input.description.as_deref().unwrap_or_default());
    if !input.files.is_empty() {
        blocks.push(json!({"type": "files", "attrs": {"uid": new_id(), "custom": 1, "contenteditable": "false"}, "content": []}));
    }
    document.extend_blocks(blocks);
    ok("AppendDocument", json!({}))
}

// --- tasks ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub name: String,
    pub group: String,
    pub board: String,
    pub project: String,
    pub parent_task: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub assignees: Vec<String>,
    #[serde(default)]
    pub subtasks: Vec<String>,
    #[serde(default)]
    pub milestones: Vec<String>,
    pub due_start: Option<String>,
    pub due_end: Option<String>,
    #[serde(default)]
    pub right_connectors: Vec<String>,
    #[serde(default)]
    pub left_connectors: Vec<String>,
    #[serde(default)]
    pub custom_fields: Vec<Value>,
    pub description: Option<String>,
    #[serde(default)]
    pub files: Vec<Value>,
}

fn default_priority() -> u8 {
    1
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTask {
    pub task_id: String,
    pub name: Option<String>,
    pub parent_task: Option<String>,
    pub types: Option<Vec<String>>,
    pub priority: Option<u8>,
    pub completed: Option<bool>,
    pub assignees: Option<Vec<String>>,
    pub subtasks: Option<Vec<String>>,
    pub milestones: Option<Vec<String>>,
    pub due_start: Option<String>,
    pub due_end: Option<String>,
    pub custom_fields: Option<Vec<Value>>,
}

#[derive(Deserialize)]
pub struct GetTask {
    pub slug: String,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetTasks {
    pub ids: Option<Vec<String>>,
    pub board: Option<String>,
    pub project: Option<String>,
    pub assignees: Option<Vec<String>>,
    pub parent_task: Option<String>,
    pub milestones: Option<Vec<String>>,
    pub completed: Option<bool>,
    pub archived: Option<bool>,
    pub limit: Option<usize>,
    pub skip: Option<usize>,
}

impl GetTasks {
    fn matches(&self, task: &Task) -> bool {
        let overlaps = |wanted: &Option<Vec<String>>, have: &[String]| {
            wanted.as_ref().map_or(true, |w| w.iter().any(|x| have.contains(x)))
        };
        self.ids.as_ref().map_or(true, |ids| ids.contains(&task.id))
            && self.board.as_ref().map_or(true, |b| *b == task.board)
            && self.project.as_ref().map_or(true, |p| *p == task.project)
            && self.parent_task.as_ref().map_or(true, |p| task.parent_task.as_ref() == Some(p))
            && self.completed.map_or(true, |c| c == task.completed)
            && self.archived.map_or(true, |a| a == task.archived_at.is_some())
            && overlaps(&self.assignees, &task.assignees)
            && overlaps(&self.milestones, &task.milestones)
    }
}

async fn create_task(State(state): State<AppState>, Json(input): Json<CreateTask>) -> ApiResult {
    if input.name.trim().is_empty() {
        return Err(ApiError::validation("name", "name must not be empty"));
    }
    if input.priority > 3 {
        return Err(ApiError::validation("priority", "priority must be 0..=3"));
    }
    let mut store = state.db.write().await;
    let id = new_id();
    let mut blocks = paragraphs(input.description.as_deref().unwrap_or_default());
    for file in &input.files {
        let name = file.get("name").and_then(Value::as_str).unwrap_or("file");
        blocks.push(json!({"type": "paragraph", "content": [{"type": "text", "text": name}]}));
    }
    let document = store.insert_document("Task", &id, &input.name, blocks);
    let now = Utc::now();
    let task = Task {
        hrid: format!("TSK-{}", store.tasks.len() + 1),
        id,
        name: input.name,
        group: input.group,
        board: input.board,
        project: input.project,
        parent_task: input.parent_task,
        types: input.types,
        priority: input.priority,
        followers: HashMap::from([(MEMBER_ID.to_string(), "creator".to_string())]),
        completed: input.completed,
        assignees: input.assignees,
        subtasks: input.subtasks,
        milestones: input.milestones,
        due_start: input.due_start,
        due_end: input.due_end,
        right_connectors: input.right_connectors,
        left_connectors: input.left_connectors,
        custom_fields: input.custom_fields,
        archived_at: None,
        creator: MEMBER_ID.to_string(),
        document: document.id,
        created_at: now,
        updated_at: now,
    };
    tracing::debug!(id = %task.id, hrid = %task.hrid, "task created");
    store.tasks.push(task.clone());
    ok("CreateTask", json!({"task": task}))
}

async fn edit_task(State(state): State<AppState>, Json(input): Json<EditTask>) -> ApiResult {
    let mut store = state.db.write().await;
    let index = store.task_index(&input.task_id)?;
    let task = &mut store.tasks[index];
    if let Some(priority) = input.priority {
        if priority > 3 {
            return Err(ApiError::validation("priority", "priority must be 0..=3"));
        }
        task.priority = priority;
    }
    if let Some(name) = input.name {
        task.name = name;
    }
    if input.parent_task.is_some() {
        task.parent_task = input.parent_task;
    }
    if let Some(types) = input.types {
        task.types = types;
    }
    if let Some(completed) = input.completed {
        task.completed = completed;
    }
    if let Some(assignees) = input.assignees {
        task.assignees = assignees;
    }
    if let Some(subtasks) = input.subtasks {
        task.subtasks = subtasks;
    }
    if let Some(milestones) = input.milestones {
        task.milestones = milestones;
    }
    if input.due_start.is_some() {
        task.due_start = input.due_start;
    }
    if input.due_end.is_some() {
        task.due_end = input.due_end;
    }
    if let Some(custom_fields) = input.custom_fields {
        task.custom_fields = custom_fields;
    }
    task.updated_at = Utc::now();
    ok("EditTask", json!({"task": task}))
}

async fn get_task(State(state): State<AppState>, Json(input): Json<GetTask>) -> ApiResult {
    let store = state.db.read().await;
    let index = store.task_index(&input.slug)?;
    ok("GetTask", json!({"task": store.tasks[index]}))
}

async fn get_tasks(State(state): State<AppState>, Json(input): Json<GetTasks>) -> ApiResult {
    let store = state.db.read().await;
    let limit = input.limit.unwrap_or(MAX_PAGE).min(MAX_PAGE);
    let tasks: Vec<&Task> = store
        .tasks
        .iter()
        .filter(|t| input.matches(t))
        .skip(input.skip.unwrap_or(0))
        .take(limit)
        .collect();
    ok("GetTasks", json!({"tasks": tasks}))
}

// --- comments ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostComment {
    pub document_id: String,
    pub content: String,
    #[serde(default)]
    pub file_ids: Vec<String>,
    pub reply_to: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditComment {
    pub comment_id: String,
    pub content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRef {
    pub comment_id: String,
}

async fn post_comment(State(state): State<AppState>, Json(input): Json<PostComment>) -> ApiResult {
    let mut store = state.db.write().await;
    store.document_mut(&input.document_id)?;
    let files: Vec<Value> = store
        .files
        .iter()
        .filter(|f| input.file_ids.contains(&f.id))
        .map(|f| json!(f))
        .collect();
    let now = Utc::now();
    let comment = Comment {
        id: new_id(),
        document_id: input.document_id,
        author_id: MEMBER_ID.to_string(),
        content: input.content,
        files,
        reactions: Vec::new(),
        reply_to: input.reply_to,
        created_at: now,
        updated_at: now,
        edited_at: None,
        deleted_at: None,
        has_removed_files: false,
    };
    store.comments.push(comment.clone());
    ok("PostComment", json!({"comment": comment}))
}

async fn get_comments(State(state): State<AppState>, Json(input): Json<DocumentRef>) -> ApiResult {
    let store = state.db.read().await;
    let comments: Vec<&Comment> = store
        .comments
        .iter()
        .filter(|c| c.document_id == input.document_id && c.deleted_at.is_none())
        .collect();
    ok("GetComments", json!({"comments": comments}))
}

async fn edit_comment(State(state): State<AppState>, Json(input): Json<EditComment>) -> ApiResult {
    let mut store = state.db.write().await;
    let comment = store.comment_mut(&input.comment_id)?;
    let now = Utc::now();
    comment.content = input.content;
    comment.edited_at = Some(now);
    comment.updated_at = now;
    ok("EditComment", json!({"comment": comment}))
}

async fn delete_comment(State(state): State<AppState>, Json(input): Json<CommentRef>) -> ApiResult {
    let mut store = state.db.write().await;
    let comment = store.comment_mut(&input.comment_id)?;
    comment.deleted_at = Some(Utc::now());
    ok("DeleteComment", json!({"comment": comment}))
}

// --- profile ---

async fn get_profile() -> ApiResult {
    let created = "2024-01-01T00:00:00.000Z";
    ok(
        "GetProfile",
        json!({"profile": {
            "_id": "profile-1",
            "fullName": "Mock User",
            "nickName": "mock",
            "email": "mock@example.com",
            "emails": [{"email": "mock@example.com", "confirmed": true, "primary": true}],
            "color": {"color": "blue", "isDark": false},
            "avatarMode": 2,
            "incompleteSteps": [],
            "memberId": MEMBER_ID,
            "registeredDate": created,
            "createdAt": created,
            "updatedAt": created,
        }}),
    )
}

// --- uploads ---

const FILE_TYPES: [&str; 4] = ["Image", "File", "Video", "Pdf"];

async fn upload_file(State(state): State<AppState>, mut multipart: Multipart) -> ApiResult {
    let mut upload: Option<(String, String, Vec<u8>)> = None;
    let mut file_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation("file", e.body_text()))?
    {
        let part = field.name().map(str::to_owned);
        match part.as_deref() {
            Some("file") => {
                let name = field.file_name().unwrap_or("upload").to_string();
                let mime = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::validation("file", e.body_text()))?;
                upload = Some((name, mime, bytes.to_vec()));
            }
            Some("type") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::validation("type", e.body_text()))?;
                file_type = Some(value);
            }
            _ => {}
        }
    }

    let (name, mime, bytes) = upload.ok_or_else(|| ApiError::validation("file", "file part is missing"))?;
    let file_type = file_type.unwrap_or_else(|| "File".to_string());
    if !FILE_TYPES.contains(&file_type.as_str()) {
        return Err(ApiError::validation("type", format!("unknown file type {file_type}")));
    }

    let id = new_id();
    let ext = name
        .rsplit_once('.')
        .map(|(_, e)| e.to_ascii_lowercase())
        .unwrap_or_default();
    let file = StoredFile {
        url: format!("https://files.vaiz.local/{id}/{name}"),
        id,
        name: name.clone(),
        file_type,
        ext,
        size: bytes.len() as u64,
        mime,
        original_name: name,
        date: Utc::now(),
        owner: MEMBER_ID.to_string(),
        dimension: Vec::new(),
    };
    tracing::debug!(id = %file.id, size = file.size, "file stored");
    state.db.write().await.files.push(file.clone());
    ok("UploadFile", json!({"file": file}))
}
