//! Blocking session: one call per RPC.
//!
//! # Design
//! `Session` composes `VaizClient::build_*`, a `Transport` and
//! `VaizClient::parse_*` so callers get `session.get_task("PRJ-1")?` instead
//! of three steps. The default transport keeps one `ureq::Agent` for the
//! session's lifetime so connections are reused. Multipart uploads go
//! through `reqwest`'s blocking client, whose form streams the file part
//! from disk. Tests and hosts with their own HTTP stack plug in another
//! `Transport`.
//!
//! Every call is at most once: nothing is retried, and errors surface to the
//! caller unchanged. No timeout is imposed beyond the transport's defaults.

use std::path::Path;

use crate::client::{endpoints, VaizClient};
use crate::config::ClientConfig;
use crate::document::Node;
use crate::error::{Result, VaizError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, MultipartBody};
use crate::types::custom_fields;
use crate::types::*;

/// Executes one HTTP round-trip.
///
/// Implementations must return non-2xx responses as data, not as errors;
/// `Err` is reserved for requests that produced no response at all.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// `Transport` over a persistent `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl UreqTransport {
    fn execute_multipart(&self, request: &HttpRequest, body: &MultipartBody) -> Result<HttpResponse> {
        let part = reqwest::blocking::multipart::Part::file(&body.file.path)?
            .file_name(body.file.file_name.clone())
            .mime_str(&body.file.content_type)
            .map_err(|e| VaizError::InvalidArgument(e.to_string()))?;
        let mut form = reqwest::blocking::multipart::Form::new().part(body.file.field.clone(), part);
        for (name, value) in &body.text_fields {
            form = form.text(name.clone(), value.clone());
        }

        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| VaizError::Transport(e.to_string()))?;
        let mut builder = client.post(&request.path);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let response = builder
            .multipart(form)
            .send()
            .map_err(|e| VaizError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response.text().map_err(|e| VaizError::Transport(e.to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        if let Some(body) = &request.multipart {
            return self.execute_multipart(&request, body);
        }

        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&request.path);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&request.path);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &request.body {
                    Some(body) => builder.send(body.as_slice()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| VaizError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| VaizError::Transport(e.to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}

/// A configured client bound to a transport.
pub struct Session<T: Transport = UreqTransport> {
    client: VaizClient,
    transport: T,
    space_id: String,
    verbose: bool,
}

impl Session<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }

    /// A session configured from `VAIZ_*` variables and `.env`.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ClientConfig::from_env()?))
    }
}

impl<T: Transport> Session<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            client: VaizClient::new(&config),
            transport,
            space_id: config.space_id,
            verbose: config.verbose,
        }
    }

    pub fn client(&self) -> &VaizClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn send(&self, endpoint: &str, request: HttpRequest) -> Result<HttpResponse> {
        tracing::debug!(endpoint, "dispatching request");
        if self.verbose {
            tracing::debug!(endpoint, body = %request.body_text(), "request body");
        }
        let response = self.transport.execute(request)?;
        tracing::debug!(endpoint, status = response.status, "response received");
        if self.verbose {
            tracing::debug!(endpoint, body = %response.body, "response body");
        }
        Ok(response)
    }

    // -- documents ----------------------------------------------------------

    /// The document's current tree. A document whose stored JSON cannot be
    /// decoded reads back as empty.
    pub fn get_json_document(&self, document_id: &str) -> Result<JsonDocument> {
        let request = self.client.build_get_json_document(document_id)?;
        let response = self.send(endpoints::GET_JSON_DOCUMENT, request)?;
        self.client.parse_get_json_document(response)
    }

    /// Replace the document with plain text.
    pub fn replace_document(&self, document_id: &str, description: &str) -> Result<EmptyResponse> {
        let request = self.client.build_replace_document(document_id, description)?;
        let response = self.send(endpoints::REPLACE_DOCUMENT, request)?;
        self.client.parse_replace_document(response)
    }

    /// Replace the document's whole tree with `content`.
    pub fn replace_json_document(&self, document_id: &str, content: &[Node]) -> Result<EmptyResponse> {
        let request = self.client.build_replace_json_document(document_id, content)?;
        let response = self.send(endpoints::REPLACE_JSON_DOCUMENT, request)?;
        self.client.parse_replace_json_document(response)
    }

    pub fn append_document(&self, request: &AppendDocumentRequest) -> Result<EmptyResponse> {
        let http = self.client.build_append_document(request)?;
        let response = self.send(endpoints::APPEND_DOCUMENT, http)?;
        self.client.parse_append_document(response)
    }

    /// Add `content` after the existing blocks. Successive appends land in
    /// call order.
    pub fn append_json_document(&self, document_id: &str, content: &[Node]) -> Result<EmptyResponse> {
        let request = self.client.build_append_json_document(document_id, content)?;
        let response = self.send(endpoints::APPEND_JSON_DOCUMENT, request)?;
        self.client.parse_append_json_document(response)
    }

    pub fn get_documents(&self, request: &GetDocumentsRequest) -> Result<GetDocumentsResponse> {
        let http = self.client.build_get_documents(request)?;
        let response = self.send(endpoints::GET_DOCUMENTS, http)?;
        self.client.parse_get_documents(response)
    }

    pub fn create_document(&self, request: &CreateDocumentRequest) -> Result<DocumentResponse> {
        let http = self.client.build_create_document(request)?;
        let response = self.send(endpoints::CREATE_DOCUMENT, http)?;
        self.client.parse_create_document(response)
    }

    pub fn edit_document(&self, request: &EditDocumentRequest) -> Result<DocumentResponse> {
        let http = self.client.build_edit_document(request)?;
        let response = self.send(endpoints::EDIT_DOCUMENT, http)?;
        self.client.parse_edit_document(response)
    }

    // -- tasks --------------------------------------------------------------

    pub fn create_task(&self, request: &CreateTaskRequest) -> Result<TaskResponse> {
        let http = self.client.build_create_task(request)?;
        let response = self.send(endpoints::CREATE_TASK, http)?;
        self.client.parse_create_task(response)
    }

    /// Upload `path`, attach it to `request`, then create the task.
    pub fn create_task_with_file(
        &self,
        request: &CreateTaskRequest,
        path: impl AsRef<Path>,
        file_type: UploadFileType,
    ) -> Result<TaskResponse> {
        let uploaded = self.upload_file(path, file_type)?;
        let mut request = request.clone();
        request.files.push(TaskFile::from(uploaded.file()));
        self.create_task(&request)
    }

    pub fn edit_task(&self, request: &EditTaskRequest) -> Result<TaskResponse> {
        let http = self.client.build_edit_task(request)?;
        let response = self.send(endpoints::EDIT_TASK, http)?;
        self.client.parse_edit_task(response)
    }

    pub fn get_task(&self, slug: &str) -> Result<TaskResponse> {
        let http = self.client.build_get_task(slug)?;
        let response = self.send(endpoints::GET_TASK, http)?;
        self.client.parse_get_task(response)
    }

    pub fn get_tasks(&self, request: &GetTasksRequest) -> Result<GetTasksResponse> {
        let http = self.client.build_get_tasks(request)?;
        let response = self.send(endpoints::GET_TASKS, http)?;
        self.client.parse_get_tasks(response)
    }

    pub fn get_history(&self, request: &GetHistoryRequest) -> Result<GetHistoryResponse> {
        let http = self.client.build_get_history(request)?;
        let response = self.send(endpoints::GET_HISTORY, http)?;
        self.client.parse_get_history(response)
    }

    /// Every task matching `request`'s filters, up to `max_tasks`, fetched
    /// page by page. `limit` and `skip` in `request` are ignored.
    pub fn get_all_tasks(&self, request: &GetTasksRequest, max_tasks: usize) -> Result<Vec<Task>> {
        if max_tasks > MAX_ALL_TASKS {
            return Err(VaizError::InvalidArgument(format!(
                "max_tasks cannot exceed {MAX_ALL_TASKS}"
            )));
        }

        let mut tasks = Vec::new();
        let mut page = 0;
        while tasks.len() < max_tasks {
            let batch = self.get_tasks(&request.page(page))?.payload.tasks;
            let last = batch.len() < TASKS_PAGE_SIZE as usize;
            tasks.extend(batch);
            if last {
                break;
            }
            page += 1;
        }
        tasks.truncate(max_tasks);
        tracing::debug!(count = tasks.len(), pages = page + 1, "fetched tasks");
        Ok(tasks)
    }

    // -- boards, milestones, projects ---------------------------------------

    pub fn get_boards(&self) -> Result<BoardsResponse> {
        let http = self.client.build_get_boards()?;
        let response = self.send(endpoints::GET_BOARDS, http)?;
        self.client.parse_get_boards(response)
    }

    pub fn get_board(&self, board_id: &str) -> Result<BoardResponse> {
        let http = self.client.build_get_board(board_id)?;
        let response = self.send(endpoints::GET_BOARD, http)?;
        self.client.parse_get_board(response)
    }

    pub fn create_board_type(&self, request: &CreateBoardTypeRequest) -> Result<BoardTypeResponse> {
        let http = self.client.build_create_board_type(request)?;
        let response = self.send(endpoints::CREATE_BOARD_TYPE, http)?;
        self.client.parse_create_board_type(response)
    }

    pub fn edit_board_type(&self, request: &EditBoardTypeRequest) -> Result<BoardTypeResponse> {
        let http = self.client.build_edit_board_type(request)?;
        let response = self.send(endpoints::EDIT_BOARD_TYPE, http)?;
        self.client.parse_edit_board_type(response)
    }

    pub fn create_board_group(&self, request: &CreateBoardGroupRequest) -> Result<BoardGroupsResponse> {
        let http = self.client.build_create_board_group(request)?;
        let response = self.send(endpoints::CREATE_BOARD_GROUP, http)?;
        self.client.parse_create_board_group(response)
    }

    pub fn edit_board_group(&self, request: &EditBoardGroupRequest) -> Result<BoardGroupsResponse> {
        let http = self.client.build_edit_board_group(request)?;
        let response = self.send(endpoints::EDIT_BOARD_GROUP, http)?;
        self.client.parse_edit_board_group(response)
    }

    pub fn create_board_custom_field(&self, request: &CreateBoardCustomFieldRequest) -> Result<CustomFieldResponse> {
        let http = self.client.build_create_board_custom_field(request)?;
        let response = self.send(endpoints::CREATE_BOARD_CUSTOM_FIELD, http)?;
        self.client.parse_create_board_custom_field(response)
    }

    pub fn edit_board_custom_field(&self, request: &EditBoardCustomFieldRequest) -> Result<CustomFieldResponse> {
        let http = self.client.build_edit_board_custom_field(request)?;
        let response = self.send(endpoints::EDIT_BOARD_CUSTOM_FIELD, http)?;
        self.client.parse_edit_board_custom_field(response)
    }

    /// Add `option` to a select field, reading the field's current options
    /// from its board first.
    pub fn add_select_option(&self, board_id: &str, field_id: &str, option: SelectOption) -> Result<CustomFieldResponse> {
        let board = self.get_board(board_id)?;
        let field = board
            .board()
            .custom_field(field_id)
            .ok_or_else(|| VaizError::InvalidArgument(format!("board {board_id} has no custom field {field_id}")))?;
        let existing = field.select_options()?;
        let request = custom_fields::add_select_option(field_id, board_id, &existing, option);
        self.edit_board_custom_field(&request)
    }

    pub fn get_milestones(&self) -> Result<MilestonesResponse> {
        let http = self.client.build_get_milestones()?;
        let response = self.send(endpoints::GET_MILESTONES, http)?;
        self.client.parse_get_milestones(response)
    }

    pub fn create_milestone(&self, request: &CreateMilestoneRequest) -> Result<MilestoneResponse> {
        let http = self.client.build_create_milestone(request)?;
        let response = self.send(endpoints::CREATE_MILESTONE, http)?;
        self.client.parse_create_milestone(response)
    }

    pub fn get_projects(&self) -> Result<ProjectsResponse> {
        let http = self.client.build_get_projects()?;
        let response = self.send(endpoints::GET_PROJECTS, http)?;
        self.client.parse_get_projects(response)
    }

    // -- comments -----------------------------------------------------------

    pub fn post_comment(&self, request: &PostCommentRequest) -> Result<CommentResponse> {
        let http = self.client.build_post_comment(request)?;
        let response = self.send(endpoints::POST_COMMENT, http)?;
        self.client.parse_post_comment(response)
    }

    pub fn get_comments(&self, document_id: &str) -> Result<GetCommentsResponse> {
        let http = self.client.build_get_comments(document_id)?;
        let response = self.send(endpoints::GET_COMMENTS, http)?;
        self.client.parse_get_comments(response)
    }

    pub fn edit_comment(&self, request: &EditCommentRequest) -> Result<CommentResponse> {
        let http = self.client.build_edit_comment(request)?;
        let response = self.send(endpoints::EDIT_COMMENT, http)?;
        self.client.parse_edit_comment(response)
    }

    pub fn delete_comment(&self, comment_id: &str) -> Result<CommentResponse> {
        let http = self.client.build_delete_comment(comment_id)?;
        let response = self.send(endpoints::DELETE_COMMENT, http)?;
        self.client.parse_delete_comment(response)
    }

    // -- profile, space, members --------------------------------------------

    pub fn get_profile(&self) -> Result<ProfileResponse> {
        let http = self.client.build_get_profile()?;
        let response = self.send(endpoints::GET_PROFILE, http)?;
        self.client.parse_get_profile(response)
    }

    pub fn get_space(&self, space_id: &str) -> Result<GetSpaceResponse> {
        let http = self.client.build_get_space(space_id)?;
        let response = self.send(endpoints::GET_SPACE, http)?;
        self.client.parse_get_space(response)
    }

    /// The space this session is scoped to.
    pub fn get_current_space(&self) -> Result<GetSpaceResponse> {
        self.get_space(&self.space_id)
    }

    pub fn get_space_members(&self) -> Result<GetSpaceMembersResponse> {
        let http = self.client.build_get_space_members()?;
        let response = self.send(endpoints::GET_SPACE_MEMBERS, http)?;
        self.client.parse_get_space_members(response)
    }

    // -- upload -------------------------------------------------------------

    /// Upload the file at `path`. A missing file fails locally with an
    /// `Io` error of kind `NotFound` before any request is sent.
    pub fn upload_file(&self, path: impl AsRef<Path>, file_type: UploadFileType) -> Result<UploadFileResponse> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(VaizError::InvalidArgument(format!("{} is not a file", path.display())));
        }
        let http = self.client.build_upload_file(path, file_type)?;
        let response = self.send(endpoints::UPLOAD_FILE, http)?;
        self.client.parse_upload_file(response)
    }
}
