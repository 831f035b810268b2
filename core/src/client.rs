//! Stateless request builder and response parser for the Vaiz RPC API.
//!
//! # Design
//! `VaizClient` holds the base URL and the credentials and nothing else.
//! Each RPC is split into a `build_*` method that produces an `HttpRequest`
//! and a `parse_*` method that consumes an `HttpResponse`. The caller (or
//! `Session`) executes the round-trip in between, so everything here is
//! deterministic and testable without a network.
//!
//! Every RPC is `POST {base_url}/{endpoint}` with a JSON body and the same
//! four headers. Failures come back as an `{error: {...}}` envelope, usually
//! with a non-2xx status; the envelope is checked first so the typed error
//! wins over the bare status.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::ClientConfig;
use crate::document::Node;
use crate::error::{Result, ServerError, VaizError};
use crate::http::{FilePart, HttpMethod, HttpRequest, HttpResponse, MultipartBody};
use crate::types::*;

/// RPC endpoint names.
pub mod endpoints {
    pub const GET_JSON_DOCUMENT: &str = "getJSONDocument";
    pub const REPLACE_DOCUMENT: &str = "replaceDocument";
    pub const REPLACE_JSON_DOCUMENT: &str = "replaceJSONDocument";
    pub const APPEND_DOCUMENT: &str = "appendDocument";
    pub const APPEND_JSON_DOCUMENT: &str = "appendJSONDocument";
    pub const GET_DOCUMENTS: &str = "getDocuments";
    pub const CREATE_DOCUMENT: &str = "createDocument";
    pub const EDIT_DOCUMENT: &str = "editDocument";
    pub const CREATE_TASK: &str = "createTask";
    pub const EDIT_TASK: &str = "editTask";
    pub const GET_TASK: &str = "getTask";
    pub const GET_TASKS: &str = "getTasks";
    pub const GET_HISTORY: &str = "getHistory";
    pub const GET_BOARDS: &str = "getBoards";
    pub const GET_BOARD: &str = "getBoard";
    pub const CREATE_BOARD_TYPE: &str = "createBoardType";
    pub const EDIT_BOARD_TYPE: &str = "editBoardType";
    pub const CREATE_BOARD_GROUP: &str = "createBoardGroup";
    pub const EDIT_BOARD_GROUP: &str = "editBoardGroup";
    pub const CREATE_BOARD_CUSTOM_FIELD: &str = "createBoardCustomField";
    pub const EDIT_BOARD_CUSTOM_FIELD: &str = "editBoardCustomField";
    pub const GET_MILESTONES: &str = "getMilestones";
    pub const CREATE_MILESTONE: &str = "createMilestone";
    pub const POST_COMMENT: &str = "postComment";
    pub const GET_COMMENTS: &str = "getComments";
    pub const EDIT_COMMENT: &str = "editComment";
    pub const DELETE_COMMENT: &str = "deleteComment";
    pub const GET_PROFILE: &str = "getProfile";
    pub const GET_SPACE: &str = "getSpace";
    pub const GET_SPACE_MEMBERS: &str = "getSpaceMembers";
    pub const GET_PROJECTS: &str = "getProjects";
    pub const UPLOAD_FILE: &str = "UploadFile";
}

use endpoints::*;

#[derive(Debug, Clone)]
pub struct VaizClient {
    base_url: String,
    api_key: String,
    space_id: String,
    app_version: String,
}

impl VaizClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            space_id: config.space_id.clone(),
            app_version: config.app_version.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    fn auth_headers(&self) -> Vec<(String, String)> {
        vec![
            ("Authorization".to_string(), format!("Bearer {}", self.api_key)),
            ("current-space-id".to_string(), self.space_id.clone()),
            ("app-version".to_string(), self.app_version.clone()),
        ]
    }

    /// A JSON RPC request for `endpoint`.
    pub fn build_rpc<T: Serialize + ?Sized>(&self, endpoint: &str, body: &T) -> Result<HttpRequest> {
        let body = serde_json::to_vec(body).map_err(|e| VaizError::Serialization(e.to_string()))?;
        let mut headers = self.auth_headers();
        headers.push(("Content-Type".to_string(), "application/json".to_string()));
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.url(endpoint),
            headers,
            body: Some(body),
            multipart: None,
        })
    }

    // -- documents ----------------------------------------------------------

    pub fn build_get_json_document(&self, document_id: &str) -> Result<HttpRequest> {
        self.build_rpc(
            GET_JSON_DOCUMENT,
            &GetDocumentRequest {
                document_id: document_id.to_string(),
            },
        )
    }

    /// Decode the stored tree. A missing or malformed `payload.json` yields
    /// an empty document rather than an error.
    pub fn parse_get_json_document(&self, response: HttpResponse) -> Result<JsonDocument> {
        let raw: RawJsonDocumentResponse = parse_body(&response)?;
        let Some(json) = raw.payload.json else {
            return Ok(JsonDocument::empty());
        };
        match serde_json::from_str::<Value>(&json) {
            Ok(value) => Ok(JsonDocument::new(value)),
            Err(e) => {
                tracing::warn!(error = %e, "document json is malformed, treating as empty");
                Ok(JsonDocument::empty())
            }
        }
    }

    /// Replace the whole document with plain text.
    pub fn build_replace_document(&self, document_id: &str, description: &str) -> Result<HttpRequest> {
        self.build_rpc(
            REPLACE_DOCUMENT,
            &ReplaceDocumentRequest {
                document_id: document_id.to_string(),
                description: description.to_string(),
            },
        )
    }

    pub fn parse_replace_document(&self, response: HttpResponse) -> Result<EmptyResponse> {
        parse_body(&response)
    }

    /// Replace the whole document with `content`. Anything not in `content`
    /// is removed.
    pub fn build_replace_json_document(&self, document_id: &str, content: &[Node]) -> Result<HttpRequest> {
        self.build_rpc(REPLACE_JSON_DOCUMENT, &JsonContentRequest::new(document_id, content)?)
    }

    pub fn parse_replace_json_document(&self, response: HttpResponse) -> Result<EmptyResponse> {
        parse_body(&response)
    }

    pub fn build_append_document(&self, request: &AppendDocumentRequest) -> Result<HttpRequest> {
        self.build_rpc(APPEND_DOCUMENT, request)
    }

    pub fn parse_append_document(&self, response: HttpResponse) -> Result<EmptyResponse> {
        parse_body(&response)
    }

    /// Add `content` after the document's existing blocks.
    pub fn build_append_json_document(&self, document_id: &str, content: &[Node]) -> Result<HttpRequest> {
        self.build_rpc(APPEND_JSON_DOCUMENT, &JsonContentRequest::new(document_id, content)?)
    }

    pub fn parse_append_json_document(&self, response: HttpResponse) -> Result<EmptyResponse> {
        parse_body(&response)
    }

    pub fn build_get_documents(&self, request: &GetDocumentsRequest) -> Result<HttpRequest> {
        self.build_rpc(GET_DOCUMENTS, request)
    }

    pub fn parse_get_documents(&self, response: HttpResponse) -> Result<GetDocumentsResponse> {
        parse_body(&response)
    }

    pub fn build_create_document(&self, request: &CreateDocumentRequest) -> Result<HttpRequest> {
        self.build_rpc(CREATE_DOCUMENT, request)
    }

    pub fn parse_create_document(&self, response: HttpResponse) -> Result<DocumentResponse> {
        parse_body(&response)
    }

    pub fn build_edit_document(&self, request: &EditDocumentRequest) -> Result<HttpRequest> {
        self.build_rpc(EDIT_DOCUMENT, request)
    }

    pub fn parse_edit_document(&self, response: HttpResponse) -> Result<DocumentResponse> {
        parse_body(&response)
    }

    // -- tasks --------------------------------------------------------------

    pub fn build_create_task(&self, request: &CreateTaskRequest) -> Result<HttpRequest> {
        self.build_rpc(CREATE_TASK, request)
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<TaskResponse> {
        parse_body(&response)
    }

    pub fn build_edit_task(&self, request: &EditTaskRequest) -> Result<HttpRequest> {
        self.build_rpc(EDIT_TASK, request)
    }

    pub fn parse_edit_task(&self, response: HttpResponse) -> Result<TaskResponse> {
        parse_body(&response)
    }

    /// `slug` is the task's human-readable id, e.g. `PRJ-12`.
    pub fn build_get_task(&self, slug: &str) -> Result<HttpRequest> {
        self.build_rpc(GET_TASK, &json!({ "slug": slug }))
    }

    pub fn parse_get_task(&self, response: HttpResponse) -> Result<TaskResponse> {
        parse_body(&response)
    }

    pub fn build_get_tasks(&self, request: &GetTasksRequest) -> Result<HttpRequest> {
        self.build_rpc(GET_TASKS, request)
    }

    pub fn parse_get_tasks(&self, response: HttpResponse) -> Result<GetTasksResponse> {
        parse_body(&response)
    }

    pub fn build_get_history(&self, request: &GetHistoryRequest) -> Result<HttpRequest> {
        self.build_rpc(GET_HISTORY, request)
    }

    pub fn parse_get_history(&self, response: HttpResponse) -> Result<GetHistoryResponse> {
        parse_body(&response)
    }

    // -- boards, milestones, projects ---------------------------------------

    pub fn build_get_boards(&self) -> Result<HttpRequest> {
        self.build_rpc(GET_BOARDS, &json!({}))
    }

    pub fn parse_get_boards(&self, response: HttpResponse) -> Result<BoardsResponse> {
        parse_body(&response)
    }

    pub fn build_get_board(&self, board_id: &str) -> Result<HttpRequest> {
        self.build_rpc(
            GET_BOARD,
            &GetBoardRequest {
                board_id: board_id.to_string(),
            },
        )
    }

    pub fn parse_get_board(&self, response: HttpResponse) -> Result<BoardResponse> {
        parse_body(&response)
    }

    pub fn build_create_board_type(&self, request: &CreateBoardTypeRequest) -> Result<HttpRequest> {
        self.build_rpc(CREATE_BOARD_TYPE, request)
    }

    pub fn parse_create_board_type(&self, response: HttpResponse) -> Result<BoardTypeResponse> {
        parse_body(&response)
    }

    pub fn build_edit_board_type(&self, request: &EditBoardTypeRequest) -> Result<HttpRequest> {
        self.build_rpc(EDIT_BOARD_TYPE, request)
    }

    pub fn parse_edit_board_type(&self, response: HttpResponse) -> Result<BoardTypeResponse> {
        parse_body(&response)
    }

    pub fn build_create_board_group(&self, request: &CreateBoardGroupRequest) -> Result<HttpRequest> {
        self.build_rpc(CREATE_BOARD_GROUP, request)
    }

    pub fn parse_create_board_group(&self, response: HttpResponse) -> Result<BoardGroupsResponse> {
        parse_body(&response)
    }

    pub fn build_edit_board_group(&self, request: &EditBoardGroupRequest) -> Result<HttpRequest> {
        self.build_rpc(EDIT_BOARD_GROUP, request)
    }

    pub fn parse_edit_board_group(&self, response: HttpResponse) -> Result<BoardGroupsResponse> {
        parse_body(&response)
    }

    pub fn build_create_board_custom_field(&self, request: &CreateBoardCustomFieldRequest) -> Result<HttpRequest> {
        self.build_rpc(CREATE_BOARD_CUSTOM_FIELD, request)
    }

    pub fn parse_create_board_custom_field(&self, response: HttpResponse) -> Result<CustomFieldResponse> {
        parse_body(&response)
    }

    pub fn build_edit_board_custom_field(&self, request: &EditBoardCustomFieldRequest) -> Result<HttpRequest> {
        self.build_rpc(EDIT_BOARD_CUSTOM_FIELD, request)
    }

    pub fn parse_edit_board_custom_field(&self, response: HttpResponse) -> Result<CustomFieldResponse> {
        parse_body(&response)
    }

    pub fn build_get_milestones(&self) -> Result<HttpRequest> {
        self.build_rpc(GET_MILESTONES, &json!({}))
    }

    pub fn parse_get_milestones(&self, response: HttpResponse) -> Result<MilestonesResponse> {
        parse_body(&response)
    }

    pub fn build_create_milestone(&self, request: &CreateMilestoneRequest) -> Result<HttpRequest> {
        self.build_rpc(CREATE_MILESTONE, request)
    }

    pub fn parse_create_milestone(&self, response: HttpResponse) -> Result<MilestoneResponse> {
        parse_body(&response)
    }

    pub fn build_get_projects(&self) -> Result<HttpRequest> {
        self.build_rpc(GET_PROJECTS, &json!({}))
    }

    pub fn parse_get_projects(&self, response: HttpResponse) -> Result<ProjectsResponse> {
        parse_body(&response)
    }

    // -- comments -----------------------------------------------------------

    pub fn build_post_comment(&self, request: &PostCommentRequest) -> Result<HttpRequest> {
        self.build_rpc(POST_COMMENT, request)
    }

    pub fn parse_post_comment(&self, response: HttpResponse) -> Result<CommentResponse> {
        parse_body(&response)
    }

    pub fn build_get_comments(&self, document_id: &str) -> Result<HttpRequest> {
        self.build_rpc(
            GET_COMMENTS,
            &GetCommentsRequest {
                document_id: document_id.to_string(),
            },
        )
    }

    pub fn parse_get_comments(&self, response: HttpResponse) -> Result<GetCommentsResponse> {
        parse_body(&response)
    }

    pub fn build_edit_comment(&self, request: &EditCommentRequest) -> Result<HttpRequest> {
        self.build_rpc(EDIT_COMMENT, request)
    }

    pub fn parse_edit_comment(&self, response: HttpResponse) -> Result<CommentResponse> {
        parse_body(&response)
    }

    pub fn build_delete_comment(&self, comment_id: &str) -> Result<HttpRequest> {
        self.build_rpc(
            DELETE_COMMENT,
            &DeleteCommentRequest {
                comment_id: comment_id.to_string(),
            },
        )
    }

    pub fn parse_delete_comment(&self, response: HttpResponse) -> Result<CommentResponse> {
        parse_body(&response)
    }

    // -- profile, space, members --------------------------------------------

    pub fn build_get_profile(&self) -> Result<HttpRequest> {
        self.build_rpc(GET_PROFILE, &json!({}))
    }

    pub fn parse_get_profile(&self, response: HttpResponse) -> Result<ProfileResponse> {
        parse_body(&response)
    }

    pub fn build_get_space(&self, space_id: &str) -> Result<HttpRequest> {
        self.build_rpc(
            GET_SPACE,
            &GetSpaceRequest {
                space_id: space_id.to_string(),
            },
        )
    }

    pub fn parse_get_space(&self, response: HttpResponse) -> Result<GetSpaceResponse> {
        parse_body(&response)
    }

    pub fn build_get_space_members(&self) -> Result<HttpRequest> {
        self.build_rpc(GET_SPACE_MEMBERS, &json!({}))
    }

    pub fn parse_get_space_members(&self, response: HttpResponse) -> Result<GetSpaceMembersResponse> {
        parse_body(&response)
    }

    // -- upload -------------------------------------------------------------

    /// A multipart upload with `file` and `type` fields. No `Content-Type`
    /// header is set here; the transport adds the multipart one with its
    /// boundary. The file is not read until the request is executed.
    pub fn build_upload_file(&self, path: &Path, file_type: UploadFileType) -> Result<HttpRequest> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| VaizError::InvalidArgument(format!("{} has no file name", path.display())))?;
        let content_type = mime_guess::from_path(path).first_or_octet_stream();
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.url(UPLOAD_FILE),
            headers: self.auth_headers(),
            body: None,
            multipart: Some(MultipartBody {
                text_fields: vec![("type".to_string(), file_type.as_str().to_string())],
                file: FilePart {
                    field: "file".to_string(),
                    path: path.to_path_buf(),
                    file_name,
                    content_type: content_type.essence_str().to_string(),
                },
            }),
        })
    }

    pub fn parse_upload_file(&self, response: HttpResponse) -> Result<UploadFileResponse> {
        parse_body(&response)
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ServerError,
}

/// Turn an error envelope or a non-2xx status into a `VaizError`.
pub fn check_status(response: &HttpResponse) -> Result<()> {
    if let Ok(ErrorEnvelope { error }) = serde_json::from_str::<ErrorEnvelope>(&response.body) {
        tracing::warn!(
            status = response.status,
            code = %error.code,
            fields = ?error.fields,
            "server returned an error"
        );
        return Err(VaizError::from_server(error));
    }
    if !response.is_success() {
        tracing::warn!(status = response.status, "request failed without an error envelope");
        return Err(VaizError::Http {
            status: response.status,
            body: response.body.clone(),
        });
    }
    Ok(())
}

fn parse_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    check_status(response)?;
    serde_json::from_str(&response.body).map_err(|e| VaizError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{heading, paragraph};

    fn client() -> VaizClient {
        VaizClient::new(&ClientConfig::new("key-1", "space-1").with_base_url("http://localhost:3000/"))
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn body_json(request: &HttpRequest) -> Value {
        serde_json::from_slice(request.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn rpc_request_shape() {
        let req = client().build_get_task("PRJ-1").unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/getTask");
        assert_eq!(req.header("authorization"), Some("Bearer key-1"));
        assert_eq!(req.header("current-space-id"), Some("space-1"));
        assert_eq!(req.header("app-version"), Some(crate::config::DEFAULT_APP_VERSION));
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(body_json(&req), json!({"slug": "PRJ-1"}));
    }

    #[test]
    fn parameterless_rpcs_send_empty_object() {
        let c = client();
        for req in [
            c.build_get_boards().unwrap(),
            c.build_get_profile().unwrap(),
            c.build_get_space_members().unwrap(),
            c.build_get_milestones().unwrap(),
            c.build_get_projects().unwrap(),
        ] {
            assert_eq!(body_json(&req), json!({}));
        }
    }

    #[test]
    fn replace_json_document_double_encodes_content() {
        let nodes = vec![heading(1, ["T"]), paragraph(["NEW_MARKER"])];
        let req = client().build_replace_json_document("doc-1", &nodes).unwrap();
        assert_eq!(req.path, "http://localhost:3000/replaceJSONDocument");
        let body = body_json(&req);
        assert_eq!(body["documentId"], "doc-1");
        let inner: Vec<Node> = serde_json::from_str(body["content"].as_str().unwrap()).unwrap();
        assert_eq!(inner, nodes);
    }

    #[test]
    fn append_json_document_endpoint() {
        let req = client().build_append_json_document("doc-1", &[paragraph(["x"])]).unwrap();
        assert_eq!(req.path, "http://localhost:3000/appendJSONDocument");
    }

    #[test]
    fn get_json_document_parses_inner_string() {
        let body = json!({
            "type": "GetJSONDocument",
            "payload": {"json": "{\"default\":{\"type\":\"doc\",\"content\":[{\"type\":\"paragraph\"}]}}"}
        });
        let doc = client().parse_get_json_document(ok(&body.to_string())).unwrap();
        assert_eq!(doc.block_types(), vec!["paragraph"]);
    }

    #[test]
    fn get_json_document_tolerates_bad_inner_json() {
        let body = json!({"type": "GetJSONDocument", "payload": {"json": "{not json"}});
        let doc = client().parse_get_json_document(ok(&body.to_string())).unwrap();
        assert_eq!(doc, JsonDocument::empty());

        let doc = client().parse_get_json_document(ok("{}")).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn error_envelope_maps_to_variant() {
        let response = HttpResponse {
            status: 401,
            headers: Vec::new(),
            body: r#"{"error":{"code":"JwtExpired","fields":[],"meta":{"description":"token expired"}}}"#.to_string(),
        };
        let err = client().parse_get_profile(response).unwrap_err();
        assert!(matches!(err, VaizError::Auth(ref e) if e.description() == Some("token expired")));
    }

    #[test]
    fn error_envelope_wins_even_on_200() {
        let err = client()
            .parse_get_boards(ok(r#"{"error":{"code":"PermissionDenied"}}"#))
            .unwrap_err();
        assert!(matches!(err, VaizError::PermissionDenied(_)));
    }

    #[test]
    fn bare_failure_status_is_http_error() {
        let response = HttpResponse {
            status: 502,
            headers: Vec::new(),
            body: "bad gateway".to_string(),
        };
        let err = client().parse_get_tasks(response).unwrap_err();
        assert!(matches!(err, VaizError::Http { status: 502, ref body } if body == "bad gateway"));
    }

    #[test]
    fn malformed_success_body_is_deserialization_error() {
        let err = client().parse_create_task(ok("not json")).unwrap_err();
        assert!(matches!(err, VaizError::Deserialization(_)));
    }

    #[test]
    fn upload_is_multipart() {
        let req = client()
            .build_upload_file(Path::new("/tmp/report.pdf"), UploadFileType::Pdf)
            .unwrap();
        assert_eq!(req.path, "http://localhost:3000/UploadFile");
        assert!(req.header("content-type").is_none());
        assert_eq!(req.header("authorization"), Some("Bearer key-1"));
        assert!(req.body.is_none());

        let form = req.multipart.as_ref().unwrap();
        assert_eq!(form.text_field("type"), Some("Pdf"));
        assert_eq!(form.file.field, "file");
        assert_eq!(form.file.file_name, "report.pdf");
        assert_eq!(form.file.content_type, "application/pdf");
        assert_eq!(form.file.path, Path::new("/tmp/report.pdf"));
    }

    #[test]
    fn upload_content_type_follows_extension() {
        let c = client();
        let content_type = |name: &str| {
            c.build_upload_file(Path::new(name), UploadFileType::File)
                .unwrap()
                .multipart
                .unwrap()
                .file
                .content_type
        };
        assert_eq!(content_type("notes.txt"), "text/plain");
        assert_eq!(content_type("photo.JPG"), "image/jpeg");
        assert_eq!(content_type("blob.unknownext"), "application/octet-stream");
        assert_eq!(content_type("no_extension"), "application/octet-stream");
    }

    #[test]
    fn upload_without_file_name_is_invalid() {
        let err = client().build_upload_file(Path::new("/"), UploadFileType::File).unwrap_err();
        assert!(matches!(err, VaizError::InvalidArgument(_)));
    }

    #[test]
    fn delete_comment_body() {
        let req = client().build_delete_comment("c1").unwrap();
        assert_eq!(body_json(&req), json!({"commentId": "c1"}));
    }

    #[test]
    fn board_definition_rpcs_use_their_endpoints() {
        let c = client();
        let create_type = CreateBoardTypeRequest::new("b1", "Bug", Icon::Fire, Color::Red);
        let edit_group = EditBoardGroupRequest {
            board_group_id: "g1".into(),
            board_id: "b1".into(),
            limit: Some(5),
            ..Default::default()
        };
        let field = crate::types::custom_fields::text_field("Notes", "b1");
        let cases = [
            (c.build_create_board_type(&create_type).unwrap(), "createBoardType"),
            (c.build_edit_board_type(&EditBoardTypeRequest::new("bt1", "b1")).unwrap(), "editBoardType"),
            (c.build_edit_board_group(&edit_group).unwrap(), "editBoardGroup"),
            (c.build_create_board_custom_field(&field).unwrap(), "createBoardCustomField"),
            (c.build_get_history(&GetHistoryRequest::new(Kind::Task, "t1")).unwrap(), "getHistory"),
        ];
        for (req, endpoint) in cases {
            assert_eq!(req.path, format!("http://localhost:3000/{endpoint}"));
            assert_eq!(req.header("current-space-id"), Some("space-1"));
        }
    }

    #[test]
    fn create_board_type_body() {
        let request = CreateBoardTypeRequest::new("b1", "Bug", Icon::Fire, Color::Red);
        let req = client().build_create_board_type(&request).unwrap();
        assert_eq!(
            body_json(&req),
            json!({"boardId": "b1", "label": "Bug", "icon": "Fire", "color": "red"})
        );
    }

    #[test]
    fn edit_custom_field_clears_description() {
        let request = crate::types::custom_fields::describe_field("c1", "b1", None);
        let req = client().build_edit_board_custom_field(&request).unwrap();
        assert_eq!(
            body_json(&req),
            json!({"fieldId": "c1", "boardId": "b1", "description": null})
        );
    }

    #[test]
    fn parses_created_board_group_list() {
        let groups = client()
            .parse_create_board_group(ok(
                r#"{"type":"CreateBoardGroup","payload":{"boardGroups":[{"_id":"g1","name":"Todo"},{"_id":"g2","name":"QA"}]}}"#,
            ))
            .unwrap();
        assert_eq!(groups.board_groups().len(), 2);
        assert_eq!(groups.board_groups()[1].name, "QA");
    }

    #[test]
    fn parses_history_entries() {
        let history = client()
            .parse_get_history(ok(
                r#"{"type":"GetHistory","payload":{"histories":[{"_id":"h1","key":"TASK_EDITED","kind":"Task","kindId":"t1","creator":"u1","data":{"field":"name"}}]}}"#,
            ))
            .unwrap();
        let entry = &history.histories()[0];
        assert_eq!(entry.kind, Some(Kind::Task));
        assert_eq!(entry.data["field"], "name");
    }
}
