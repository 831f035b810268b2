//! Document and task flows against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives a `Session` with the
//! default `UreqTransport` over real HTTP. Validates that request building,
//! the JSON-content encoding and response parsing agree with the server.

use std::io::Write;
use std::net::SocketAddr;

use serde_json::json;
use vaiz_core::content;
use vaiz_core::document::*;
use vaiz_core::types::{
    AppendDocumentRequest, CreateDocumentRequest, CreateTaskRequest, EditTaskRequest, GetTasksRequest, Kind,
    PostCommentRequest, TaskPriority, UploadFileType,
};
use vaiz_core::{ClientConfig, Session, VaizError};

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn session_with_key(addr: SocketAddr, api_key: &str) -> Session {
    let config = ClientConfig::new(api_key, "space-1").with_base_url(format!("http://{addr}/"));
    Session::new(config)
}

fn session(addr: SocketAddr) -> Session {
    session_with_key(addr, mock_server::API_KEY)
}

fn new_document(session: &Session, title: &str) -> String {
    let request = CreateDocumentRequest {
        kind: Kind::Space,
        kind_id: "space-1".to_string(),
        title: title.to_string(),
        index: 0,
    };
    session.create_document(&request).unwrap().payload.document.id
}

#[test]
fn document_round_trip_keeps_structure_and_marks() {
    let session = session(start_server());
    let id = new_document(&session, "Round trip");

    let content = vec![
        heading(1, ["Title"]),
        paragraph(content!["x ", text("y").bold()]),
        bullet_list(["first", "second"]),
    ];
    session.replace_json_document(&id, &content).unwrap();

    let doc = session.get_json_document(&id).unwrap();
    assert_eq!(doc.block_types(), vec!["heading", "paragraph", "bulletList"]);

    let runs = &doc.blocks()[1]["content"];
    assert_eq!(runs[1]["text"], "y");
    assert_eq!(runs[1]["marks"], json!([{"type": "bold"}]));

    let nodes = doc.nodes().unwrap();
    assert_eq!(nodes, content);
}

#[test]
fn replace_drops_previous_content() {
    let session = session(start_server());
    let id = new_document(&session, "Replace");

    session
        .replace_json_document(&id, &[paragraph(["OLD_MARKER"])])
        .unwrap();
    assert!(session.get_json_document(&id).unwrap().contains_text("OLD_MARKER"));

    session
        .replace_json_document(&id, &[paragraph(["NEW_MARKER"])])
        .unwrap();
    let doc = session.get_json_document(&id).unwrap();
    assert!(!doc.contains_text("OLD_MARKER"));
    assert!(doc.contains_text("NEW_MARKER"));
}

#[test]
fn appends_land_in_call_order() {
    let session = session(start_server());
    let id = new_document(&session, "Append");

    session.replace_json_document(&id, &[heading(2, ["Log"])]).unwrap();
    for i in 0..4 {
        session
            .append_json_document(&id, &[paragraph([format!("MARKER_{i}")])])
            .unwrap();
    }

    let doc = session.get_json_document(&id).unwrap();
    let texts: Vec<&str> = doc.blocks()[1..]
        .iter()
        .map(|b| b["content"][0]["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, ["MARKER_0", "MARKER_1", "MARKER_2", "MARKER_3"]);
    assert_eq!(doc.block_types()[0], "heading");
}

#[test]
fn table_spans_survive_the_server() {
    let session = session(start_server());
    let id = new_document(&session, "Table");

    let grid = table([
        table_row(content![table_header(["Merged"]).colspan(2)]),
        table_row(["a", "b"]),
    ])
    .show_row_numbers(true);
    session.replace_json_document(&id, &[grid.into()]).unwrap();

    let doc = session.get_json_document(&id).unwrap();
    let table = &doc.blocks()[0];
    assert_eq!(table["type"], "extension-table");
    assert_eq!(table["attrs"]["showRowNumbers"], true);
    assert_eq!(table["content"][0]["content"][0]["attrs"]["colspan"], 2);
    assert_eq!(table["content"][1]["content"][1]["type"], "tableCell");
    assert!(validate(&doc.nodes().unwrap()).is_empty());
}

#[test]
fn plain_text_replace_and_append() {
    let session = session(start_server());
    let id = new_document(&session, "Plain");

    session.replace_document(&id, "line one\nline two").unwrap();
    session
        .append_document(&AppendDocumentRequest {
            document_id: id.clone(),
            description: Some("line three".to_string()),
            files: None,
        })
        .unwrap();

    let doc = session.get_json_document(&id).unwrap();
    assert_eq!(doc.blocks().len(), 3);
    assert!(doc.contains_text("line three"));
}

#[test]
fn bad_key_is_an_auth_error() {
    let addr = start_server();
    let err = session_with_key(addr, "wrong-key").get_profile().unwrap_err();
    match err {
        VaizError::Auth(server) => assert_eq!(server.code, "JwtIncorrect"),
        other => panic!("expected auth error, got {other:?}"),
    }
}

#[test]
fn missing_document_is_not_found() {
    let session = session(start_server());
    let err = session.get_json_document("missing").unwrap_err();
    assert!(matches!(err, VaizError::NotFound(_)));
    assert_eq!(err.server_error().and_then(|e| e.description()), Some("Document missing not found"));
}

#[test]
fn profile_parses() {
    let session = session(start_server());
    let response = session.get_profile().unwrap();
    assert_eq!(response.profile().email, "mock@example.com");
}

#[test]
fn task_lifecycle() {
    let session = session(start_server());

    let mut request = CreateTaskRequest::new("Write docs", "g1", "b1", "p1");
    request.priority = TaskPriority::High;
    request.description = Some("first draft".to_string());
    let created = session.create_task(&request).unwrap();
    let task = created.task();
    assert_eq!(task.priority, TaskPriority::High);
    assert!(!task.completed);

    let fetched = session.get_task(&task.hrid).unwrap();
    assert_eq!(fetched.task().id, task.id);

    let edited = session
        .edit_task(&EditTaskRequest {
            completed: Some(true),
            ..EditTaskRequest::new(task.id.clone())
        })
        .unwrap();
    assert!(edited.task().completed);

    let description = session.get_json_document(&task.document).unwrap();
    assert!(description.contains_text("first draft"));
}

#[test]
fn all_tasks_are_paged_and_truncated() {
    let session = session(start_server());
    for i in 0..60 {
        session
            .create_task(&CreateTaskRequest::new(format!("t{i}"), "g1", "b1", "p1"))
            .unwrap();
    }

    let filter = GetTasksRequest {
        board: Some("b1".to_string()),
        ..Default::default()
    };
    assert_eq!(session.get_all_tasks(&filter, 100).unwrap().len(), 60);

    let first = session.get_all_tasks(&filter, 55).unwrap();
    assert_eq!(first.len(), 55);
    assert_eq!(first[54].name, "t54");
}

#[test]
fn upload_and_attach_to_task() {
    let session = session(start_server());
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(b"attachment body").unwrap();

    let uploaded = session.upload_file(file.path(), UploadFileType::File).unwrap();
    let stored = uploaded.file();
    assert_eq!(stored.size, 15);
    assert_eq!(stored.ext, "txt");
    assert_eq!(stored.mime, "text/plain");

    let created = session
        .create_task_with_file(
            &CreateTaskRequest::new("With file", "g1", "b1", "p1"),
            file.path(),
            UploadFileType::File,
        )
        .unwrap();
    let description = session.get_json_document(&created.task().document).unwrap();
    let name = file.path().file_name().unwrap().to_string_lossy().into_owned();
    assert!(description.contains_text(&name));
}

#[test]
fn missing_upload_fails_before_sending() {
    let session = session(start_server());
    let err = session
        .upload_file("/definitely/not/here.pdf", UploadFileType::Pdf)
        .unwrap_err();
    assert!(matches!(err, VaizError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
}

#[test]
fn comments_round_trip() {
    let session = session(start_server());
    let id = new_document(&session, "Discussion");

    let posted = session
        .post_comment(&PostCommentRequest::new(id.clone(), "<p>looks good</p>"))
        .unwrap();
    let comments = session.get_comments(&id).unwrap();
    assert_eq!(comments.comments().len(), 1);
    assert_eq!(comments.comments()[0].id, posted.comment().id);

    session.delete_comment(&posted.comment().id).unwrap();
    assert!(session.get_comments(&id).unwrap().comments().is_empty());
}
