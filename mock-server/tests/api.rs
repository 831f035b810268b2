use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, app_with_key, API_KEY};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn rpc(endpoint: &str, body: Value) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(format!("/{endpoint}"))
        .header(http::header::AUTHORIZATION, format!("Bearer {API_KEY}"))
        .header("current-space-id", "space-1")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

async fn call(app: &Router, endpoint: &str, body: Value) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(rpc(endpoint, body)).await.unwrap();
    let status = resp.status();
    (status, body_json(resp).await)
}

async fn new_document(app: &Router) -> String {
    let (status, body) = call(
        app,
        "createDocument",
        json!({"kind": "Space", "kindId": "space-1", "title": "Notes", "index": 0}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["payload"]["document"]["_id"].as_str().unwrap().to_string()
}

fn stored_blocks(body: &Value) -> Vec<Value> {
    let raw = body["payload"]["json"].as_str().unwrap();
    let doc: Value = serde_json::from_str(raw).unwrap();
    assert_eq!(doc["default"]["type"], "doc");
    doc["default"]["content"].as_array().unwrap().clone()
}

// --- auth ---

#[tokio::test]
async fn missing_token_is_rejected() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/getProfile")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["code"], "JwtIncorrect");
}

#[tokio::test]
async fn router_checks_its_own_key() {
    let app = app_with_key("other-key");
    let (status, body) = call(&app, "getProfile", json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["meta"]["description"], "Token is incorrect");
}

#[tokio::test]
async fn profile_is_served() {
    let (status, body) = call(&app(), "getProfile", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "GetProfile");
    assert_eq!(body["payload"]["profile"]["avatarMode"], 2);
}

// --- documents ---

#[tokio::test]
async fn new_document_is_empty() {
    let app = app();
    let id = new_document(&app).await;

    let (status, body) = call(&app, "getJSONDocument", json!({"documentId": id})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "GetJSONDocument");
    assert!(stored_blocks(&body).is_empty());
}

#[tokio::test]
async fn replace_then_append_json_content() {
    let app = app();
    let id = new_document(&app).await;
    let first = json!([{"type": "paragraph", "content": [{"type": "text", "text": "one"}]}]);
    let second = json!([{"type": "horizontalRule"}]);

    let (status, _) = call(
        &app,
        "replaceJSONDocument",
        json!({"documentId": id, "content": first.to_string()}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    call(
        &app,
        "appendJSONDocument",
        json!({"documentId": id, "content": second.to_string()}),
    )
    .await;

    let (_, body) = call(&app, "getJSONDocument", json!({"documentId": id})).await;
    let blocks = stored_blocks(&body);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0]["content"][0]["text"], "one");
    assert_eq!(blocks[1]["type"], "horizontalRule");
}

#[tokio::test]
async fn replace_json_rejects_non_list_content() {
    let app = app();
    let id = new_document(&app).await;
    let (status, body) = call(
        &app,
        "replaceJSONDocument",
        json!({"documentId": id, "content": "{\"type\":\"doc\"}"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "ValidationError");
    assert_eq!(body["error"]["fields"], json!(["content"]));
}

#[tokio::test]
async fn plain_description_becomes_paragraphs() {
    let app = app();
    let id = new_document(&app).await;
    call(&app, "replaceDocument", json!({"documentId": id, "description": "a\nb"})).await;
    call(&app, "appendDocument", json!({"documentId": id, "description": "c"})).await;

    let (_, body) = call(&app, "getJSONDocument", json!({"documentId": id})).await;
    let texts: Vec<String> = stored_blocks(&body)
        .iter()
        .map(|b| b["content"][0]["text"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(texts, ["a", "b", "c"]);
}

#[tokio::test]
async fn unknown_document_is_not_found() {
    let (status, body) = call(&app(), "getJSONDocument", json!({"documentId": "nope"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NotFound");
}

#[tokio::test]
async fn documents_are_listed_by_scope_and_renamed() {
    let app = app();
    let id = new_document(&app).await;
    call(&app, "editDocument", json!({"documentId": id, "title": "Renamed"})).await;

    let (_, body) = call(&app, "getDocuments", json!({"kind": "Space", "kindId": "space-1"})).await;
    let documents = body["payload"]["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["title"], "Renamed");

    let (_, body) = call(&app, "getDocuments", json!({"kind": "Project", "kindId": "space-1"})).await;
    assert!(body["payload"]["documents"].as_array().unwrap().is_empty());
}

// --- tasks ---

fn task_body(name: &str) -> Value {
    json!({"name": name, "group": "g1", "board": "b1", "project": "p1", "priority": 2, "description": "details"})
}

#[tokio::test]
async fn task_create_get_edit() {
    let app = app();
    let (status, body) = call(&app, "createTask", task_body("First")).await;
    assert_eq!(status, StatusCode::OK);
    let task = &body["payload"]["task"];
    assert_eq!(task["hrid"], "TSK-1");
    assert_eq!(task["priority"], 2);
    let document = task["document"].as_str().unwrap().to_string();

    let (_, body) = call(&app, "getTask", json!({"slug": "TSK-1"})).await;
    assert_eq!(body["payload"]["task"]["name"], "First");

    let (_, body) = call(&app, "editTask", json!({"taskId": "TSK-1", "completed": true})).await;
    assert_eq!(body["payload"]["task"]["completed"], true);
    assert_eq!(body["payload"]["task"]["name"], "First");

    let (_, body) = call(&app, "getJSONDocument", json!({"documentId": document})).await;
    assert_eq!(stored_blocks(&body)[0]["content"][0]["text"], "details");
}

#[tokio::test]
async fn get_tasks_pages_and_filters() {
    let app = app();
    for i in 0..3 {
        call(&app, "createTask", task_body(&format!("t{i}"))).await;
    }
    call(&app, "editTask", json!({"taskId": "TSK-2", "completed": true})).await;

    let (_, body) = call(&app, "getTasks", json!({"limit": 2, "skip": 1})).await;
    let names: Vec<&str> = body["payload"]["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["t1", "t2"]);

    let (_, body) = call(&app, "getTasks", json!({"completed": false})).await;
    assert_eq!(body["payload"]["tasks"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn bad_priority_is_a_validation_error() {
    let mut body = task_body("x");
    body["priority"] = json!(7);
    let (status, body) = call(&app(), "createTask", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["fields"], json!(["priority"]));
}

// --- comments ---

#[tokio::test]
async fn comment_lifecycle() {
    let app = app();
    let id = new_document(&app).await;

    let (_, body) = call(&app, "postComment", json!({"documentId": id, "content": "<p>hi</p>", "fileIds": []})).await;
    let comment_id = body["payload"]["comment"]["_id"].as_str().unwrap().to_string();

    let (_, body) = call(&app, "editComment", json!({"commentId": comment_id, "content": "<p>edited</p>"})).await;
    assert_eq!(body["payload"]["comment"]["content"], "<p>edited</p>");
    assert!(!body["payload"]["comment"]["editedAt"].is_null());

    let (_, body) = call(&app, "getComments", json!({"documentId": id})).await;
    assert_eq!(body["payload"]["comments"].as_array().unwrap().len(), 1);

    call(&app, "deleteComment", json!({"commentId": comment_id})).await;
    let (_, body) = call(&app, "getComments", json!({"documentId": id})).await;
    assert!(body["payload"]["comments"].as_array().unwrap().is_empty());
}

// --- uploads ---

fn multipart(boundary: &str, parts: &[(&str, Option<&str>, &str)]) -> String {
    let mut body = String::new();
    for (name, file_name, value) in parts {
        body.push_str(&format!("--{boundary}\r\n"));
        match file_name {
            Some(file_name) => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: text/plain\r\n\r\n"
            )),
            None => body.push_str(&format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")),
        }
        body.push_str(value);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{boundary}--\r\n"));
    body
}

fn upload_request(body: String) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/UploadFile")
        .header(http::header::AUTHORIZATION, format!("Bearer {API_KEY}"))
        .header(http::header::CONTENT_TYPE, "multipart/form-data; boundary=XYZ")
        .body(body)
        .unwrap()
}

#[tokio::test]
async fn upload_stores_file() {
    let body = multipart("XYZ", &[("file", Some("notes.TXT"), "hello"), ("type", None, "File")]);
    let resp = app().oneshot(upload_request(body)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let file = &body["payload"]["file"];
    assert_eq!(file["name"], "notes.TXT");
    assert_eq!(file["ext"], "txt");
    assert_eq!(file["size"], 5);
    assert_eq!(file["type"], "File");
    assert_eq!(file["mime"], "text/plain");
}

#[tokio::test]
async fn upload_without_file_part_fails() {
    let body = multipart("XYZ", &[("type", None, "Image")]);
    let resp = app().oneshot(upload_request(body)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["fields"], json!(["file"]));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let resp = app().oneshot(rpc("doesNotExist", json!({}))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
