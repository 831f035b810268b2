//! Comment models: `postComment`, `getComments`, `editComment`,
//! `deleteComment`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::upload::UploadedFile;
use super::ApiResponse;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentReaction {
    #[serde(rename = "_id")]
    pub db_id: String,
    /// Emoji id, e.g. `thumbs_up`.
    pub id: String,
    pub native: String,
    pub member_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    pub document_id: String,
    pub author_id: String,
    /// HTML body.
    pub content: String,
    #[serde(default)]
    pub files: Vec<UploadedFile>,
    #[serde(default)]
    pub reactions: Vec<CommentReaction>,
    #[serde(default)]
    pub reply_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub edited_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub has_removed_files: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCommentRequest {
    pub document_id: String,
    pub content: String,
    pub file_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

impl PostCommentRequest {
    pub fn new(document_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            content: content.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCommentsRequest {
    pub document_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCommentRequest {
    pub comment_id: String,
    pub content: String,
    pub add_file_ids: Vec<String>,
    pub order_file_ids: Vec<String>,
    pub remove_file_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentRequest {
    pub comment_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentPayload {
    pub comment: Comment,
}

/// Returned by post, edit and delete.
pub type CommentResponse = ApiResponse<CommentPayload>;

impl CommentResponse {
    pub fn comment(&self) -> &Comment {
        &self.payload.comment
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentsPayload {
    pub comments: Vec<Comment>,
}

pub type GetCommentsResponse = ApiResponse<CommentsPayload>;

impl GetCommentsResponse {
    pub fn comments(&self) -> &[Comment] {
        &self.payload.comments
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn post_request_aliases() {
        let mut request = PostCommentRequest::new("d1", "<p>hi</p>");
        request.file_ids.push("f1".into());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"documentId": "d1", "content": "<p>hi</p>", "fileIds": ["f1"]})
        );
    }

    #[test]
    fn parses_comment_with_reactions() {
        let raw = json!({
            "_id": "c1", "documentId": "d1", "authorId": "u1", "content": "<p>x</p>",
            "reactions": [{"_id": "r1", "id": "heart", "native": "❤️", "memberIds": ["u1"]}],
            "createdAt": "2025-01-01T00:00:00.000Z", "updatedAt": "2025-01-01T00:00:00.000Z"
        });
        let comment: Comment = serde_json::from_value(raw).unwrap();
        assert_eq!(comment.reactions[0].id, "heart");
        assert!(!comment.has_removed_files);
        assert!(comment.edited_at.is_none());
    }
}
