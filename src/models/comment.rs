//! Comment model matching the backend comment resource.

use serde::{Deserialize, Serialize};

/// A comment left on an issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub issue_id: i64,
    pub author_id: i64,
    #[serde(default)]
    pub author_name: String,
    pub content: String,
    #[serde(default)]
    pub created_at: String,
    /// Display tag such as "citizen" or "staff"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Request body for adding a comment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: String,
    pub author_id: i64,
}

/// Request body for casting a vote.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub voter_id: Option<i64>,
}
