//! Comment endpoints.

use reqwest::Method;

use super::ApiClient;
use crate::errors::{ClientError, OperationKind};
use crate::models::{Comment, CreateCommentRequest};

impl ApiClient {
    /// `GET /api/issues/{id}/comments`.
    pub async fn get_comments_by_issue_id(&self, issue_id: i64) -> Result<Vec<Comment>, ClientError> {
        let request = self
            .request(Method::GET, &format!("/api/issues/{}/comments", issue_id))
            .await?;
        self.fetch_json(request, OperationKind::FetchComments).await
    }

    /// `POST /api/issues/{id}/comments`. Blank content is rejected locally.
    pub async fn add_comment(
        &self,
        issue_id: i64,
        content: &str,
        author_id: i64,
    ) -> Result<Comment, ClientError> {
        if content.trim().is_empty() {
            return Err(ClientError::Validation("Please enter a comment".to_string()));
        }

        let body = CreateCommentRequest {
            content: content.to_string(),
            author_id,
        };
        let request = self
            .request(Method::POST, &format!("/api/issues/{}/comments", issue_id))
            .await?
            .json(&body);
        self.fetch_json(request, OperationKind::AddComment).await
    }

    /// `DELETE /api/issues/{id}/comments/{commentId}`.
    pub async fn delete_comment(&self, issue_id: i64, comment_id: i64) -> Result<(), ClientError> {
        let request = self
            .request(
                Method::DELETE,
                &format!("/api/issues/{}/comments/{}", issue_id, comment_id),
            )
            .await?;
        self.send(request, OperationKind::DeleteComment).await?;
        Ok(())
    }
}
