//! Issue and vote endpoints.

use reqwest::Method;

use super::ApiClient;
use crate::errors::{ClientError, OperationKind};
use crate::models::{Issue, NewIssue, Page, VoteRequest};

impl ApiClient {
    /// `GET /api/issues?page&size` - one page of issues, newest data from the backend.
    pub async fn get_issues(&self, page: u32, size: u32) -> Result<Page<Issue>, ClientError> {
        let mut query = vec![("page", page.to_string()), ("size", size.to_string())];
        if let Some(user_id) = self.user_id().await? {
            query.push(("userId", user_id.to_string()));
        }

        let request = self.request(Method::GET, "/api/issues").await?.query(&query);
        let page: Page<Issue> = self.fetch_json(request, OperationKind::FetchIssues).await?;

        tracing::debug!(
            page = page.number,
            count = page.content.len(),
            total = page.total_elements,
            "Fetched issues"
        );
        Ok(page)
    }

    /// `GET /api/issues/{id}`.
    pub async fn get_issue_by_id(&self, id: i64) -> Result<Issue, ClientError> {
        let mut request = self
            .request(Method::GET, &format!("/api/issues/{}", id))
            .await?;
        if let Some(user_id) = self.user_id().await? {
            request = request.query(&[("userId", user_id)]);
        }
        self.fetch_json(request, OperationKind::FetchIssue).await
    }

    /// `POST /api/issues` - report a new issue.
    pub async fn add_issue(&self, new_issue: &NewIssue) -> Result<Issue, ClientError> {
        new_issue.validate()?;

        let request = self
            .request(Method::POST, "/api/issues")
            .await?
            .json(new_issue);
        let issue: Issue = self.fetch_json(request, OperationKind::ReportIssue).await?;

        tracing::info!(issue_id = issue.id, category = %issue.category, "Issue reported");
        Ok(issue)
    }

    /// `DELETE /api/issues/{id}`.
    pub async fn delete_issue(&self, id: i64) -> Result<(), ClientError> {
        let request = self
            .request(Method::DELETE, &format!("/api/issues/{}", id))
            .await?;
        self.send(request, OperationKind::DeleteIssue).await?;

        tracing::info!(issue_id = id, "Issue deleted");
        Ok(())
    }

    /// `POST /api/issues/{id}/votes` as the logged-in user.
    pub async fn upvote_issue(&self, id: i64) -> Result<(), ClientError> {
        let body = VoteRequest {
            voter_id: self.user_id().await?,
        };
        let request = self
            .request(Method::POST, &format!("/api/issues/{}/votes", id))
            .await?
            .json(&body);
        self.send(request, OperationKind::Upvote).await?;
        Ok(())
    }

    /// `DELETE /api/issues/{id}/votes?voterId`.
    pub async fn remove_upvote(&self, id: i64) -> Result<(), ClientError> {
        let mut request = self
            .request(Method::DELETE, &format!("/api/issues/{}/votes", id))
            .await?;
        if let Some(voter_id) = self.user_id().await? {
            request = request.query(&[("voterId", voter_id)]);
        }
        self.send(request, OperationKind::RemoveUpvote).await?;
        Ok(())
    }
}
