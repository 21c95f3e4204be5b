//! Department and assignment endpoints.

use reqwest::Method;

use super::ApiClient;
use crate::errors::{ClientError, OperationKind};
use crate::models::{AssignIssueRequest, Assignment, Department};

impl ApiClient {
    /// `GET /api/departments`.
    pub async fn get_departments(&self) -> Result<Vec<Department>, ClientError> {
        let request = self.request(Method::GET, "/api/departments").await?;
        self.fetch_json(request, OperationKind::FetchDepartments)
            .await
    }

    /// `POST /api/issues/{id}/assignments` - hand an issue to a department, optionally a
    /// specific staff member.
    pub async fn assign_issue(
        &self,
        issue_id: i64,
        department_id: i64,
        staff_id: Option<i64>,
        notes: Option<String>,
    ) -> Result<Assignment, ClientError> {
        let body = AssignIssueRequest::new(department_id, staff_id, notes);
        let request = self
            .request(Method::POST, &format!("/api/issues/{}/assignments", issue_id))
            .await?
            .json(&body);
        let assignment: Assignment = self
            .fetch_json(request, OperationKind::AssignIssue)
            .await?;

        tracing::info!(
            issue_id,
            department_id,
            staff_id = ?assignment.staff_id,
            "Issue assigned"
        );
        Ok(assignment)
    }

    /// `GET /api/issues/{id}/assignments`.
    pub async fn get_assignments(&self, issue_id: i64) -> Result<Vec<Assignment>, ClientError> {
        let request = self
            .request(Method::GET, &format!("/api/issues/{}/assignments", issue_id))
            .await?;
        self.fetch_json(request, OperationKind::FetchAssignments)
            .await
    }
}
