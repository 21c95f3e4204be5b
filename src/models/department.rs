//! Department and assignment models.

use serde::{Deserialize, Serialize};

/// A municipal department that can own issues.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: i64,
    pub name: String,
}

/// Link from an issue to the department (and optionally staff member) handling it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: i64,
    pub issue_id: i64,
    pub department_id: i64,
    #[serde(default)]
    pub department_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub assigned_at: String,
}

/// Request body for assigning an issue. A department is mandatory.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignIssueRequest {
    pub department_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AssignIssueRequest {
    /// Blank notes are dropped rather than sent.
    pub fn new(department_id: i64, staff_id: Option<i64>, notes: Option<String>) -> Self {
        let notes = notes.filter(|n| !n.trim().is_empty());
        Self {
            department_id,
            staff_id,
            notes,
        }
    }
}
