//! Error handling module for the civic issue client.
//!
//! Every failure surfaced by the client is classified into [`ClientError`]; each variant
//! carries a stable machine-readable code alongside its message.

use std::fmt;

use thiserror::Error;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const MISSING_CREDENTIALS: &str = "MISSING_CREDENTIALS";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const OPERATION_FAILED: &str = "OPERATION_FAILED";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// The backend operation a request belonged to, used to name generic failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Login,
    Signup,
    FetchIssues,
    FetchIssue,
    ReportIssue,
    DeleteIssue,
    FetchComments,
    AddComment,
    DeleteComment,
    Upvote,
    RemoveUpvote,
    FetchCurrentUser,
    FetchStaff,
    FetchDepartments,
    AssignIssue,
    FetchAssignments,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Login => "login",
            OperationKind::Signup => "signup",
            OperationKind::FetchIssues => "fetch issues",
            OperationKind::FetchIssue => "fetch issue",
            OperationKind::ReportIssue => "report issue",
            OperationKind::DeleteIssue => "delete issue",
            OperationKind::FetchComments => "fetch comments",
            OperationKind::AddComment => "add comment",
            OperationKind::DeleteComment => "delete comment",
            OperationKind::Upvote => "upvote issue",
            OperationKind::RemoveUpvote => "remove upvote",
            OperationKind::FetchCurrentUser => "fetch current user",
            OperationKind::FetchStaff => "fetch staff users",
            OperationKind::FetchDepartments => "fetch departments",
            OperationKind::AssignIssue => "assign issue",
            OperationKind::FetchAssignments => "fetch assignments",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client error type.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Login attempted with an empty email or password
    #[error("email and password are required")]
    MissingCredentials,
    /// The backend rejected the credentials at login
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Session absent or expired
    #[error("unauthorized")]
    Unauthorized,
    /// Any other non-success status for an operation
    #[error("failed to {kind} (HTTP {status})")]
    OperationFailed { kind: OperationKind, status: u16 },
    /// Input rejected before any request was made
    #[error("{0}")]
    Validation(String),
    /// Connection, timeout or body decoding failure
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// Session store failure
    #[error("session store error: {0}")]
    Storage(String),
    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::MissingCredentials => codes::MISSING_CREDENTIALS,
            ClientError::InvalidCredentials => codes::INVALID_CREDENTIALS,
            ClientError::Unauthorized => codes::UNAUTHORIZED,
            ClientError::OperationFailed { .. } => codes::OPERATION_FAILED,
            ClientError::Validation(_) => codes::VALIDATION_ERROR,
            ClientError::Transport(_) => codes::TRANSPORT_ERROR,
            ClientError::Storage(_) => codes::STORAGE_ERROR,
            ClientError::Config(_) => codes::CONFIG_ERROR,
        }
    }

    /// The operation a generic failure belongs to, if any.
    pub fn operation(&self) -> Option<OperationKind> {
        match self {
            ClientError::OperationFailed { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Whether the caller should treat the session as gone.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthorized | ClientError::InvalidCredentials
        )
    }
}

impl From<sqlx::Error> for ClientError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Session store error: {:?}", err);
        ClientError::Storage(err.to_string())
    }
}
