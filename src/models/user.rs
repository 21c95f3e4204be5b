//! User model and the mapping from server roles to client roles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role as stored by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Citizen,
    Staff,
    Admin,
}

/// Role as the client presents it. Staff capabilities cover admins too.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClientRole {
    #[default]
    Citizen,
    Staff,
}

impl From<Role> for ClientRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Citizen => ClientRole::Citizen,
            Role::Staff => ClientRole::Staff,
            Role::Admin => ClientRole::Staff,
        }
    }
}

impl ClientRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientRole::Citizen => "citizen",
            ClientRole::Staff => "staff",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "citizen" => Some(ClientRole::Citizen),
            "staff" => Some(ClientRole::Staff),
            _ => None,
        }
    }

    pub fn is_staff(&self) -> bool {
        matches!(self, ClientRole::Staff)
    }
}

impl fmt::Display for ClientRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Request body for registering a new account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub requested_role: Role,
    /// Justification for a staff request; sent as null for citizens
    pub reason: Option<String>,
}
