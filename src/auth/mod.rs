//! HTTP Basic credential handling and session state.
//!
//! The session credential is `base64(email:password)`, sent as `Authorization: Basic <token>`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::errors::ClientError;
use crate::models::ClientRole;

/// Session store keys. All of them are cleared together on logout.
pub mod keys {
    pub const AUTH_TOKEN: &str = "authToken";
    pub const USER_EMAIL: &str = "userEmail";
    pub const USER_ROLE: &str = "userRole";
    pub const USER_ID: &str = "userId";

    pub const ALL: [&str; 4] = [AUTH_TOKEN, USER_EMAIL, USER_ROLE, USER_ID];
}

/// Scheme prefix for the Authorization header.
pub const BASIC_SCHEME: &str = "Basic";

/// Email/password pair entered at login.
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl<'a> Credentials<'a> {
    /// Reject empty input before anything touches the network.
    pub fn new(email: &'a str, password: &'a str) -> Result<Self, ClientError> {
        if email.is_empty() || password.is_empty() {
            return Err(ClientError::MissingCredentials);
        }
        Ok(Self { email, password })
    }

    /// Encode as a Basic-auth token.
    pub fn token(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.email, self.password))
    }
}

/// Authorization header value for a stored token.
pub fn authorization_value(token: &str) -> String {
    format!("{} {}", BASIC_SCHEME, token)
}

/// Where the session currently stands, as read from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn {
        email: String,
        role: ClientRole,
        user_id: Option<i64>,
    },
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, SessionState::LoggedIn { .. })
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    /// Profile fetched after the credential was accepted, if that fetch worked
    pub user: Option<crate::models::User>,
    pub role: ClientRole,
    /// True when the profile could not be fetched and the role fell back to citizen
    pub role_defaulted: bool,
}
