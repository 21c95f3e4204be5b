//! Login, signup, logout and account endpoints.

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, StatusCode};

use super::ApiClient;
use crate::auth::{authorization_value, keys, Credentials, LoginOutcome, SessionState};
use crate::errors::{ClientError, OperationKind};
use crate::models::{ClientRole, Role, SignupRequest, User};

impl ApiClient {
    /// Validate credentials against the backend and persist the session.
    ///
    /// The token is checked with `GET /api/issues`. Once accepted, the profile is fetched to
    /// resolve the role; if that fetch fails the role falls back to citizen and
    /// [`LoginOutcome::role_defaulted`] is set.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, ClientError> {
        let credentials = Credentials::new(email, password)?;
        let token = credentials.token();

        tracing::info!(email, "Attempting login");

        let response = self
            .http
            .get(self.url("/api/issues"))
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, authorization_value(&token))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(email, "Login rejected: invalid credentials");
            return Err(ClientError::InvalidCredentials);
        }
        if !status.is_success() {
            tracing::warn!(email, status = status.as_u16(), "Login failed");
            return Err(ClientError::OperationFailed {
                kind: OperationKind::Login,
                status: status.as_u16(),
            });
        }

        // Drop whatever a previous session left behind before writing the new one
        self.store.remove_all(&keys::ALL).await?;
        self.store.set(keys::AUTH_TOKEN, &token).await?;
        self.store.set(keys::USER_EMAIL, email).await?;

        let outcome = match self.get_current_user().await {
            Ok(user) => LoginOutcome {
                role: ClientRole::from(user.role),
                user: Some(user),
                role_defaulted: false,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Could not resolve role; defaulting to citizen");
                LoginOutcome {
                    user: None,
                    role: ClientRole::Citizen,
                    role_defaulted: true,
                }
            }
        };

        self.store.set(keys::USER_ROLE, outcome.role.as_str()).await?;
        tracing::info!(email, role = %outcome.role, "Login successful");

        Ok(outcome)
    }

    /// Register an account.
    ///
    /// Citizen signups log in straight away and return the login outcome. Staff requests
    /// need approval, so they return `None` and leave the session untouched.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        requested_role: Role,
        reason: Option<&str>,
    ) -> Result<Option<LoginOutcome>, ClientError> {
        Credentials::new(email, password)?;
        if full_name.trim().is_empty() {
            return Err(ClientError::Validation("Full name is required".to_string()));
        }

        let body = SignupRequest {
            email: email.to_string(),
            full_name: full_name.to_string(),
            password: password.to_string(),
            requested_role,
            reason: reason.map(str::to_string),
        };

        let response = self
            .http
            .post(self.url("/api/auth/signup"))
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(email, status = status.as_u16(), "Signup failed");
            return Err(ClientError::OperationFailed {
                kind: OperationKind::Signup,
                status: status.as_u16(),
            });
        }
        tracing::info!(email, role = ?requested_role, "Signup accepted");

        match ClientRole::from(requested_role) {
            ClientRole::Citizen => self.login(email, password).await.map(Some),
            ClientRole::Staff => Ok(None),
        }
    }

    /// Forget the session. Purely local.
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.store.remove_all(&keys::ALL).await?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Read the current session from the store.
    pub async fn session(&self) -> Result<SessionState, ClientError> {
        if self.store.get(keys::AUTH_TOKEN).await?.is_none() {
            return Ok(SessionState::LoggedOut);
        }

        let email = self
            .store
            .get(keys::USER_EMAIL)
            .await?
            .unwrap_or_default();
        let role = self
            .store
            .get(keys::USER_ROLE)
            .await?
            .as_deref()
            .and_then(ClientRole::from_str)
            .unwrap_or_default();
        let user_id = self.user_id().await?;

        Ok(SessionState::LoggedIn {
            email,
            role,
            user_id,
        })
    }

    /// `GET /api/auth/me`. Remembers the user id for vote and issue calls.
    pub async fn get_current_user(&self) -> Result<User, ClientError> {
        let request = self.request(Method::GET, "/api/auth/me").await?;
        let user: User = self
            .fetch_json(request, OperationKind::FetchCurrentUser)
            .await?;

        self.store.set(keys::USER_ID, &user.id.to_string()).await?;
        Ok(user)
    }

    /// `GET /api/auth/staff`.
    pub async fn get_staff_users(&self) -> Result<Vec<User>, ClientError> {
        let request = self.request(Method::GET, "/api/auth/staff").await?;
        self.fetch_json(request, OperationKind::FetchStaff).await
    }
}
