//! REST API client.
//!
//! Single point of contact with the backend. Attaches the stored session credential,
//! classifies HTTP failures into [`ClientError`] and decodes typed payloads.

mod assignments;
mod auth;
mod comments;
mod issues;

use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::auth::{authorization_value, keys};
use crate::config::Config;
use crate::db::SessionStore;
use crate::errors::{ClientError, OperationKind};

/// Typed client for the issue tracker backend.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Build a client from configuration with its own HTTP connection pool.
    pub fn new(config: &Config, store: Arc<dyn SessionStore>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        Ok(Self::with_http(http, &config.api_url, store))
    }

    /// Build a client around an existing `reqwest::Client`.
    pub fn with_http(http: reqwest::Client, base_url: &str, store: Arc<dyn SessionStore>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request, attaching the session credential if one is stored.
    async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let mut builder = self
            .http
            .request(method, self.url(path))
            .header(ACCEPT, "application/json");

        if let Some(token) = self.store.get(keys::AUTH_TOKEN).await? {
            builder = builder.header(AUTHORIZATION, authorization_value(&token));
        }
        Ok(builder)
    }

    /// Send and classify; the response is returned only on success.
    async fn send(
        &self,
        builder: RequestBuilder,
        kind: OperationKind,
    ) -> Result<Response, ClientError> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(operation = %kind, error = %e, "Request failed in transport");
            ClientError::from(e)
        })?;
        check_status(response.status(), kind)?;
        Ok(response)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        kind: OperationKind,
    ) -> Result<T, ClientError> {
        let response = self.send(builder, kind).await?;
        Ok(response.json::<T>().await?)
    }

    /// Id of the logged-in user, when the profile has been fetched.
    async fn user_id(&self) -> Result<Option<i64>, ClientError> {
        let raw = self.store.get(keys::USER_ID).await?;
        Ok(raw.and_then(|id| id.parse().ok()))
    }
}

/// Map a response status onto the error taxonomy shared by authenticated calls.
fn check_status(status: StatusCode, kind: OperationKind) -> Result<(), ClientError> {
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::UNAUTHORIZED {
        tracing::warn!(operation = %kind, "Backend rejected the session credential");
        return Err(ClientError::Unauthorized);
    }
    tracing::warn!(operation = %kind, status = status.as_u16(), "Request failed");
    Err(ClientError::OperationFailed {
        kind,
        status: status.as_u16(),
    })
}
