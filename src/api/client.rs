use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::traits::AccountApi;
use super::types::{LoginRequest, LoginResponse, UserStatusResponse};
use crate::app::ApiConfig;
use crate::constants::{ENDPOINT_LOGIN, ENDPOINT_LOGOUT, ENDPOINT_STATUS};
use crate::utils::StackError;

/// Shared slot for the `Authorization: Bearer` default header.
///
/// The account lifecycle owns the session and writes here; the HTTP client
/// only reads a copy when building requests.
#[derive(Debug, Clone, Default)]
pub struct BearerToken(Arc<RwLock<Option<String>>>);

impl BearerToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, token: &str) {
        *self.0.write() = Some(token.to_string());
    }

    pub fn detach(&self) {
        *self.0.write() = None;
    }

    pub fn get(&self) -> Option<String> {
        self.0.read().clone()
    }

    pub fn is_attached(&self) -> bool {
        self.0.read().is_some()
    }
}

/// HTTP client for the stack API
pub struct ApiClient {
    client: Client,
    base_url: String,
    bearer: BearerToken,
}

impl ApiClient {
    /// Create a new client; `bearer` is consulted on every request
    pub fn new(config: &ApiConfig, bearer: BearerToken) -> Result<Self, StackError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request builder carrying the default headers
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.bearer.get() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, StackError> {
        let response = check_status(builder.send().await?).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Turn a non-success response into [`StackError::Http`], keeping the body
async fn check_status(response: Response) -> Result<Response, StackError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let body = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(Value::String(text))
    };
    debug!(status = status.as_u16(), %body, "API request failed");

    Err(StackError::Http {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl AccountApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, StackError> {
        Self::send_json(self.request(Method::POST, ENDPOINT_LOGIN).json(request)).await
    }

    async fn user_status(&self, token: &str) -> Result<UserStatusResponse, StackError> {
        // Explicit token only, so a stale default header never leaks in
        let builder = self
            .client
            .get(self.url(ENDPOINT_STATUS))
            .bearer_auth(token);
        Self::send_json(builder).await
    }

    async fn logout(&self) -> Result<(), StackError> {
        let response = self.request(Method::POST, ENDPOINT_LOGOUT).send().await?;
        check_status(response).await?;
        Ok(())
    }
}
