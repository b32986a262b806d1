//! HTTP Backend Implementation
//!
//! Backend for the knowledge-base service's JSON API.
//!
//! # Service API
//!
//! - `POST /api/chat` - Ask a question (bearer token required)
//! - `POST /api/auth/login` - Exchange credentials for a token
//! - `POST /api/auth/signup` - Create an account
//! - `GET /` - Liveness probe
//!
//! Non-2xx responses carry `{"detail": "..."}`, which is surfaced through
//! [`BackendError::Status`].

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::traits::{AuthBackend, BackendError, BearerToken, ChatBackend};
use super::wire::{AuthSuccess, ChatReply, ChatRequest, ErrorPayload, LoginRequest, SignupRequest};
use crate::config::ClientConfig;

/// Knowledge-base service client
#[derive(Clone, Debug)]
pub struct HttpBackend {
    /// `POST` target for questions
    chat_url: String,
    /// `POST` target for sign-in
    login_url: String,
    /// `POST` target for account creation
    signup_url: String,
    /// `GET` target for liveness
    health_url: String,
    /// Timeout for the liveness probe only
    health_timeout: Duration,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend from resolved configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, BackendError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| BackendError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            chat_url: config.chat_url(),
            login_url: config.login_url(),
            signup_url: config.signup_url(),
            health_url: config.health_url(),
            health_timeout: config.health_timeout,
            http_client,
        })
    }

    /// POST a JSON body and decode a JSON reply
    async fn post_json<B, T>(
        &self,
        url: &str,
        body: &B,
        token: Option<&BearerToken>,
    ) -> Result<T, BackendError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.http_client.post(url).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token.as_str());
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = ErrorPayload::message_from_body(&body);
            debug!(url, status = status.as_u16(), ?detail, "Backend returned error status");
            return Err(BackendError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn authenticate<B>(&self, url: &str, body: &B) -> Result<AuthSuccess, BackendError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let success: AuthSuccess = self.post_json(url, body, None).await?;
        if success.is_success() {
            Ok(success)
        } else {
            warn!(status = %success.status, "Auth response did not report success");
            Err(BackendError::Rejected(success.status))
        }
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(&self.health_url)
            .timeout(self.health_timeout)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Health check failed");
                false
            }
        }
    }

    async fn chat(
        &self,
        request: &ChatRequest,
        token: &BearerToken,
    ) -> Result<ChatReply, BackendError> {
        self.post_json(&self.chat_url, request, Some(token)).await
    }
}

#[async_trait]
impl AuthBackend for HttpBackend {
    async fn login(&self, request: &LoginRequest) -> Result<AuthSuccess, BackendError> {
        self.authenticate(&self.login_url, request).await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthSuccess, BackendError> {
        self.authenticate(&self.signup_url, request).await
    }
}
