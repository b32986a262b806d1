//! Backend Traits
//!
//! Trait definitions for the knowledge-base service. The session controller
//! only sees [`ChatBackend`]; sign-in flows only see [`AuthBackend`].
//!
//! Implementations handle transport details (URLs, headers, timeouts) and
//! report every failure as a [`BackendError`].

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::wire::{AuthSuccess, ChatReply, ChatRequest, LoginRequest, SignupRequest};

/// Opaque credential issued at sign-in
///
/// Debug output never shows the token itself.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token string
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token, for building the `Authorization` header
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full `Authorization` header value
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Ways a backend call can fail
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BackendError {
    /// Could not reach the service, or the connection dropped
    #[error("network error: {0}")]
    Network(String),

    /// Service answered with a non-success HTTP status
    #[error("backend returned status {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Server-supplied `detail` message, if it sent one
        detail: Option<String>,
    },

    /// Response body did not match the expected shape
    #[error("malformed response: {0}")]
    Decode(String),

    /// Service answered 2xx but reported a non-success status
    #[error("request rejected with status {0:?}")]
    Rejected(String),
}

impl BackendError {
    /// Human-readable message the server attached to the failure
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status {
                detail: Some(detail),
                ..
            } => Some(detail),
            _ => None,
        }
    }

    /// True for transport-level failures
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode(error.to_string())
        } else if let Some(status) = error.status() {
            Self::Status {
                status: status.as_u16(),
                detail: None,
            }
        } else {
            Self::Network(error.to_string())
        }
    }
}

/// The chat endpoint of the knowledge-base service
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Check if the service is reachable
    async fn health_check(&self) -> bool {
        true
    }

    /// Ask one question and wait for the complete answer
    async fn chat(
        &self,
        request: &ChatRequest,
        token: &BearerToken,
    ) -> Result<ChatReply, BackendError>;
}

/// The account endpoints of the knowledge-base service
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Exchange credentials for a token
    async fn login(&self, request: &LoginRequest) -> Result<AuthSuccess, BackendError>;

    /// Create an account and sign straight in
    async fn signup(&self, request: &SignupRequest) -> Result<AuthSuccess, BackendError>;
}
