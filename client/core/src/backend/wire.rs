//! Wire Types
//!
//! JSON bodies exchanged with the knowledge-base service.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::traits::BearerToken;
use crate::conversation::SourceDetail;

/// `status` value of a successful auth response
pub const AUTH_SUCCESS_STATUS: &str = "success";

/// Body of `POST /api/chat`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The question, already trimmed
    pub message: String,
}

impl ChatRequest {
    /// Create a request for one question
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Successful chat response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Answer text
    pub response: String,
    /// Concept metadata, absent or `null` when nothing matched
    #[serde(default)]
    pub sources: Option<SourceDetail>,
}

impl ChatReply {
    /// Answer with no concept metadata
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            sources: None,
        }
    }

    /// Attach concept metadata
    #[must_use]
    pub fn with_sources(mut self, sources: SourceDetail) -> Self {
        self.sources = Some(sources);
        self
    }
}

/// Body of `POST /api/auth/login`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account name
    pub username: String,
    /// Password, sent verbatim
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /api/auth/signup`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    /// Requested account name
    pub username: String,
    /// Contact address
    pub email: String,
    /// Password, sent verbatim
    pub password: String,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account details returned at sign-in
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Account name
    pub username: String,
    /// Contact address
    #[serde(default)]
    pub email: String,
}

/// Successful login or signup response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSuccess {
    /// `"success"` on success
    pub status: String,
    /// The signed-in account
    pub user: User,
    /// Credential for later chat requests
    pub token: BearerToken,
    /// Optional greeting
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthSuccess {
    /// Whether the service reported success
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == AUTH_SUCCESS_STATUS
    }
}

/// Error body the service sends with non-2xx responses
///
/// Validation failures carry a list in `detail`; only string details are
/// meant for people.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorPayload {
    /// String message or structured validation errors
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorPayload {
    /// The detail message, if it is a plain string
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.detail.as_ref().and_then(serde_json::Value::as_str)
    }

    /// Extract the detail message from a raw error body
    #[must_use]
    pub fn message_from_body(body: &str) -> Option<String> {
        serde_json::from_str::<Self>(body)
            .ok()
            .and_then(|payload| payload.message().map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_chat_reply_with_sources() {
        let json = r#"{
            "response": "Closures capture their environment.",
            "sources": {
                "concept": "Closures",
                "syntax": "|x| x + 1",
                "related": ["Functions"],
                "inferred_relations": ["Iterators", "Traits"]
            }
        }"#;
        let reply: ChatReply = serde_json::from_str(json).unwrap();
        let sources = reply.sources.unwrap();
        assert_eq!(sources.concept, "Closures");
        assert_eq!(sources.inferred_relations, vec!["Iterators", "Traits"]);
    }

    #[test]
    fn test_chat_reply_null_sources() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"response": "Hello", "sources": null}"#).unwrap();
        assert_eq!(reply, ChatReply::text("Hello"));

        let reply: ChatReply = serde_json::from_str(r#"{"response": "Hello"}"#).unwrap();
        assert!(reply.sources.is_none());
    }

    #[test]
    fn test_chat_reply_missing_response_is_error() {
        assert!(serde_json::from_str::<ChatReply>(r#"{"sources": null}"#).is_err());
    }

    #[test]
    fn test_auth_success() {
        let json = r#"{
            "status": "success",
            "message": "Login successful",
            "user": {"username": "alice", "email": "alice@example.com"},
            "token": "tok-123"
        }"#;
        let success: AuthSuccess = serde_json::from_str(json).unwrap();
        assert!(success.is_success());
        assert_eq!(success.user.username, "alice");
        assert_eq!(success.token.as_str(), "tok-123");
    }

    #[test]
    fn test_error_payload_message() {
        assert_eq!(
            ErrorPayload::message_from_body(r#"{"detail": "Username already exists"}"#),
            Some("Username already exists".to_string())
        );
        assert_eq!(
            ErrorPayload::message_from_body(r#"{"detail": [{"loc": ["body"], "msg": "x"}]}"#),
            None
        );
        assert_eq!(ErrorPayload::message_from_body("<html>oops</html>"), None);
    }

    #[test]
    fn test_request_debug_redacts_password() {
        let request = LoginRequest {
            username: "alice".into(),
            password: "hunter22".into(),
        };
        assert!(!format!("{request:?}").contains("hunter22"));
    }
}
