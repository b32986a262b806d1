//! Knowledge-Base Service Integration
//!
//! This module provides access to the Q&A service through trait seams, so a
//! [`ChatSession`](crate::ChatSession) can run against the real HTTP service
//! or an in-process stand-in.
//!
//! # Available Backends
//!
//! - **HTTP**: JSON over HTTP via reqwest (default)
//!
//! # Usage
//!
//! ```ignore
//! use ragchat_core::backend::{ChatBackend, ChatRequest, HttpBackend};
//!
//! let backend = HttpBackend::new(&config)?;
//! let reply = backend.chat(&ChatRequest::new("What is a trait?"), &token).await?;
//! ```

mod http;
mod traits;
mod wire;

pub use http::HttpBackend;
pub use traits::{AuthBackend, BackendError, BearerToken, ChatBackend};
pub use wire::{
    AuthSuccess, ChatReply, ChatRequest, ErrorPayload, LoginRequest, SignupRequest, User,
    AUTH_SUCCESS_STATUS,
};
