//! Ragchat Core - Headless Chat Controller for a Knowledge-Base Q&A Service
//!
//! This crate holds the client-side logic for talking to a retrieval-augmented
//! Q&A backend, completely independent of any UI framework. A terminal UI,
//! a web front end, or a test harness can all drive the same [`ChatSession`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                           UI Surfaces                             │
//! │   ┌───────────┐   ┌──────────────┐   ┌───────────────────────┐   │
//! │   │    TUI    │   │   Web / GUI  │   │   Headless / Tests    │   │
//! │   │ (ratatui) │   │              │   │                       │   │
//! │   └─────┬─────┘   └──────┬───────┘   └───────────┬───────────┘   │
//! │         └────────────────┼───────────────────────┘               │
//! │                 submit / poll / view                              │
//! └──────────────────────────┼───────────────────────────────────────┘
//!                            │
//! ┌──────────────────────────┼───────────────────────────────────────┐
//! │                     RAGCHAT CORE                                  │
//! │  ┌───────────────────────┴──────────────────────────────────┐    │
//! │  │                     ChatSession                           │    │
//! │  │  ┌──────────────┐  ┌─────────────┐  ┌──────────────────┐ │    │
//! │  │  │ Conversation │  │   Panels    │  │   ChatBackend    │ │    │
//! │  │  │   (turns)    │  │ (expanded)  │  │  (HTTP / mock)   │ │    │
//! │  │  └──────────────┘  └─────────────┘  └──────────────────┘ │    │
//! │  └──────────────────────────────────────────────────────────┘    │
//! │        auth (login / signup)          config (layered)            │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ChatSession`]: Owns the conversation and runs one request at a time
//! - [`Conversation`]: Ordered, append-mostly list of [`ChatTurn`]s
//! - [`ConversationView`]: Lazily projects turns into renderable [`TurnView`]s
//! - [`ChatBackend`] / [`AuthBackend`]: Seams to the knowledge-base service
//! - [`ClientConfig`]: Layered configuration (defaults, file, env, CLI)
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use ragchat_core::{auth, ChatSession, ClientConfig, HttpBackend, LoginForm};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::load()?;
//!     let backend = Arc::new(HttpBackend::new(&config)?);
//!
//!     let form = LoginForm::new("alice", "Secret123");
//!     let signed_in = auth::login(backend.as_ref(), &form).await?;
//!
//!     let mut session = ChatSession::new(backend, signed_in.token);
//!     session.submit("What is a closure?");
//!     session.settle().await;
//!
//!     for turn in session.view() {
//!         println!("{turn:?}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod backend;
pub mod config;
pub mod conversation;
pub mod format;
pub mod messages;
pub mod session;
pub mod view;

pub use auth::{AuthError, AuthSession, LoginForm, PasswordStrength, SignupForm, ValidationError};
pub use backend::{
    AuthBackend, BackendError, BearerToken, ChatBackend, ChatReply, ChatRequest, HttpBackend,
};
pub use config::{ClientConfig, ConfigError, ConfigOverrides, ConfigSource};
pub use conversation::{ChatTurn, Conversation, SourceDetail, CHAT_FALLBACK_MESSAGE};
pub use format::{format_bot_text, TextBlock};
pub use messages::{Sender, SessionState, TurnId};
pub use session::{ChatSession, SubmitOutcome};
pub use view::{ConversationView, DetailPanel, PanelVisibility, TurnView};
