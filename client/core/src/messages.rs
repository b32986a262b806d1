//! Conversation Primitives
//!
//! Small value types shared by the conversation, the session controller and
//! any surface that renders them.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Unique identifier for a turn in a conversation
///
/// Ids are process-unique and never reused, so a replacement turn can always
/// be told apart from the one it replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TurnId(u64);

impl TurnId {
    /// Allocate a fresh turn ID
    #[must_use]
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "turn_{}", self.0)
    }
}

/// Who authored a turn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The signed-in user
    User,
    /// The knowledge-base assistant
    Bot,
}

impl Sender {
    /// Label shown in front of a turn
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::User => "You: ",
            Self::Bot => "Assistant: ",
        }
    }
}

/// Whether the session is free to accept another question
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No request outstanding
    #[default]
    Idle,
    /// A chat request is in flight; further submits are refused
    AwaitingBackend,
}

impl SessionState {
    /// True while a request is outstanding
    #[must_use]
    pub fn is_busy(self) -> bool {
        matches!(self, Self::AwaitingBackend)
    }

    /// Short status-bar description
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::AwaitingBackend => "Thinking...",
        }
    }
}
