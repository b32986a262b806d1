//! Chat Session Controller
//!
//! [`ChatSession`] owns one signed-in conversation and enforces its one rule:
//! at most one question is in flight at a time.
//!
//! # Request Lifecycle
//!
//! ```text
//!   submit("q")                       poll() / settle()
//!  ─────────────┐                   ┌──────────────────────────────┐
//!  push User    │   spawned task    │ replace Loading by id with:  │
//!  clear input  │ ───────────────▶  │   Ok(reply) → Bot answer     │
//!  busy = true  │   oneshot reply   │   Err(_)    → fallback text  │
//!  push Loading │                   │ busy = false                 │
//!  ─────────────┘                   └──────────────────────────────┘
//! ```
//!
//! [`submit`](ChatSession::submit) returns immediately so a UI loop keeps
//! drawing. The surface then calls [`poll`](ChatSession::poll) every tick,
//! or awaits [`settle`](ChatSession::settle) when it has nothing else to do.

use std::sync::Arc;

use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, info, warn};

use crate::backend::{BackendError, BearerToken, ChatBackend, ChatReply, ChatRequest};
use crate::conversation::{ChatTurn, Conversation};
use crate::messages::{SessionState, TurnId};
use crate::view::{ConversationView, PanelVisibility};

type ChatResult = Result<ChatReply, BackendError>;

/// What happened to a submit call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The question was appended and a request started
    Sent {
        /// The user's turn
        user: TurnId,
        /// The loading placeholder that the answer will replace
        loading: TurnId,
    },
    /// Input was empty after trimming; nothing changed
    Empty,
    /// A request is already in flight; nothing changed
    Busy,
}

/// The outstanding request
#[derive(Debug)]
struct InFlight {
    loading_id: TurnId,
    reply_rx: oneshot::Receiver<ChatResult>,
}

/// One signed-in conversation with the knowledge base
pub struct ChatSession {
    backend: Arc<dyn ChatBackend>,
    token: BearerToken,
    conversation: Conversation,
    panels: PanelVisibility,
    pending_input: String,
    state: SessionState,
    in_flight: Option<InFlight>,
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("backend", &self.backend.name())
            .field("turns", &self.conversation.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl ChatSession {
    /// Start an empty conversation
    pub fn new(backend: Arc<dyn ChatBackend>, token: BearerToken) -> Self {
        Self {
            backend,
            token,
            conversation: Conversation::new(),
            panels: PanelVisibility::new(),
            pending_input: String::new(),
            state: SessionState::Idle,
            in_flight: None,
        }
    }

    // ============================================
    // Submitting
    // ============================================

    /// Ask a question
    ///
    /// On [`SubmitOutcome::Sent`] the user turn and a loading placeholder are
    /// already in the conversation, the pending input is cleared, and the
    /// session is busy until [`poll`](Self::poll) or [`settle`](Self::settle)
    /// sees the reply. Outside a Tokio runtime the request cannot be sent,
    /// so the placeholder is settled with the fallback answer right away.
    pub fn submit(&mut self, raw: &str) -> SubmitOutcome {
        if self.state.is_busy() {
            debug!("Submit ignored: request already in flight");
            return SubmitOutcome::Busy;
        }

        let message = raw.trim();
        if message.is_empty() {
            return SubmitOutcome::Empty;
        }
        let message = message.to_string();

        let user = self.conversation.push(ChatTurn::user(message.clone()));
        self.pending_input.clear();
        self.state = SessionState::AwaitingBackend;
        let loading = self.conversation.push(ChatTurn::loading());

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            self.finalize(
                loading,
                Err(BackendError::Network("no async runtime to send on".to_string())),
            );
            return SubmitOutcome::Sent { user, loading };
        };

        let (reply_tx, reply_rx) = oneshot::channel();
        let backend = Arc::clone(&self.backend);
        let token = self.token.clone();
        runtime.spawn(async move {
            let request = ChatRequest::new(message);
            let result = backend.chat(&request, &token).await;
            // Receiver is gone if the session was reset meanwhile
            let _ = reply_tx.send(result);
        });

        self.in_flight = Some(InFlight {
            loading_id: loading,
            reply_rx,
        });
        info!(%user, %loading, "Question sent");

        SubmitOutcome::Sent { user, loading }
    }

    /// Submit whatever is in the pending input buffer
    pub fn submit_pending(&mut self) -> SubmitOutcome {
        let input = self.pending_input.clone();
        self.submit(&input)
    }

    /// Submit and wait for the answer to land
    pub async fn submit_and_settle(&mut self, raw: &str) -> SubmitOutcome {
        let outcome = self.submit(raw);
        if matches!(outcome, SubmitOutcome::Sent { .. }) {
            self.settle().await;
        }
        outcome
    }

    // ============================================
    // Completing
    // ============================================

    /// Apply the reply if it has arrived, without waiting
    ///
    /// Returns true if the conversation changed.
    pub fn poll(&mut self) -> bool {
        let Some(in_flight) = self.in_flight.as_mut() else {
            return false;
        };

        let result = match in_flight.reply_rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Closed) => Err(request_task_lost()),
        };

        let loading_id = in_flight.loading_id;
        self.in_flight = None;
        self.finalize(loading_id, result);
        true
    }

    /// Wait for the outstanding reply and apply it
    ///
    /// Returns false immediately if nothing is in flight. Cancel-safe: if
    /// the future is dropped, the reply can still be picked up later.
    pub async fn settle(&mut self) -> bool {
        let Some(in_flight) = self.in_flight.as_mut() else {
            return false;
        };

        let result = (&mut in_flight.reply_rx)
            .await
            .unwrap_or_else(|_| Err(request_task_lost()));

        let loading_id = in_flight.loading_id;
        self.in_flight = None;
        self.finalize(loading_id, result);
        true
    }

    fn finalize(&mut self, loading_id: TurnId, result: ChatResult) {
        let turn = match result {
            Ok(reply) => {
                debug!(
                    chars = reply.response.len(),
                    concept = reply.sources.as_ref().map(|s| s.concept.as_str()),
                    "Answer received"
                );
                ChatTurn::bot(reply.response, reply.sources)
            }
            Err(e) => {
                warn!(error = %e, "Chat request failed, showing fallback");
                ChatTurn::fallback()
            }
        };

        if !self.conversation.replace(loading_id, turn) {
            warn!(%loading_id, "Loading turn missing at completion");
        }
        self.state = SessionState::Idle;
    }

    // ============================================
    // Panels
    // ============================================

    /// Expand or collapse the concept panel of an answer
    ///
    /// Returns the new state, or `None` if `id` is not an answer with a
    /// concept panel.
    pub fn toggle_panel(&mut self, id: TurnId) -> Option<bool> {
        let has_panel = self
            .conversation
            .get(id)
            .and_then(ChatTurn::sources)
            .is_some_and(|s| s.has_concept());
        has_panel.then(|| self.panels.toggle(id))
    }

    /// Current panel visibility
    #[must_use]
    pub fn panels(&self) -> &PanelVisibility {
        &self.panels
    }

    // ============================================
    // Input Buffer
    // ============================================

    /// Text typed but not yet submitted
    #[must_use]
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Replace the pending input
    pub fn set_pending_input(&mut self, input: impl Into<String>) {
        self.pending_input = input.into();
    }

    /// Append a character to the pending input
    pub fn push_input(&mut self, c: char) {
        self.pending_input.push(c);
    }

    /// Remove the last character of the pending input
    pub fn pop_input(&mut self) -> Option<char> {
        self.pending_input.pop()
    }

    // ============================================
    // Queries
    // ============================================

    /// The conversation so far
    #[must_use]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Renderable projection of the conversation
    #[must_use]
    pub fn view(&self) -> ConversationView<'_> {
        ConversationView::new(&self.conversation, &self.panels)
    }

    /// Idle or awaiting the backend
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// True while a request is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Name of the backend, for status lines
    #[must_use]
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Discard the conversation, panels, input and any outstanding request
    pub fn reset(&mut self) {
        if self.in_flight.take().is_some() {
            debug!("Dropping in-flight request on reset");
        }
        self.conversation.clear();
        self.panels.clear();
        self.pending_input.clear();
        self.state = SessionState::Idle;
    }
}

fn request_task_lost() -> BackendError {
    BackendError::Network("chat request ended without a reply".to_string())
}
