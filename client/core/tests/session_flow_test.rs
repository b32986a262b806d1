//! Session flow tests against an in-process backend
//!
//! The backend here blocks each request on a gate, so tests can look at the
//! conversation while a question is still in flight.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use tokio::sync::Notify;

use ragchat_core::{
    BackendError, BearerToken, ChatBackend, ChatReply, ChatRequest, ChatSession, Sender,
    SessionState, SourceDetail, SubmitOutcome, TurnView, CHAT_FALLBACK_MESSAGE,
};

/// Configurable backend for exercising the session controller
struct GatedBackend {
    replies: Mutex<Vec<Result<ChatReply, BackendError>>>,
    requests: Mutex<Vec<(String, String)>>,
    calls: AtomicUsize,
    gate: Notify,
}

impl GatedBackend {
    fn new(replies: Vec<Result<ChatReply, BackendError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            gate: Notify::new(),
        })
    }

    /// Let one pending request finish
    fn release(&self) {
        self.gate.notify_one();
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatBackend for GatedBackend {
    fn name(&self) -> &str {
        "gated"
    }

    async fn chat(
        &self,
        request: &ChatRequest,
        token: &BearerToken,
    ) -> Result<ChatReply, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((request.message.clone(), token.as_str().to_string()));
        self.gate.notified().await;

        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            Err(BackendError::Network("no scripted reply".into()))
        } else {
            replies.remove(0)
        }
    }
}

fn session(backend: &Arc<GatedBackend>) -> ChatSession {
    let backend: Arc<dyn ChatBackend> = backend.clone();
    ChatSession::new(backend, BearerToken::new("secret-token"))
}

fn closures() -> SourceDetail {
    SourceDetail {
        concept: "Closures".into(),
        description: Some("Functions that capture variables".into()),
        syntax: Some("|x| x + 1".into()),
        example: None,
        related: vec!["Functions".into(), "Scope".into()],
        inferred_relations: vec!["Iterators".into()],
    }
}

#[tokio::test]
async fn test_loading_placeholder_visible_while_waiting() {
    let backend = GatedBackend::new(vec![Ok(ChatReply::text("Hi there"))]);
    let mut session = session(&backend);

    session.submit("Hello");

    // Give the request task a chance to run; it stays parked on the gate
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!session.poll());
    assert_eq!(session.state(), SessionState::AwaitingBackend);

    let views: Vec<_> = session.view().collect();
    assert_eq!(views.len(), 2);
    assert!(matches!(views[0], TurnView::User { text: "Hello", .. }));
    assert!(matches!(views[1], TurnView::Loading { .. }));

    backend.release();
    assert!(session.settle().await);

    let views: Vec<_> = session.view().collect();
    assert_eq!(views.len(), 2);
    match &views[1] {
        TurnView::Bot { blocks, detail, .. } => {
            assert_eq!(blocks.len(), 1);
            assert!(detail.is_none());
        }
        other => panic!("expected answer, got {other:?}"),
    }
}

#[tokio::test]
async fn test_request_carries_trimmed_message_and_token() {
    let backend = GatedBackend::new(vec![Ok(ChatReply::text("ok"))]);
    let mut session = session(&backend);

    backend.release();
    session.submit_and_settle("   What is a closure?  \n").await;

    let requests = backend.requests.lock().unwrap();
    assert_eq!(
        *requests,
        vec![(
            "What is a closure?".to_string(),
            "secret-token".to_string()
        )]
    );
}

#[tokio::test]
async fn test_second_submit_while_busy_is_dropped() {
    let backend = GatedBackend::new(vec![Ok(ChatReply::text("first"))]);
    let mut session = session(&backend);

    assert!(matches!(session.submit("one"), SubmitOutcome::Sent { .. }));
    assert_eq!(session.submit("two"), SubmitOutcome::Busy);
    assert_eq!(session.conversation().len(), 2);
    assert_eq!(session.conversation().loading_count(), 1);

    backend.release();
    session.settle().await;

    assert_eq!(backend.calls(), 1);
    let texts: Vec<&str> = session
        .conversation()
        .iter()
        .map(|t| t.text())
        .collect();
    assert_eq!(texts, vec!["one", "first"]);
}

#[tokio::test]
async fn test_whitespace_submit_sends_nothing() {
    let backend = GatedBackend::new(vec![]);
    let mut session = session(&backend);

    assert_eq!(session.submit(" \t\n "), SubmitOutcome::Empty);
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(backend.calls(), 0);
    assert!(session.conversation().is_empty());
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn test_answer_with_concept_panel() {
    let backend = GatedBackend::new(vec![Ok(ChatReply::text(
        "Closures are functions.\n- They capture scope\n- They can be stored",
    )
    .with_sources(closures()))]);
    let mut session = session(&backend);

    backend.release();
    session.submit_and_settle("closures?").await;

    let answer_id = session.conversation().turns()[1].id();
    assert_eq!(session.view().panel_ids(), vec![answer_id]);

    let view = session.view().nth(1).unwrap();
    let detail = view.detail().unwrap();
    assert_eq!(detail.concept, "Closures");
    assert_eq!(detail.related, ["Functions".to_string(), "Scope".to_string()]);
    assert!(!detail.expanded);

    assert_eq!(session.toggle_panel(answer_id), Some(true));
    assert!(session.view().nth(1).unwrap().detail().unwrap().expanded);
}

#[tokio::test]
async fn test_failure_then_recovery() {
    let backend = GatedBackend::new(vec![
        Err(BackendError::Status {
            status: 503,
            detail: Some("Knowledge base offline".into()),
        }),
        Ok(ChatReply::text("Back online")),
    ]);
    let mut session = session(&backend);

    backend.release();
    session.submit_and_settle("first").await;
    assert_eq!(
        session.conversation().last().unwrap().text(),
        CHAT_FALLBACK_MESSAGE
    );
    assert!(!session.is_busy());

    backend.release();
    session.submit_and_settle("second").await;

    let turns = session.conversation().turns();
    assert_eq!(turns.len(), 4);
    assert_eq!(turns[3].text(), "Back online");
    assert!(turns
        .iter()
        .filter(|t| t.sender() == Sender::User)
        .all(|t| t.sources().is_none()));
}

#[tokio::test]
async fn test_poll_picks_up_reply_without_blocking() {
    let backend = GatedBackend::new(vec![Ok(ChatReply::text("polled"))]);
    let mut session = session(&backend);
    session.submit("q");
    backend.release();

    let mut applied = false;
    for _ in 0..100 {
        if session.poll() {
            applied = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert!(applied);
    assert_eq!(session.conversation().last().unwrap().text(), "polled");
    assert_eq!(session.state(), SessionState::Idle);
}

#[tokio::test]
async fn test_reset_discards_late_reply() {
    let backend = GatedBackend::new(vec![Ok(ChatReply::text("too late"))]);
    let mut session = session(&backend);
    session.submit("q");

    session.reset();
    backend.release();
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(!session.poll());
    assert!(session.conversation().is_empty());
    assert_eq!(session.state(), SessionState::Idle);
}
