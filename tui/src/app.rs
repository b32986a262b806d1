//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, mouse, resize)
//! - Screen routing (login, signup, chat) with a sign-in guard
//! - Background auth and health requests, polled every frame
//! - Rendering of whatever the core session reports
//!
//! Chat logic lives in [`ChatSession`]; the App only forwards key presses
//! and draws the session's view.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, StatefulWidget, Widget};
use ratatui::{Frame, Terminal};
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, info, warn};

use ragchat_core::auth;
use ragchat_core::{
    AuthBackend, AuthError, AuthSession, BackendError, ChatBackend, ChatSession, ClientConfig,
    SubmitOutcome, TurnId,
};

use crate::display::{conversation_lines, welcome_lines};
use crate::forms::{masked, FormField, LoginScreen, SignupField, SignupScreen};
use crate::theme::{
    strength_color, ASSISTANT_MAGENTA, DIM_GRAY, ERROR_RED, FOCUS_CYAN, SUCCESS_GREEN, USER_GREEN,
    WARNING_YELLOW,
};
use crate::widgets::{TextBlock, TextBlockState};

/// Input box height (separator + text lines)
const INPUT_HEIGHT: u16 = 3;

/// Lines moved per mouse wheel notch
const WHEEL_LINES: usize = 3;

/// How often the backend liveness probe is repeated
const HEALTH_INTERVAL: Duration = Duration::from_secs(30);

/// Width of the login/signup card
const FORM_WIDTH: u16 = 52;

/// Which screen is showing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Sign in with an existing account
    Login,
    /// Create an account
    Signup,
    /// Ask questions (requires a signed-in account)
    Chat,
}

/// Auth request running in the background
struct PendingAuth {
    /// Screen that started it, to report errors back to
    origin: Screen,
    rx: oneshot::Receiver<Result<AuthSession, AuthError>>,
}

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// Resolved configuration
    config: ClientConfig,
    /// Current screen
    screen: Screen,

    // === Backends ===
    chat_backend: Arc<dyn ChatBackend>,
    auth_backend: Arc<dyn AuthBackend>,

    // === Account State ===
    login: LoginScreen,
    signup: SignupScreen,
    /// Signed-in account, if any
    auth: Option<AuthSession>,
    /// In-flight login or signup
    pending_auth: Option<PendingAuth>,

    // === Chat State ===
    /// Conversation for the signed-in account
    session: Option<ChatSession>,
    /// Answer whose concept panel keyboard commands target
    selected_panel: Option<TurnId>,
    /// Conversation scroll state
    conversation_state: TextBlockState,

    // === Health ===
    /// Last probe result (`None` = not yet known)
    backend_online: Option<bool>,
    health_rx: Option<oneshot::Receiver<bool>>,
    last_health_check: Option<Instant>,

    // === Misc State ===
    /// Frame counter (drives the typing indicator)
    tick: u64,
    /// Terminal size
    size: (u16, u16),
}

impl App {
    /// Create a new App on the login screen
    pub fn new(
        config: ClientConfig,
        chat_backend: Arc<dyn ChatBackend>,
        auth_backend: Arc<dyn AuthBackend>,
    ) -> Self {
        Self {
            running: true,
            config,
            screen: Screen::Login,
            chat_backend,
            auth_backend,
            login: LoginScreen::default(),
            signup: SignupScreen::default(),
            auth: None,
            pending_auth: None,
            session: None,
            selected_panel: None,
            conversation_state: TextBlockState::default(),
            backend_online: None,
            health_rx: None,
            last_health_check: None,
            tick: 0,
            size: (80, 24),
        }
    }

    /// Prefill the login username
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.login.form.username = username.into();
        self.login.focus_next();
        self
    }

    /// Run the event loop until the user quits
    ///
    /// # Errors
    ///
    /// Returns an error if drawing to the terminal fails.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let frame_duration = self.config.tick;

        // Create async event stream for non-blocking terminal events
        let mut event_stream = EventStream::new();

        // Render initial frame immediately so user sees UI
        terminal.draw(|frame| self.draw(frame))?;

        while self.running {
            tokio::select! {
                biased;

                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(e)) => warn!(error = %e, "Terminal event error"),
                    None => self.running = false,
                },

                // Frame tick - redraw for the typing indicator
                () = tokio::time::sleep(frame_duration) => {}
            }

            self.update();
            terminal.draw(|frame| self.draw(frame))?;
        }

        Ok(())
    }

    // ============================================
    // Events
    // ============================================

    /// Dispatch one terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(w, h) => self.size = (w, h),
            _ => {}
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.running = false;
                return;
            }
            KeyCode::Char('c') if ctrl => {
                self.running = false;
                return;
            }
            _ => {}
        }

        match self.screen {
            Screen::Login => self.handle_login_key(key, ctrl),
            Screen::Signup => self.handle_signup_key(key, ctrl),
            Screen::Chat => self.handle_chat_key(key, ctrl),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Char('n') if ctrl => {
                if !self.login.busy {
                    self.screen = Screen::Signup;
                }
            }
            KeyCode::Tab | KeyCode::Down => self.login.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.login.focus_prev(),
            KeyCode::Enter => {
                if self.login.can_submit() {
                    self.start_login();
                } else if !self.login.on_last_field() {
                    self.login.focus_next();
                }
            }
            KeyCode::Backspace => self.login.backspace(),
            KeyCode::Char(c) if !ctrl => self.login.insert(c),
            _ => {}
        }
    }

    fn handle_signup_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Char('l') if ctrl => {
                if !self.signup.busy {
                    self.screen = Screen::Login;
                }
            }
            KeyCode::Tab | KeyCode::Down => self.signup.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.signup.focus_prev(),
            KeyCode::Enter => {
                if self.signup.can_submit() {
                    self.start_signup();
                } else if !self.signup.on_last_field() {
                    self.signup.focus_next();
                }
            }
            KeyCode::Backspace => self.signup.backspace(),
            KeyCode::Char(c) if !ctrl => self.signup.insert(c),
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Char('o') if ctrl => self.sign_out(),
            KeyCode::Char('t') if ctrl => self.toggle_selected_panel(),
            KeyCode::Up if ctrl => self.move_panel_selection(false),
            KeyCode::Down if ctrl => self.move_panel_selection(true),

            // Conversation scrolling
            KeyCode::PageUp => {
                let page = self.conversation_state.page();
                self.conversation_state.scroll_up(page);
            }
            KeyCode::PageDown => {
                let page = self.conversation_state.page();
                self.conversation_state.scroll_down(page);
            }
            KeyCode::End if ctrl => self.conversation_state.scroll_to_bottom(),

            // Submit message
            KeyCode::Enter => {
                let Some(session) = self.session.as_mut() else {
                    return;
                };
                if let SubmitOutcome::Sent { .. } = session.submit_pending() {
                    self.conversation_state.scroll_to_bottom();
                }
            }

            // Typing is disabled while an answer is pending
            KeyCode::Backspace => {
                if let Some(session) = self.session.as_mut().filter(|s| !s.is_busy()) {
                    session.pop_input();
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(session) = self.session.as_mut().filter(|s| !s.is_busy()) {
                    session.push_input(c);
                }
            }
            _ => {}
        }
    }

    /// Handle mouse input
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.screen != Screen::Chat {
            return;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => self.conversation_state.scroll_up(WHEEL_LINES),
            MouseEventKind::ScrollDown => self.conversation_state.scroll_down(WHEEL_LINES),
            _ => {}
        }
    }

    // ============================================
    // Account Flows
    // ============================================

    fn start_login(&mut self) {
        let Some(form) = self.login.begin_submit() else {
            return;
        };
        let backend = Arc::clone(&self.auth_backend);
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let _ = tx.send(auth::login(&*backend, &form).await);
        });
        self.pending_auth = Some(PendingAuth {
            origin: Screen::Login,
            rx,
        });
    }

    fn start_signup(&mut self) {
        let Some(form) = self.signup.begin_submit() else {
            return;
        };
        let backend = Arc::clone(&self.auth_backend);
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let _ = tx.send(auth::signup(&*backend, &form).await);
        });
        self.pending_auth = Some(PendingAuth {
            origin: Screen::Signup,
            rx,
        });
    }

    fn poll_auth(&mut self) {
        let Some(pending) = self.pending_auth.as_mut() else {
            return;
        };
        let result = match pending.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Closed) => Err(AuthError::Backend {
                message: "Request was interrupted. Please try again.".to_string(),
                source: BackendError::Network("auth task ended without a reply".to_string()),
            }),
        };
        let origin = pending.origin;
        self.pending_auth = None;

        match result {
            Ok(signed_in) => self.enter_chat(signed_in),
            Err(e) => {
                debug!(error = %e, ?origin, "Auth attempt failed");
                let message = Some(e.to_string());
                match origin {
                    Screen::Signup => self.signup.finish(message),
                    Screen::Login | Screen::Chat => self.login.finish(message),
                }
            }
        }
    }

    fn enter_chat(&mut self, signed_in: AuthSession) {
        info!(username = %signed_in.username(), "Entering chat");
        // Forms hold passwords; start clean next time
        self.login = LoginScreen::default();
        self.signup = SignupScreen::default();
        self.session = Some(ChatSession::new(
            Arc::clone(&self.chat_backend),
            signed_in.token.clone(),
        ));
        self.auth = Some(signed_in);
        self.selected_panel = None;
        self.conversation_state = TextBlockState::default();
        self.screen = Screen::Chat;
    }

    /// Drop the account and its conversation, back to the login screen
    pub fn sign_out(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.reset();
        }
        if let Some(signed_in) = self.auth.take() {
            info!(username = %signed_in.username(), "Signed out");
        }
        self.selected_panel = None;
        self.conversation_state = TextBlockState::default();
        self.screen = Screen::Login;
    }

    /// The chat screen needs an account and a session
    fn enforce_route_guard(&mut self) {
        if self.screen == Screen::Chat && (self.auth.is_none() || self.session.is_none()) {
            warn!("Chat screen without a signed-in account, returning to login");
            self.screen = Screen::Login;
        }
    }

    // ============================================
    // Panels
    // ============================================

    fn move_panel_selection(&mut self, forward: bool) {
        let Some(session) = &self.session else {
            return;
        };
        let ids = session.view().panel_ids();
        let Some(last) = ids.len().checked_sub(1) else {
            self.selected_panel = None;
            return;
        };

        let current = self
            .selected_panel
            .and_then(|id| ids.iter().position(|p| *p == id));
        let next = match (current, forward) {
            (None, _) => last,
            (Some(i), true) => (i + 1).min(last),
            (Some(i), false) => i.saturating_sub(1),
        };
        self.selected_panel = Some(ids[next]);
    }

    fn toggle_selected_panel(&mut self) {
        if self.selected_panel.is_none() {
            self.move_panel_selection(false);
        }
        if let (Some(id), Some(session)) = (self.selected_panel, self.session.as_mut()) {
            session.toggle_panel(id);
        }
    }

    // ============================================
    // Per-Frame Work
    // ============================================

    /// Poll background work; call once per frame
    pub fn update(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        self.poll_auth();

        if let Some(session) = self.session.as_mut() {
            if session.poll() {
                self.conversation_state.scroll_to_bottom();
            }
        }

        self.poll_health();
        self.enforce_route_guard();
    }

    fn poll_health(&mut self) {
        if let Some(rx) = self.health_rx.as_mut() {
            match rx.try_recv() {
                Ok(online) => {
                    if self.backend_online != Some(online) {
                        info!(online, "Backend health changed");
                    }
                    self.backend_online = Some(online);
                    self.health_rx = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Closed) => self.health_rx = None,
            }
            return;
        }

        let due = self
            .last_health_check
            .map_or(true, |at| at.elapsed() >= HEALTH_INTERVAL);
        if due {
            let backend = Arc::clone(&self.chat_backend);
            let (tx, rx) = oneshot::channel();
            tokio::spawn(async move {
                let _ = tx.send(backend.health_check().await);
            });
            self.health_rx = Some(rx);
            self.last_health_check = Some(Instant::now());
        }
    }

    // ============================================
    // Queries
    // ============================================

    /// Still running?
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current screen
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Signed-in account
    #[must_use]
    pub fn account(&self) -> Option<&AuthSession> {
        self.auth.as_ref()
    }

    /// Conversation of the signed-in account
    #[must_use]
    pub fn session(&self) -> Option<&ChatSession> {
        self.session.as_ref()
    }

    /// Login screen state
    #[must_use]
    pub fn login_screen(&self) -> &LoginScreen {
        &self.login
    }

    /// Signup screen state
    #[must_use]
    pub fn signup_screen(&self) -> &SignupScreen {
        &self.signup
    }

    /// Answer targeted by panel commands
    #[must_use]
    pub fn selected_panel(&self) -> Option<TurnId> {
        self.selected_panel
    }

    /// Last known backend liveness
    #[must_use]
    pub fn backend_online(&self) -> Option<bool> {
        self.backend_online
    }

    // ============================================
    // Rendering
    // ============================================

    /// Draw the current screen
    pub fn draw(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();
        self.size = (area.width, area.height);
        let buf = frame.buffer_mut();

        match self.screen {
            Screen::Login => self.render_login(area, buf),
            Screen::Signup => self.render_signup(area, buf),
            Screen::Chat => {
                let input_and_status = INPUT_HEIGHT + 1;
                let conversation = Rect::new(
                    area.x + 1,
                    area.y,
                    area.width.saturating_sub(2),
                    area.height.saturating_sub(input_and_status),
                );
                let input = Rect::new(
                    area.x,
                    area.y + area.height.saturating_sub(input_and_status),
                    area.width,
                    INPUT_HEIGHT.min(area.height),
                );
                let status = Rect::new(
                    area.x,
                    area.y + area.height.saturating_sub(1),
                    area.width,
                    1.min(area.height),
                );
                self.render_conversation(conversation, buf);
                self.render_input(input, buf);
                self.render_status(status, buf);
            }
        }
    }

    /// Render conversation area
    fn render_conversation(&mut self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height < 3 {
            return;
        }
        let Some(session) = &self.session else {
            return;
        };
        let width = area.width as usize;

        let lines = if session.conversation().is_empty() {
            let username = self.auth.as_ref().map_or("", AuthSession::username);
            let mut banner = welcome_lines(username, width);
            // Center the banner vertically
            let pad = (area.height as usize).saturating_sub(banner.len()) / 2;
            let mut padded = vec![crate::display::StyledLine::blank(); pad];
            padded.append(&mut banner);
            padded
        } else {
            conversation_lines(session.view(), width, self.selected_panel, self.tick)
        };

        TextBlock::new(&lines).render(area, buf, &mut self.conversation_state);
    }

    /// Render input box
    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let separator = "-".repeat(area.width as usize);
        buf.set_string(area.x, area.y, &separator, Style::default().fg(DIM_GRAY));

        let text_height = area.height.saturating_sub(1) as usize;
        let text_width = area.width.saturating_sub(1) as usize;
        if text_width < 5 || text_height < 1 {
            return;
        }

        let Some(session) = &self.session else {
            return;
        };

        if session.is_busy() {
            buf.set_string(
                area.x,
                area.y + 1,
                "Waiting for the answer...",
                Style::default().fg(DIM_GRAY),
            );
            return;
        }

        let full_input = format!("You: {}_", session.pending_input());
        let wrapped = textwrap::wrap(&full_input, text_width);
        let skip = wrapped.len().saturating_sub(text_height);
        for (i, line) in wrapped.iter().skip(skip).enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let y = area.y + 1 + i as u16;
            buf.set_string(area.x, y, line, Style::default().fg(USER_GREEN));
        }

        if skip > 0 {
            buf.set_string(
                area.x + area.width.saturating_sub(3),
                area.y,
                "^",
                Style::default().fg(WARNING_YELLOW),
            );
        }
    }

    /// Render status bar
    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let Some(session) = &self.session else {
            return;
        };
        let state = session.state();

        let status_style = if state.is_busy() {
            Style::default().fg(ASSISTANT_MAGENTA)
        } else {
            Style::default().fg(DIM_GRAY)
        };

        let username = self.auth.as_ref().map_or("", AuthSession::username);
        let scroll_info = if self.conversation_state.scroll_offset > 0 {
            format!(
                " [^{} lines - PgDn to scroll]",
                self.conversation_state.scroll_offset
            )
        } else {
            String::new()
        };

        let status = format!(
            " {} | {} | {} | Ctrl+↑/↓ select · Ctrl+T details · Ctrl+O sign out · Esc quit{}",
            state.description(),
            username,
            self.backend_label(),
            scroll_info,
        );
        buf.set_string(area.x, area.y, &status, status_style);
    }

    fn backend_label(&self) -> &'static str {
        match self.backend_online {
            Some(true) => "backend online",
            Some(false) => "backend offline",
            None => "checking backend",
        }
    }

    /// Card in the middle of the screen, returning its inner area
    fn render_card(&self, area: Rect, buf: &mut Buffer, title: &str, rows: u16) -> Rect {
        let width = FORM_WIDTH.min(area.width);
        let height = (rows + 2).min(area.height);
        let card = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );
        let block = Block::bordered()
            .title(format!(" {title} "))
            .border_style(Style::default().fg(ASSISTANT_MAGENTA));
        let inner = block.inner(card);
        block.render(card, buf);

        let footer = format!(" {} ", self.backend_label());
        let color = match self.backend_online {
            Some(true) => SUCCESS_GREEN,
            Some(false) => ERROR_RED,
            None => DIM_GRAY,
        };
        if area.height > 0 {
            buf.set_string(
                area.x,
                area.y + area.height - 1,
                footer,
                Style::default().fg(color),
            );
        }
        inner
    }

    fn render_field(
        buf: &mut Buffer,
        area: Rect,
        row: &mut u16,
        label: &str,
        value: &str,
        focused: bool,
    ) {
        if *row + 1 >= area.height {
            return;
        }
        let label_style = if focused {
            Style::default().fg(FOCUS_CYAN).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DIM_GRAY)
        };
        buf.set_string(area.x + 1, area.y + *row, label, label_style);

        let pointer = if focused { "> " } else { "  " };
        let cursor = if focused { "_" } else { "" };
        let max = area.width.saturating_sub(4) as usize;
        let shown: String = {
            let text = format!("{value}{cursor}");
            let skip = text.chars().count().saturating_sub(max);
            text.chars().skip(skip).collect()
        };
        buf.set_string(
            area.x + 1,
            area.y + *row + 1,
            format!("{pointer}{shown}"),
            Style::default().fg(if focused { USER_GREEN } else { DIM_GRAY }),
        );
        *row += 3;
    }

    fn render_message_rows(
        buf: &mut Buffer,
        area: Rect,
        row: u16,
        error: Option<&str>,
        button: &str,
        enabled: bool,
        hint: &str,
    ) {
        let mut row = row;
        if let Some(error) = error {
            if row < area.height {
                for line in textwrap::wrap(error, area.width.saturating_sub(2) as usize) {
                    if row >= area.height {
                        break;
                    }
                    buf.set_string(area.x + 1, area.y + row, line, Style::default().fg(ERROR_RED));
                    row += 1;
                }
            }
        }
        row += 1;
        if row < area.height {
            let style = if enabled {
                Style::default()
                    .fg(ASSISTANT_MAGENTA)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DIM_GRAY)
            };
            buf.set_string(area.x + 1, area.y + row, format!("[ {button} ]"), style);
        }
        row += 2;
        if row < area.height {
            buf.set_string(area.x + 1, area.y + row, hint, Style::default().fg(DIM_GRAY));
        }
    }

    /// Render the sign-in card
    fn render_login(&self, area: Rect, buf: &mut Buffer) {
        let inner = self.render_card(area, buf, "Sign In", 13);
        let mut row = 1;
        for field in crate::forms::LoginField::ALL {
            Self::render_field(
                buf,
                inner,
                &mut row,
                field.label(),
                &masked(self.login.value(*field), field.is_secret()),
                self.login.focus == *field,
            );
        }

        let button = if self.login.busy {
            "Signing In..."
        } else {
            "Sign In"
        };
        Self::render_message_rows(
            buf,
            inner,
            row,
            self.login.error.as_deref(),
            button,
            self.login.can_submit(),
            "Tab next · Enter sign in · Ctrl+N sign up",
        );
    }

    /// Render the account creation card
    fn render_signup(&self, area: Rect, buf: &mut Buffer) {
        let inner = self.render_card(area, buf, "Create Account", 20);
        let mut row = 1;
        for field in SignupField::ALL {
            Self::render_field(
                buf,
                inner,
                &mut row,
                field.label(),
                &masked(self.signup.value(*field), field.is_secret()),
                self.signup.focus == *field,
            );
            if *field == SignupField::Password {
                if let Some(strength) = self.signup.strength() {
                    if row > 0 && row - 1 < inner.height {
                        buf.set_string(
                            inner.x + 3,
                            inner.y + row - 1,
                            strength.to_string(),
                            Style::default().fg(strength_color(&strength)),
                        );
                    }
                }
            }
        }

        let button = if self.signup.busy {
            "Creating Account..."
        } else {
            "Create Account"
        };
        Self::render_message_rows(
            buf,
            inner,
            row,
            self.signup.error.as_deref(),
            button,
            self.signup.can_submit(),
            "Tab next · Enter create · Ctrl+L sign in",
        );
    }
}
