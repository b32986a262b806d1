//! Display Lines
//!
//! Turns a [`ConversationView`] into wrapped, styled lines for the
//! conversation widget.
//!
//! # Design Philosophy
//!
//! The TUI is a thin client: the core decides what each turn *is* (user
//! text, loading placeholder, formatted answer with an optional concept
//! panel) and this module only decides how it *looks* in a terminal.

use ratatui::style::{Modifier, Style};
use textwrap::Options;

use ragchat_core::{ConversationView, DetailPanel, Sender, TextBlock, TurnId, TurnView};

use crate::theme::{
    heading, ANSWER_TEXT, ASSISTANT_MAGENTA, CONCEPT_BLUE, DIM_GRAY, EXAMPLE_TEAL, FOCUS_CYAN,
    INFERRED_AMBER, RELATED_PURPLE, SYNTAX_GREEN, USER_GREEN,
};

/// Narrowest width we wrap to; anything smaller is clamped
const MIN_WRAP_WIDTH: usize = 10;

/// Frames of the typing indicator
const TYPING_FRAMES: [&str; 4] = ["●○○", "○●○", "○○●", "○●○"];

/// Indent for answer body text
const BODY_INDENT: &str = "  ";

/// Indent for concept panel contents
const PANEL_INDENT: &str = "    ";

/// One line of rendered output
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledLine {
    /// Text, already wrapped to fit
    pub text: String,
    /// Style for the whole line
    pub style: Style,
}

impl StyledLine {
    /// A styled line
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// An empty spacer line
    #[must_use]
    pub fn blank() -> Self {
        Self::new(String::new(), Style::default())
    }
}

/// Typing indicator frame for a tick count
#[must_use]
pub fn typing_indicator(tick: u64) -> &'static str {
    // Advance every third tick so the dots don't flicker
    let frame = (tick / 3) % TYPING_FRAMES.len() as u64;
    TYPING_FRAMES[usize::try_from(frame).unwrap_or(0)]
}

/// Banner shown before the first question
#[must_use]
pub fn welcome_lines(username: &str, width: usize) -> Vec<StyledLine> {
    let width = width.max(MIN_WRAP_WIDTH);
    let mut lines = vec![
        StyledLine::blank(),
        StyledLine::new(
            center("Welcome to the knowledge base chat!", width),
            heading(ASSISTANT_MAGENTA),
        ),
        StyledLine::blank(),
    ];
    if !username.is_empty() {
        lines.push(StyledLine::new(
            center(&format!("Signed in as {username}"), width),
            Style::default().fg(DIM_GRAY),
        ));
    }
    lines.push(StyledLine::new(
        center("Type a question and press Enter.", width),
        Style::default().fg(DIM_GRAY),
    ));
    lines
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{text}", " ".repeat((width - len) / 2))
}

/// Lay out every turn of a conversation
///
/// `selected` marks the answer whose concept panel the keyboard currently
/// targets; `tick` drives the typing indicator.
#[must_use]
pub fn conversation_lines(
    view: ConversationView<'_>,
    width: usize,
    selected: Option<TurnId>,
    tick: u64,
) -> Vec<StyledLine> {
    let width = width.max(MIN_WRAP_WIDTH);
    let mut lines = Vec::new();

    for turn in view {
        match &turn {
            TurnView::User { text, .. } => {
                let style = Style::default().fg(USER_GREEN);
                let content = format!("{}{text}", Sender::User.prefix());
                push_wrapped(&mut lines, &content, width, "", "", style);
            }
            TurnView::Loading { .. } => {
                lines.push(StyledLine::new(
                    format!("{}{}", Sender::Bot.prefix(), typing_indicator(tick)),
                    Style::default().fg(ASSISTANT_MAGENTA),
                ));
            }
            TurnView::Bot { id, blocks, detail } => {
                lines.push(StyledLine::new(
                    Sender::Bot.prefix().trim_end(),
                    heading(ASSISTANT_MAGENTA),
                ));
                push_blocks(&mut lines, blocks, width);
                if let Some(detail) = detail {
                    push_panel(&mut lines, detail, width, selected == Some(*id));
                }
            }
        }
        lines.push(StyledLine::blank());
    }

    lines
}

fn push_blocks(lines: &mut Vec<StyledLine>, blocks: &[TextBlock], width: usize) {
    let style = Style::default().fg(ANSWER_TEXT);
    for block in blocks {
        match block {
            TextBlock::Paragraph(text) => {
                push_wrapped(lines, text, width, BODY_INDENT, BODY_INDENT, style);
            }
            TextBlock::BulletList(items) => {
                for item in items {
                    push_wrapped(lines, item, width, "  • ", PANEL_INDENT, style);
                }
            }
        }
    }
}

fn push_panel(lines: &mut Vec<StyledLine>, panel: &DetailPanel<'_>, width: usize, selected: bool) {
    lines.push(StyledLine::blank());
    push_wrapped(
        lines,
        &format!("◆ Concept: {}", panel.concept),
        width,
        BODY_INDENT,
        PANEL_INDENT,
        heading(CONCEPT_BLUE),
    );

    let marker = if panel.expanded { "[-]" } else { "[+]" };
    let pointer = if selected { "▶ " } else { BODY_INDENT };
    let toggle_style = if selected {
        Style::default()
            .fg(FOCUS_CYAN)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DIM_GRAY)
    };
    lines.push(StyledLine::new(
        format!("{pointer}{marker} Concept details"),
        toggle_style,
    ));

    if !panel.expanded {
        return;
    }

    let body = PANEL_INDENT.repeat(2);

    if let Some(description) = panel.description {
        lines.push(StyledLine::new(format!("{PANEL_INDENT}Description"), heading(ANSWER_TEXT)));
        push_wrapped(
            lines,
            description,
            width,
            &body,
            &body,
            Style::default()
                .fg(ANSWER_TEXT)
                .add_modifier(Modifier::ITALIC),
        );
    }

    if let Some(syntax) = panel.syntax {
        lines.push(StyledLine::new(format!("{PANEL_INDENT}Syntax"), heading(SYNTAX_GREEN)));
        push_code(lines, syntax, width, &body, Style::default().fg(SYNTAX_GREEN));
    }

    if let Some(example) = panel.example {
        lines.push(StyledLine::new(format!("{PANEL_INDENT}Example"), heading(EXAMPLE_TEAL)));
        push_code(lines, example, width, &body, Style::default().fg(EXAMPLE_TEAL));
    }

    if !panel.related.is_empty() {
        lines.push(StyledLine::new(
            format!("{PANEL_INDENT}Related Concepts"),
            heading(RELATED_PURPLE),
        ));
        push_wrapped(
            lines,
            &panel.related.join(" · "),
            width,
            &body,
            &body,
            Style::default().fg(RELATED_PURPLE),
        );
    }

    if !panel.inferred_relations.is_empty() {
        lines.push(StyledLine::new(
            format!("{PANEL_INDENT}Inferred Relations"),
            heading(INFERRED_AMBER),
        ));
        for relation in panel.inferred_relations {
            push_wrapped(
                lines,
                relation,
                width,
                &format!("{body}→ "),
                &format!("{body}  "),
                Style::default().fg(INFERRED_AMBER),
            );
        }
    }
}

/// Code keeps its own line breaks; only overlong lines wrap
fn push_code(lines: &mut Vec<StyledLine>, code: &str, width: usize, indent: &str, style: Style) {
    for line in code.lines() {
        if line.trim().is_empty() {
            lines.push(StyledLine::new(indent, style));
        } else {
            push_wrapped(lines, line, width, indent, indent, style);
        }
    }
}

fn push_wrapped(
    lines: &mut Vec<StyledLine>,
    text: &str,
    width: usize,
    first_indent: &str,
    rest_indent: &str,
    style: Style,
) {
    let options = Options::new(width)
        .initial_indent(first_indent)
        .subsequent_indent(rest_indent);
    for line in textwrap::wrap(text, options) {
        lines.push(StyledLine::new(line.into_owned(), style));
    }
}
