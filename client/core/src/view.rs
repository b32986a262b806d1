//! Render Projection
//!
//! Surfaces never look at [`ChatTurn`] directly. They iterate a
//! [`ConversationView`], which maps each turn to a [`TurnView`] on demand:
//! user text as-is, a typing indicator for the loading placeholder, and
//! formatted blocks plus an optional concept panel for answers.

use std::collections::HashSet;

use crate::conversation::{ChatTurn, Conversation};
use crate::format::{format_bot_text, TextBlock};
use crate::messages::{Sender, TurnId};

/// Which concept panels are currently expanded
///
/// Keyed by turn id, so toggling one answer never affects another.
#[derive(Clone, Debug, Default)]
pub struct PanelVisibility {
    expanded: HashSet<TurnId>,
}

impl PanelVisibility {
    /// Nothing expanded
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the panel for `id`, returning whether it is now expanded
    pub fn toggle(&mut self, id: TurnId) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    /// Whether the panel for `id` is expanded
    #[must_use]
    pub fn is_expanded(&self, id: TurnId) -> bool {
        self.expanded.contains(&id)
    }

    /// Number of expanded panels
    #[must_use]
    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    /// Collapse everything
    pub fn clear(&mut self) {
        self.expanded.clear();
    }
}

/// Concept details ready for display
///
/// Fields are already filtered: empty descriptions and `"N/A"` syntax come
/// through as `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailPanel<'a> {
    /// Concept name, always non-empty
    pub concept: &'a str,
    /// Prose description
    pub description: Option<&'a str>,
    /// Syntax snippet
    pub syntax: Option<&'a str>,
    /// Code example
    pub example: Option<&'a str>,
    /// Related concepts in backend order
    pub related: &'a [String],
    /// Inferred relations in backend order
    pub inferred_relations: &'a [String],
    /// Whether the body is shown or only the collapsed header
    pub expanded: bool,
}

/// How a single turn should be drawn
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnView<'a> {
    /// The user's own question, shown verbatim
    User {
        /// Turn id
        id: TurnId,
        /// Question text
        text: &'a str,
    },
    /// Typing indicator for the in-flight request
    Loading {
        /// Turn id
        id: TurnId,
    },
    /// A final answer
    Bot {
        /// Turn id
        id: TurnId,
        /// Formatted answer text
        blocks: Vec<TextBlock>,
        /// Concept panel, present only when the answer named a concept
        detail: Option<DetailPanel<'a>>,
    },
}

impl<'a> TurnView<'a> {
    /// Project one turn
    #[must_use]
    pub fn of(turn: &'a ChatTurn, panels: &PanelVisibility) -> Self {
        let id = turn.id();
        match turn.sender() {
            Sender::User => Self::User {
                id,
                text: turn.text(),
            },
            Sender::Bot if turn.is_loading() => Self::Loading { id },
            Sender::Bot => Self::Bot {
                id,
                blocks: format_bot_text(turn.text()),
                detail: turn
                    .sources()
                    .filter(|s| s.has_concept())
                    .map(|s| DetailPanel {
                        concept: &s.concept,
                        description: s.display_description(),
                        syntax: s.display_syntax(),
                        example: s.display_example(),
                        related: &s.related,
                        inferred_relations: &s.inferred_relations,
                        expanded: panels.is_expanded(id),
                    }),
            },
        }
    }

    /// Id of the underlying turn
    #[must_use]
    pub fn id(&self) -> TurnId {
        match self {
            Self::User { id, .. } | Self::Loading { id } | Self::Bot { id, .. } => *id,
        }
    }

    /// Author of the underlying turn
    #[must_use]
    pub fn sender(&self) -> Sender {
        match self {
            Self::User { .. } => Sender::User,
            Self::Loading { .. } | Self::Bot { .. } => Sender::Bot,
        }
    }

    /// Concept panel, if this is an answer that has one
    #[must_use]
    pub fn detail(&self) -> Option<&DetailPanel<'a>> {
        match self {
            Self::Bot { detail, .. } => detail.as_ref(),
            _ => None,
        }
    }
}

/// Lazy, restartable projection of a conversation
///
/// Cloning copies the cursor, so a surface can take one pass to measure and
/// another to draw.
#[derive(Clone, Debug)]
pub struct ConversationView<'a> {
    turns: std::slice::Iter<'a, ChatTurn>,
    panels: &'a PanelVisibility,
}

impl<'a> ConversationView<'a> {
    /// View over every turn of `conversation`
    #[must_use]
    pub fn new(conversation: &'a Conversation, panels: &'a PanelVisibility) -> Self {
        Self {
            turns: conversation.iter(),
            panels,
        }
    }

    /// Ids of answers that carry a concept panel, in display order
    #[must_use]
    pub fn panel_ids(&self) -> Vec<TurnId> {
        self.clone()
            .filter(|turn| turn.detail().is_some())
            .map(|turn| turn.id())
            .collect()
    }
}

impl<'a> Iterator for ConversationView<'a> {
    type Item = TurnView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.turns.next().map(|turn| TurnView::of(turn, self.panels))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.turns.size_hint()
    }
}

impl ExactSizeIterator for ConversationView<'_> {}
