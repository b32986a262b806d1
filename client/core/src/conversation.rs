//! Conversation Model
//!
//! A [`Conversation`] is the ordered list of turns shown to the user. Turns
//! are only ever appended, except for the single replace-by-id that swaps a
//! loading placeholder for the final answer.

use serde::{Deserialize, Deserializer, Serialize};

use crate::messages::{Sender, TurnId};

/// Text shown in place of an answer when a chat request fails for any reason
pub const CHAT_FALLBACK_MESSAGE: &str =
    "I encountered an error connecting to the knowledge base. Please ensure the backend is running.";

/// Value the backend uses for "this concept has no syntax"
pub const NO_SYNTAX_SENTINEL: &str = "N/A";

/// Structured concept metadata attached to an answer
///
/// Every field is optional on the wire: a missing or `null` list reads as
/// empty, and unknown fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceDetail {
    /// Concept name; empty means "no concept matched"
    #[serde(deserialize_with = "null_as_default")]
    pub concept: String,
    /// Prose description of the concept
    pub description: Option<String>,
    /// Syntax snippet, or the `"N/A"` sentinel
    pub syntax: Option<String>,
    /// Code example
    pub example: Option<String>,
    /// Explicitly related concepts, in backend order
    #[serde(deserialize_with = "null_as_default")]
    pub related: Vec<String>,
    /// Relations inferred by the knowledge graph, in backend order
    #[serde(deserialize_with = "null_as_default")]
    pub inferred_relations: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl SourceDetail {
    /// Detail for a named concept with nothing else filled in
    pub fn new(concept: impl Into<String>) -> Self {
        Self {
            concept: concept.into(),
            ..Self::default()
        }
    }

    /// Whether a detail panel should be offered for this source
    #[must_use]
    pub fn has_concept(&self) -> bool {
        !self.concept.is_empty()
    }

    /// Description, if non-empty
    #[must_use]
    pub fn display_description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    /// Syntax, unless empty or the `"N/A"` sentinel
    #[must_use]
    pub fn display_syntax(&self) -> Option<&str> {
        self.syntax
            .as_deref()
            .filter(|s| !s.is_empty() && *s != NO_SYNTAX_SENTINEL)
    }

    /// Example, unless empty or the `"N/A"` sentinel
    #[must_use]
    pub fn display_example(&self) -> Option<&str> {
        self.example
            .as_deref()
            .filter(|e| !e.is_empty() && *e != NO_SYNTAX_SENTINEL)
    }
}

/// One entry in the conversation
///
/// Turns are immutable once built. The only way to change what a position
/// shows is [`Conversation::replace`], which swaps in a whole new turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatTurn {
    id: TurnId,
    sender: Sender,
    text: String,
    is_loading: bool,
    sources: Option<SourceDetail>,
}

impl ChatTurn {
    /// A question typed by the user
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: TurnId::new(),
            sender: Sender::User,
            text: text.into(),
            is_loading: false,
            sources: None,
        }
    }

    /// Placeholder shown while a request is in flight
    #[must_use]
    pub fn loading() -> Self {
        Self {
            id: TurnId::new(),
            sender: Sender::Bot,
            text: String::new(),
            is_loading: true,
            sources: None,
        }
    }

    /// A final answer from the backend
    pub fn bot(text: impl Into<String>, sources: Option<SourceDetail>) -> Self {
        Self {
            id: TurnId::new(),
            sender: Sender::Bot,
            text: text.into(),
            is_loading: false,
            sources,
        }
    }

    /// The fixed answer used when a request fails
    #[must_use]
    pub fn fallback() -> Self {
        Self::bot(CHAT_FALLBACK_MESSAGE, None)
    }

    /// Turn identifier
    #[must_use]
    pub fn id(&self) -> TurnId {
        self.id
    }

    /// Author of the turn
    #[must_use]
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Raw text as typed or as returned by the backend
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True for the in-flight placeholder
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Concept metadata, only ever present on final bot turns
    #[must_use]
    pub fn sources(&self) -> Option<&SourceDetail> {
        self.sources.as_ref()
    }
}

/// Ordered list of turns
#[derive(Clone, Debug, Default)]
pub struct Conversation {
    turns: Vec<ChatTurn>,
}

impl Conversation {
    /// Create an empty conversation
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn, returning its id
    pub fn push(&mut self, turn: ChatTurn) -> TurnId {
        let id = turn.id;
        self.turns.push(turn);
        id
    }

    /// Swap the turn with `id` for `turn`, keeping its position
    ///
    /// Returns false (and changes nothing) if no turn has that id.
    pub fn replace(&mut self, id: TurnId, turn: ChatTurn) -> bool {
        match self.turns.iter_mut().find(|t| t.id == id) {
            Some(slot) => {
                *slot = turn;
                true
            }
            None => false,
        }
    }

    /// Look up a turn by id
    #[must_use]
    pub fn get(&self, id: TurnId) -> Option<&ChatTurn> {
        self.turns.iter().find(|t| t.id == id)
    }

    /// Index of a turn by id
    #[must_use]
    pub fn position(&self, id: TurnId) -> Option<usize> {
        self.turns.iter().position(|t| t.id == id)
    }

    /// All turns in display order
    #[must_use]
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Iterate turns in display order
    pub fn iter(&self) -> std::slice::Iter<'_, ChatTurn> {
        self.turns.iter()
    }

    /// Most recent turn
    #[must_use]
    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    /// Number of loading placeholders; never more than one
    #[must_use]
    pub fn loading_count(&self) -> usize {
        self.turns.iter().filter(|t| t.is_loading).count()
    }

    /// Number of turns
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True when nothing has been said yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.turns.clear();
    }
}

impl<'a> IntoIterator for &'a Conversation {
    type Item = &'a ChatTurn;
    type IntoIter = std::slice::Iter<'a, ChatTurn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}
