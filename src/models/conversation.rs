use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::enums::MessageRole;

/// One part of a multimodal message. Only text parts carry symptoms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: serde_json::Value },
    #[serde(other)]
    Unknown,
}

/// Message body as stored in the chat log.
///
/// Text turns are plain strings; image turns carry a list of parts.
/// Anything else is kept as raw JSON and reads as empty text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
    Other(serde_json::Value),
}

impl MessageContent {
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            Self::Parts(parts) => Cow::Owned(
                parts
                    .iter()
                    .filter_map(|p| match p {
                        ContentPart::Text { text } => Some(text.as_str()),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            Self::Other(_) => Cow::Borrowed(""),
        }
    }
}

impl From<&str> for MessageContent {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: MessageRole,
    pub content: MessageContent,
}

impl ChatTurn {
    pub fn user(text: &str) -> Self {
        Self {
            role: MessageRole::User,
            content: text.into(),
        }
    }

    pub fn assistant(text: &str) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: text.into(),
        }
    }
}

/// Ordered chat turns, oldest first. Read-only input to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHistory {
    turns: Vec<ChatTurn>,
}

impl ConversationHistory {
    pub fn new(turns: Vec<ChatTurn>) -> Self {
        Self { turns }
    }

    /// Parse a chat log. Unparsable input yields an empty history.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Vec<ChatTurn>>(json) {
            Ok(turns) => Self { turns },
            Err(e) => {
                tracing::warn!(error = %e, "Chat log is not valid history, treating as empty");
                Self::default()
            }
        }
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    /// Text of every user turn, in order.
    pub fn user_texts(&self) -> impl Iterator<Item = Cow<'_, str>> {
        self.turns
            .iter()
            .filter(|t| t.role == MessageRole::User)
            .map(|t| t.content.text())
    }

    /// Text of the most recent assistant turn.
    pub fn latest_assistant_reply(&self) -> Option<Cow<'_, str>> {
        self.turns
            .iter()
            .rev()
            .find(|t| t.role == MessageRole::Assistant)
            .map(|t| t.content.text())
    }
}
