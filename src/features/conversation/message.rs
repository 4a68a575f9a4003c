//! Conversation messages and the append-only conversation log

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Source of the seed message carrying the caller's topic
pub const SEED_SOURCE: &str = "user";

/// Message content as produced by a completion backend.
///
/// Backends usually return plain text, but some return structured content
/// (e.g. an array of content parts). Structured content is kept as-is and
/// coerced to text only when the transcript is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Structured(Value),
}

impl MessageContent {
    /// Textual representation of the content.
    ///
    /// Arrays of `{"text": ...}` parts are joined with newlines; any other
    /// structured value is rendered as JSON.
    pub fn to_text(&self) -> String {
        match self {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Structured(Value::Null) => String::new(),
            MessageContent::Structured(Value::String(text)) => text.clone(),
            MessageContent::Structured(Value::Array(parts)) => {
                let texts: Option<Vec<&str>> = parts
                    .iter()
                    .map(|part| part.get("text").and_then(Value::as_str))
                    .collect();
                match texts {
                    Some(texts) if !texts.is_empty() => texts.join("\n"),
                    _ => Value::Array(parts.clone()).to_string(),
                }
            }
            MessageContent::Structured(other) => other.to_string(),
        }
    }

    #[cfg(test)]
    pub fn is_text(&self) -> bool {
        matches!(self, MessageContent::Text(_))
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        MessageContent::Text(text)
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        MessageContent::Text(text.to_string())
    }
}

/// A single conversation entry; immutable once appended
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Agent name, or [`SEED_SOURCE`] for the seed task
    pub source: String,
    pub content: MessageContent,
}

impl Message {
    pub fn new(source: impl Into<String>, content: impl Into<MessageContent>) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
        }
    }

    pub fn seed(topic: impl Into<String>) -> Self {
        Self::new(SEED_SOURCE, MessageContent::Text(topic.into()))
    }

    pub fn is_seed(&self) -> bool {
        self.source == SEED_SOURCE
    }
}

/// Ordered, append-only message log for one conversation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Start a conversation with the seed message
    pub fn seeded(topic: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::seed(topic)],
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages produced by agents (everything but the seed)
    pub fn agent_turns(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| !m.is_seed())
    }
}
