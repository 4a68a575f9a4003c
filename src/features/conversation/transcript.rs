//! Caller-visible transcript built from a finished conversation

use serde::{Deserialize, Serialize};

use super::message::{Message, MessageContent};

/// One entry of the transcript returned to the front-end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub agent: String,
    pub content: String,
}

impl From<&TranscriptEntry> for Message {
    fn from(entry: &TranscriptEntry) -> Self {
        Message::new(entry.agent.clone(), MessageContent::Text(entry.content.clone()))
    }
}

/// Build the transcript from raw messages.
///
/// Drops the seed message, coerces non-text content to text, then drops
/// entries that are blank after trimming. Order is preserved.
pub fn filter_transcript<'a, I>(messages: I) -> Vec<TranscriptEntry>
where
    I: IntoIterator<Item = &'a Message>,
{
    messages
        .into_iter()
        .filter(|message| !message.is_seed())
        .map(|message| TranscriptEntry {
            agent: message.source.clone(),
            content: message.content.to_text(),
        })
        .filter(|entry| !entry.content.trim().is_empty())
        .collect()
}
