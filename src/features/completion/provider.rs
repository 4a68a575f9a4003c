//! Completion capability consumed by agents

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::CompletionError;
use crate::features::conversation::MessageContent;
use crate::features::usage::UsageCounters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A labeled history entry sent to the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub role: Role,
    /// Speaker label; `None` for the seed task
    pub name: Option<String>,
    pub content: String,
}

/// Persona instruction plus ordered history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Id of the chat request this call belongs to, for log correlation
    pub request_id: Uuid,
    pub system_prompt: String,
    pub history: Vec<HistoryEntry>,
}

/// One generated entry and the usage the backend reported for it
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub content: MessageContent,
    pub usage: UsageCounters,
}

/// Generates the next message for a persona
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError>;
}

/// Produces a fresh provider binding for each chat request
pub trait CompletionConnector: Send + Sync {
    fn connect(&self) -> Arc<dyn CompletionProvider>;
}
