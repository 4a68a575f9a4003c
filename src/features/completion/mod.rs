//! # Completion Feature
//!
//! Narrow "generate next message" capability over an OpenAI-compatible
//! chat completion backend.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod client;
pub mod provider;

pub use client::{ChatCompletionClient, OpenAiConnector};
pub use provider::{
    Completion, CompletionConnector, CompletionProvider, CompletionRequest, HistoryEntry, Role,
};
