//! Error taxonomy shared by the conversation core and its collaborators
//!
//! Usage gaps and non-text content are absorbed inside the core and have no
//! variant here.

use thiserror::Error;

/// Required configuration is missing or unusable
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// A completion backend call failed
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed completion response: {0}")]
    Malformed(String),
    #[error("completion response contained no choices")]
    EmptyChoices,
}

/// A conversation was aborted before the turn budget was reached
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("{agent} failed on turn {turn}: {source}")]
    Backend {
        agent: String,
        turn: usize,
        #[source]
        source: CompletionError,
    },
}
