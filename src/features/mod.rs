//! # Features
//!
//! Domain features of the conversation sidecar.

pub mod agents;
pub mod completion;
pub mod conversation;
pub mod personas;
pub mod rate_limiting;
pub mod usage;

pub use agents::Agent;
pub use completion::{
    ChatCompletionClient, CompletionConnector, CompletionProvider, OpenAiConnector,
};
pub use conversation::{
    filter_transcript, Conversation, ConversationOrchestrator, ConversationOutcome, MaxMessages,
    Message, MessageContent, TerminationPolicy, TranscriptEntry,
};
pub use personas::{Persona, PersonaManager};
pub use rate_limiting::RateLimiter;
pub use usage::{merge, UsageAccumulator, UsageCounters, UsageTotal};
