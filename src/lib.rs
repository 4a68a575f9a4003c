// Core layer - configuration and error types
pub mod core;

// Features layer - conversation orchestration and its collaborators
pub mod features;

// HTTP layer - routes, CORS and error responses
pub mod server;

pub use crate::core::Config;

pub use crate::features::{
    // Agents
    Agent,
    // Completion backend
    ChatCompletionClient, CompletionConnector, CompletionProvider, OpenAiConnector,
    // Conversation
    filter_transcript, Conversation, ConversationOrchestrator, ConversationOutcome, MaxMessages,
    Message, MessageContent, TerminationPolicy, TranscriptEntry,
    // Personas
    Persona, PersonaManager,
    // Rate limiting
    RateLimiter,
    // Usage
    merge, UsageAccumulator, UsageCounters, UsageTotal,
};

pub use crate::server::{router, AppState};
