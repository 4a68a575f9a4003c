//! # Conversation Feature
//!
//! Orchestrates bounded, turn-taking conversations between two agents on a
//! caller-supplied topic and filters the result into a transcript.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial implementation with round-robin turns and max-message termination

pub mod message;
pub mod orchestrator;
pub mod termination;
pub mod transcript;

pub use message::{Conversation, Message, MessageContent, SEED_SOURCE};
pub use orchestrator::{ConversationOrchestrator, ConversationOutcome};
pub use termination::{MaxMessages, TerminationPolicy};
pub use transcript::{filter_transcript, TranscriptEntry};
