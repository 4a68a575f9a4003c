//! # Agents Feature
//!
//! Persona-bound agents that turn conversation history into a next message.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod agent;

pub use agent::Agent;
