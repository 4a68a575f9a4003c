//! # Personas Feature
//!
//! Analyst and Critic personas for two-agent conversations.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod manager;

pub use manager::{signals_satisfaction, Persona, PersonaManager, SATISFACTION_PHRASE};
