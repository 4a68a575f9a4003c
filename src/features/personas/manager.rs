//! # Feature: Persona System
//!
//! The two conversation personas: an Analyst who produces structured analysis
//! and a Critic who reviews it. Each persona has a system prompt loaded from
//! prompt/*.md files at compile time.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release with analyst and critic personas

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Phrase the critic uses to signal it is satisfied. Advisory only.
pub const SATISFACTION_PHRASE: &str = "I'm satisfied with this analysis";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// Speaker name used as the message source
    pub name: String,
    pub system_prompt: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct PersonaManager {
    personas: HashMap<String, Persona>,
}

impl Default for PersonaManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonaManager {
    pub fn new() -> Self {
        let mut personas = HashMap::new();

        personas.insert(
            "analyst".to_string(),
            Persona {
                name: "Analyst".to_string(),
                system_prompt: include_str!("../../../prompt/analyst.md").to_string(),
                description: "Produces thorough, structured analysis with evidence and multiple perspectives"
                    .to_string(),
            },
        );

        personas.insert(
            "critic".to_string(),
            Persona {
                name: "Critic".to_string(),
                system_prompt: include_str!("../../../prompt/critic.md").to_string(),
                description: "Challenges assumptions and points out gaps in the analysis".to_string(),
            },
        );

        PersonaManager { personas }
    }

    pub fn get_persona(&self, id: &str) -> Option<&Persona> {
        self.personas.get(id)
    }

    /// The first-to-speak and second-to-speak personas of a conversation
    pub fn conversation_pair(&self) -> Option<(&Persona, &Persona)> {
        Some((self.get_persona("analyst")?, self.get_persona("critic")?))
    }
}

/// Whether a message carries the critic's satisfaction phrase
pub fn signals_satisfaction(content: &str) -> bool {
    content
        .to_lowercase()
        .replace('\u{2019}', "'")
        .contains(&SATISFACTION_PHRASE.to_lowercase())
}
