//! # Conversation Agent
//!
//! A named persona bound to a shared completion capability. Given the full
//! conversation so far, an agent asks the backend for its next utterance.
//! Agents hold no mutable state; one outbound call per `generate`, no retries.

use std::sync::Arc;
use uuid::Uuid;

use crate::core::CompletionError;
use crate::features::completion::{CompletionProvider, CompletionRequest, HistoryEntry, Role};
use crate::features::conversation::{Conversation, Message};
use crate::features::personas::Persona;
use crate::features::usage::UsageCounters;

#[derive(Clone)]
pub struct Agent {
    name: String,
    system_prompt: String,
    completion: Arc<dyn CompletionProvider>,
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("system_prompt_len", &self.system_prompt.len())
            .finish()
    }
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        system_prompt: impl Into<String>,
        completion: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            name: name.into(),
            system_prompt: system_prompt.into(),
            completion,
        }
    }

    pub fn from_persona(persona: &Persona, completion: Arc<dyn CompletionProvider>) -> Self {
        Self::new(&persona.name, &persona.system_prompt, completion)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Label the history from this agent's point of view.
    ///
    /// Its own messages are `assistant` turns; the seed and the other agent's
    /// messages are `user` turns carrying the speaker's name.
    pub fn build_request(&self, history: &Conversation, request_id: Uuid) -> CompletionRequest {
        let history = history
            .messages()
            .iter()
            .map(|message| {
                let role = if message.source == self.name {
                    Role::Assistant
                } else {
                    Role::User
                };
                HistoryEntry {
                    role,
                    name: (!message.is_seed()).then(|| message.source.clone()),
                    content: message.content.to_text(),
                }
            })
            .collect();

        CompletionRequest {
            request_id,
            system_prompt: self.system_prompt.clone(),
            history,
        }
    }

    /// Produce the next message attributed to this agent
    pub async fn generate(
        &self,
        history: &Conversation,
        request_id: Uuid,
    ) -> Result<(Message, UsageCounters), CompletionError> {
        let request = self.build_request(history, request_id);
        let completion = self.completion.complete(request).await?;
        Ok((Message::new(&self.name, completion.content), completion.usage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::completion::Completion;
    use crate::features::conversation::MessageContent;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records each request and answers with a fixed completion
    struct Recording {
        requests: Mutex<Vec<CompletionRequest>>,
        usage: UsageCounters,
    }

    #[async_trait]
    impl CompletionProvider for Recording {
        async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError> {
            self.requests.lock().unwrap().push(request);
            Ok(Completion {
                content: MessageContent::Text("Noted.".to_string()),
                usage: self.usage,
            })
        }
    }

    struct Failing;

    #[async_trait]
    impl CompletionProvider for Failing {
        async fn complete(&self, _request: CompletionRequest) -> Result<Completion, CompletionError> {
            Err(CompletionError::EmptyChoices)
        }
    }

    fn history() -> Conversation {
        let mut conversation = Conversation::seeded("pricing strategy");
        conversation.push(Message::new("Analyst", "Tiered pricing wins."));
        conversation.push(Message::new("Critic", "Where is the evidence?"));
        conversation
    }

    #[tokio::test]
    async fn test_generate_attributes_message_to_agent() {
        let provider = Arc::new(Recording {
            requests: Mutex::new(Vec::new()),
            usage: UsageCounters {
                prompt_tokens: None,
                completion_tokens: Some(4),
            },
        });
        let agent = Agent::new("Analyst", "You are an Analyst.", provider.clone());

        let (message, usage) = agent.generate(&history(), Uuid::nil()).await.unwrap();

        assert_eq!(message.source, "Analyst");
        assert_eq!(message.content, MessageContent::Text("Noted.".to_string()));
        assert_eq!(usage.completion_tokens, Some(4));
        assert_eq!(usage.prompt_tokens, None);
        assert_eq!(provider.requests.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_request_labels_history_by_source() {
        let agent = Agent::new("Analyst", "You are an Analyst.", Arc::new(Failing));
        let request = agent.build_request(&history(), Uuid::nil());

        assert_eq!(request.system_prompt, "You are an Analyst.");
        assert_eq!(
            request.history,
            vec![
                HistoryEntry {
                    role: Role::User,
                    name: None,
                    content: "pricing strategy".to_string(),
                },
                HistoryEntry {
                    role: Role::Assistant,
                    name: Some("Analyst".to_string()),
                    content: "Tiered pricing wins.".to_string(),
                },
                HistoryEntry {
                    role: Role::User,
                    name: Some("Critic".to_string()),
                    content: "Where is the evidence?".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_request_carries_request_id() {
        let provider = Arc::new(Recording {
            requests: Mutex::new(Vec::new()),
            usage: UsageCounters::unreported(),
        });
        let agent = Agent::new("Critic", "You are a Critic.", provider.clone());
        let request_id = Uuid::new_v4();

        agent.generate(&history(), request_id).await.unwrap();

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].request_id, request_id);
    }

    #[test]
    fn test_roles_flip_for_the_other_agent() {
        let agent = Agent::new("Critic", "You are a Critic.", Arc::new(Failing));
        let request = agent.build_request(&history(), Uuid::nil());

        assert_eq!(request.history[1].role, Role::User);
        assert_eq!(request.history[2].role, Role::Assistant);
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let agent = Agent::new("Critic", "You are a Critic.", Arc::new(Failing));
        let result = agent.generate(&history(), Uuid::nil()).await;
        assert!(matches!(result, Err(CompletionError::EmptyChoices)));
    }

    #[test]
    fn test_from_persona() {
        let manager = crate::features::personas::PersonaManager::new();
        let persona = manager.get_persona("critic").unwrap();
        let agent = Agent::from_persona(persona, Arc::new(Failing));
        assert_eq!(agent.name(), "Critic");
        assert_eq!(agent.system_prompt, persona.system_prompt);
    }
}
