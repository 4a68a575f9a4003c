//! # Conversation Orchestrator
//!
//! Drives a round-robin dialogue between two agents until the termination
//! policy fires, then hands the messages to the transcript filter.

use log::{debug, error, info};
use uuid::Uuid;

use super::message::Conversation;
use super::termination::TerminationPolicy;
use super::transcript::{filter_transcript, TranscriptEntry};
use crate::core::ConversationError;
use crate::features::agents::Agent;
use crate::features::personas::signals_satisfaction;
use crate::features::usage::{UsageAccumulator, UsageTotal};

/// Messages and usage of a completed conversation
#[derive(Debug, Clone)]
pub struct ConversationOutcome {
    pub conversation: Conversation,
    pub usage: UsageTotal,
}

impl ConversationOutcome {
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        filter_transcript(self.conversation.messages())
    }
}

/// Runs one conversation. Construct one per request.
pub struct ConversationOrchestrator<P: TerminationPolicy> {
    agents: Vec<Agent>,
    policy: P,
    request_id: Uuid,
}

impl<P: TerminationPolicy> ConversationOrchestrator<P> {
    /// `first` speaks first; turns then alternate strictly
    pub fn new(first: Agent, second: Agent, policy: P) -> Self {
        Self {
            agents: vec![first, second],
            policy,
            request_id: Uuid::new_v4(),
        }
    }

    /// Tag log lines with an existing request id
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    /// Agent that speaks on the given 1-indexed agent turn
    fn speaker(&self, turn: usize) -> &Agent {
        &self.agents[(turn - 1) % self.agents.len()]
    }

    /// Run the turn loop on `topic`.
    ///
    /// The seed message counts toward the budget, so a budget of `B` yields at
    /// most `B - 1` agent turns. A backend failure aborts the whole
    /// conversation; no partial result is returned.
    pub async fn run(&self, topic: &str) -> Result<ConversationOutcome, ConversationError> {
        let request_id = self.request_id;
        let mut conversation = Conversation::seeded(topic);
        let mut usage = UsageAccumulator::new();

        info!(
            "[{request_id}] 🎭 Starting conversation: {} | Topic: '{}'",
            self.agents.iter().map(Agent::name).collect::<Vec<_>>().join(" vs "),
            topic.chars().take(80).collect::<String>()
        );

        let mut turn = 0;
        while !self.policy.should_stop(conversation.len()) {
            turn += 1;
            let agent = self.speaker(turn);
            debug!("[{request_id}] Turn {turn}: {} responding", agent.name());

            let (message, turn_usage) = match agent.generate(&conversation, request_id).await {
                Ok(result) => result,
                Err(e) => {
                    error!("[{request_id}] ❌ {} failed on turn {turn}: {e}", agent.name());
                    return Err(ConversationError::Backend {
                        agent: agent.name().to_string(),
                        turn,
                        source: e,
                    });
                }
            };

            debug!(
                "[{request_id}] 📊 Turn {turn} usage - Prompt: {:?}, Completion: {:?}",
                turn_usage.prompt_tokens, turn_usage.completion_tokens
            );
            usage.add(turn_usage);

            let text = message.content.to_text();
            debug!(
                "[{request_id}] 📝 {}: '{}'",
                agent.name(),
                text.chars().take(100).collect::<String>()
            );
            if turn > 1 && signals_satisfaction(&text) {
                debug!("[{request_id}] {} signalled satisfaction (advisory)", agent.name());
            }

            conversation.push(message);
        }

        let total = usage.total();
        info!(
            "[{request_id}] ✅ Conversation completed: {turn} agent turns | Tokens - Prompt: {}, Completion: {}",
            total.prompt_tokens, total.completion_tokens
        );

        Ok(ConversationOutcome {
            conversation,
            usage: total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CompletionError;
    use crate::features::completion::{Completion, CompletionProvider, CompletionRequest};
    use crate::features::conversation::{MaxMessages, MessageContent};
    use crate::features::usage::UsageCounters;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Answers every call, optionally failing on one call number
    struct Scripted {
        calls: AtomicUsize,
        fail_on: Option<usize>,
        usage: fn(usize) -> UsageCounters,
    }

    impl Scripted {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_on: None,
                usage: |_| UsageCounters::new(10, 5),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionProvider for Scripted {
        async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_on == Some(call) {
                return Err(CompletionError::Status {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            Ok(Completion {
                content: MessageContent::Text(format!(
                    "reply {call} after {} messages",
                    request.history.len()
                )),
                usage: (self.usage)(call),
            })
        }
    }

    fn orchestrator(
        provider: Arc<Scripted>,
        budget: i64,
    ) -> ConversationOrchestrator<MaxMessages> {
        ConversationOrchestrator::new(
            Agent::new("Analyst", "analyse", provider.clone()),
            Agent::new("Critic", "critique", provider),
            MaxMessages::new(budget),
        )
    }

    #[tokio::test]
    async fn test_budget_eight_alternates_seven_turns() {
        let provider = Arc::new(Scripted::new());
        let outcome = orchestrator(provider.clone(), 8)
            .run("pricing strategy")
            .await
            .unwrap();

        assert_eq!(outcome.conversation.len(), 8);
        assert!(outcome.conversation.messages()[0].is_seed());

        let speakers: Vec<&str> = outcome
            .conversation
            .agent_turns()
            .map(|m| m.source.as_str())
            .collect();
        assert_eq!(
            speakers,
            vec!["Analyst", "Critic", "Analyst", "Critic", "Analyst", "Critic", "Analyst"]
        );

        let transcript = outcome.transcript();
        assert_eq!(transcript.len(), 7);
        assert_eq!(transcript[0].agent, "Analyst");
        assert_eq!(provider.calls(), 7);
        assert_eq!(outcome.usage, UsageTotal::new(70, 35));
    }

    #[tokio::test]
    async fn test_each_turn_sees_full_history() {
        let provider = Arc::new(Scripted::new());
        let outcome = orchestrator(provider, 4).run("topic").await.unwrap();

        let contents: Vec<String> = outcome
            .conversation
            .agent_turns()
            .map(|m| m.content.to_text())
            .collect();
        assert_eq!(
            contents,
            vec![
                "reply 1 after 1 messages",
                "reply 2 after 2 messages",
                "reply 3 after 3 messages"
            ]
        );
    }

    #[tokio::test]
    async fn test_budget_of_one_or_less_runs_no_turns() {
        for budget in [1, 0, -5] {
            let provider = Arc::new(Scripted::new());
            let outcome = orchestrator(provider.clone(), budget).run("topic").await.unwrap();

            assert_eq!(outcome.conversation.len(), 1);
            assert!(outcome.transcript().is_empty());
            assert_eq!(provider.calls(), 0);
            assert_eq!(outcome.usage, UsageTotal::default());
        }
    }

    #[tokio::test]
    async fn test_agent_turns_never_exceed_budget_minus_one() {
        for budget in 1..=12 {
            let provider = Arc::new(Scripted::new());
            let outcome = orchestrator(provider, budget).run("topic").await.unwrap();
            let turns = outcome.conversation.agent_turns().count() as i64;
            assert_eq!(turns, budget - 1);

            for (index, message) in outcome.conversation.agent_turns().enumerate() {
                let expected = if (index + 1) % 2 == 1 { "Analyst" } else { "Critic" };
                assert_eq!(message.source, expected);
            }
        }
    }

    #[tokio::test]
    async fn test_failure_on_third_call_aborts() {
        let provider = Arc::new(Scripted {
            fail_on: Some(3),
            ..Scripted::new()
        });
        let result = orchestrator(provider.clone(), 8).run("topic").await;

        match result {
            Err(ConversationError::Backend { agent, turn, .. }) => {
                assert_eq!(agent, "Analyst");
                assert_eq!(turn, 3);
            }
            other => panic!("expected backend error, got {other:?}"),
        }
        // No further turns after the failure
        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test]
    async fn test_unreported_usage_leaves_total_unchanged() {
        let provider = Arc::new(Scripted {
            usage: |call| {
                if call == 2 {
                    UsageCounters::unreported()
                } else {
                    UsageCounters::new(100, 10)
                }
            },
            ..Scripted::new()
        });
        let outcome = orchestrator(provider, 4).run("topic").await.unwrap();

        // Calls 1 and 3 report; call 2 reports nothing
        assert_eq!(outcome.usage, UsageTotal::new(200, 20));
    }

    #[tokio::test]
    async fn test_satisfaction_phrase_does_not_stop_loop() {
        struct Satisfied;

        #[async_trait]
        impl CompletionProvider for Satisfied {
            async fn complete(&self, _request: CompletionRequest) -> Result<Completion, CompletionError> {
                Ok(Completion {
                    content: MessageContent::Text("I'm satisfied with this analysis".to_string()),
                    usage: UsageCounters::unreported(),
                })
            }
        }

        let provider: Arc<dyn CompletionProvider> = Arc::new(Satisfied);
        let outcome = ConversationOrchestrator::new(
            Agent::new("Analyst", "analyse", provider.clone()),
            Agent::new("Critic", "critique", provider),
            MaxMessages::new(6),
        )
        .run("topic")
        .await
        .unwrap();

        assert_eq!(outcome.conversation.agent_turns().count(), 5);
        assert_eq!(outcome.usage, UsageTotal::default());
    }

    #[tokio::test]
    async fn test_every_call_carries_request_id() {
        #[derive(Default)]
        struct Recording {
            ids: Mutex<Vec<Uuid>>,
        }

        #[async_trait]
        impl CompletionProvider for Recording {
            async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError> {
                self.ids.lock().unwrap().push(request.request_id);
                Ok(Completion {
                    content: MessageContent::Text("noted".to_string()),
                    usage: UsageCounters::unreported(),
                })
            }
        }

        let request_id = Uuid::new_v4();
        let provider = Arc::new(Recording::default());
        ConversationOrchestrator::new(
            Agent::new("Analyst", "analyse", provider.clone()),
            Agent::new("Critic", "critique", provider.clone()),
            MaxMessages::new(5),
        )
        .with_request_id(request_id)
        .run("topic")
        .await
        .unwrap();

        let ids = provider.ids.lock().unwrap();
        assert_eq!(ids.len(), 4);
        assert!(ids.iter().all(|id| *id == request_id));
    }
}
