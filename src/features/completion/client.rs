//! # OpenAI-compatible Chat Completion Client
//!
//! Talks to any backend exposing `POST {base}/chat/completions` with bearer
//! auth. Decoding is lenient where backends differ: `usage` may be absent or
//! carry `null` counts, and `content` may be `null` or structured.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial release with tolerant usage decoding

use async_trait::async_trait;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use super::provider::{
    Completion, CompletionConnector, CompletionProvider, CompletionRequest, Role,
};
use crate::core::{CompletionError, Config};
use crate::features::conversation::MessageContent;
use crate::features::usage::UsageCounters;

#[derive(Debug, Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, PartialEq)]
struct ChatMessage {
    role: Role,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<UsageCounters>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<Value>,
}

/// One binding to a chat completion endpoint
#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl ChatCompletionClient {
    pub fn new(http: reqwest::Client, base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    fn build_body<'a>(&'a self, request: &CompletionRequest) -> ChatBody<'a> {
        let mut messages = Vec::with_capacity(request.history.len() + 1);
        messages.push(ChatMessage {
            role: Role::System,
            content: request.system_prompt.clone(),
            name: None,
        });

        for entry in &request.history {
            messages.push(ChatMessage {
                role: entry.role,
                content: entry.content.clone(),
                name: entry.name.as_deref().map(sanitize_name),
            });
        }

        ChatBody {
            model: &self.model,
            messages,
        }
    }
}

#[async_trait]
impl CompletionProvider for ChatCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError> {
        let start_time = Instant::now();
        let request_id = request.request_id;
        let body = self.build_body(&request);

        debug!(
            "[{request_id}] 🚀 Chat completion request | Model: {} | Messages: {}",
            self.model,
            body.messages.len()
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(
                    "[{request_id}] ❌ Completion transport error after {:?}: {e}",
                    start_time.elapsed()
                );
                CompletionError::from(e)
            })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!(
                "[{request_id}] ❌ Completion backend returned {status} after {:?}",
                start_time.elapsed()
            );
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let completion = decode_response(&text)?;
        info!(
            "[{request_id}] ✅ Completion received after {:?} | Prompt tokens: {:?} | Completion tokens: {:?}",
            start_time.elapsed(),
            completion.usage.prompt_tokens,
            completion.usage.completion_tokens
        );
        Ok(completion)
    }
}

/// Decode a chat completion response body
fn decode_response(body: &str) -> Result<Completion, CompletionError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| CompletionError::Malformed(e.to_string()))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or(CompletionError::EmptyChoices)?;

    let content = match choice.message.content {
        Some(Value::String(text)) => MessageContent::Text(text),
        None | Some(Value::Null) => MessageContent::Text(String::new()),
        Some(other) => MessageContent::Structured(other),
    };

    Ok(Completion {
        content,
        usage: parsed.usage.unwrap_or_default(),
    })
}

/// Restrict a speaker label to the characters OpenAI accepts for `name`
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .take(64)
        .collect()
}

/// Connects each request to the configured endpoint over a pooled HTTP client
#[derive(Debug, Clone)]
pub struct OpenAiConnector {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiConnector {
    pub fn from_config(config: &Config) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder()
            .timeout(config.completion_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

impl CompletionConnector for OpenAiConnector {
    fn connect(&self) -> Arc<dyn CompletionProvider> {
        Arc::new(ChatCompletionClient::new(
            self.http.clone(),
            &self.base_url,
            &self.api_key,
            &self.model,
        ))
    }
}
