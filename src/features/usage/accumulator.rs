//! # Feature: Token Usage Accumulation
//!
//! Merges per-call token usage into a running total. Some OpenAI-compatible
//! backends omit one or both token counts; an unreported count adds nothing.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use serde::{Deserialize, Serialize};

/// Prompt/completion token counts as reported by one completion call.
///
/// Either count may be absent. Values produced by [`merge`] always carry both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounters {
    #[serde(default)]
    pub prompt_tokens: Option<u64>,
    #[serde(default)]
    pub completion_tokens: Option<u64>,
}

impl UsageCounters {
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens: Some(prompt_tokens),
            completion_tokens: Some(completion_tokens),
        }
    }

    /// The identity element of [`merge`]
    pub fn zero() -> Self {
        Self::new(0, 0)
    }

    /// Nothing reported at all
    pub fn unreported() -> Self {
        Self::default()
    }

    pub fn prompt(&self) -> u64 {
        self.prompt_tokens.unwrap_or(0)
    }

    pub fn completion(&self) -> u64 {
        self.completion_tokens.unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.prompt() + self.completion()
    }
}

/// Null-coalescing additive merge of two usage records
pub fn merge(a: UsageCounters, b: UsageCounters) -> UsageCounters {
    UsageCounters::new(
        a.prompt().saturating_add(b.prompt()),
        a.completion().saturating_add(b.completion()),
    )
}

/// Aggregated usage for one conversation. Unlike [`UsageCounters`], both
/// counts are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageTotal {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

impl UsageTotal {
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }

    pub fn total(&self) -> u64 {
        self.prompt_tokens.saturating_add(self.completion_tokens)
    }
}

impl From<UsageTotal> for UsageCounters {
    fn from(total: UsageTotal) -> Self {
        UsageCounters::new(total.prompt_tokens, total.completion_tokens)
    }
}

/// Running usage total for one conversation
#[derive(Debug, Clone, Copy, Default)]
pub struct UsageAccumulator {
    total: UsageTotal,
}

impl UsageAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, usage: UsageCounters) {
        let merged = merge(self.total.into(), usage);
        self.total = UsageTotal::new(merged.prompt(), merged.completion());
    }

    pub fn total(&self) -> UsageTotal {
        self.total
    }
}
