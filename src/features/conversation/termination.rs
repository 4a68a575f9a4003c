//! Termination policies for the turn loop

/// Decides whether a conversation of a given length is complete.
///
/// Implementations must be monotonic: once `should_stop(n)` is true it stays
/// true for every larger `n`.
pub trait TerminationPolicy: Send + Sync {
    fn should_stop(&self, message_count: usize) -> bool;
}

/// Stop once the conversation holds `budget` messages, seed included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxMessages {
    budget: i64,
}

impl MaxMessages {
    /// Budgets of zero or below are accepted and stop immediately
    pub fn new(budget: i64) -> Self {
        Self { budget }
    }

    pub fn budget(&self) -> i64 {
        self.budget
    }
}

impl Default for MaxMessages {
    fn default() -> Self {
        Self::new(crate::core::config::DEFAULT_MAX_ROUNDS)
    }
}

impl TerminationPolicy for MaxMessages {
    fn should_stop(&self, message_count: usize) -> bool {
        i64::try_from(message_count).map_or(true, |count| count >= self.budget)
    }
}
