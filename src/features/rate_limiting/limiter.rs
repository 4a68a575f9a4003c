//! # Feature: Rate Limiting
//!
//! Caps chat requests per client with a sliding window. Uses DashMap for
//! thread-safe concurrent access across request handlers.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use dashmap::DashMap;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct RateLimiter {
    requests: DashMap<String, Vec<Instant>>,
    max_requests: usize,
    time_window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: usize, time_window: Duration) -> Self {
        RateLimiter {
            requests: DashMap::new(),
            max_requests,
            time_window,
        }
    }

    pub fn time_window(&self) -> Duration {
        self.time_window
    }

    /// Record a request for `client` and report whether it is allowed
    pub async fn check_rate_limit(&self, client: &str) -> bool {
        let now = Instant::now();
        let mut entry = self.requests.entry(client.to_string()).or_default();

        entry.retain(|&time| now.duration_since(time) < self.time_window);

        if entry.len() >= self.max_requests {
            false
        } else {
            entry.push(now);
            true
        }
    }

    /// Drop clients whose window has fully elapsed
    pub fn prune(&self) {
        let now = Instant::now();
        self.requests.retain(|_, times| {
            times.retain(|&time| now.duration_since(time) < self.time_window);
            !times.is_empty()
        });
    }

    #[cfg(test)]
    pub fn tracked_clients(&self) -> usize {
        self.requests.len()
    }
}
