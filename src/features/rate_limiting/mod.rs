//! # Rate Limiting Feature
//!
//! Prevents request floods with configurable per-client limits.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod limiter;

pub use limiter::RateLimiter;
