//! # Usage Feature
//!
//! Token usage accounting across heterogeneous completion backends.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod accumulator;

pub use accumulator::{merge, UsageAccumulator, UsageCounters, UsageTotal};
