//! # HTTP Server
//!
//! Thin axum layer in front of the conversation core: `POST /chat` runs one
//! conversation, `GET /health` reports liveness. CORS admits a single origin.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial release with chat and health routes

pub mod error;
pub mod routes;

use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::core::{CompletionError, Config, ConfigError};
use crate::features::completion::{CompletionConnector, OpenAiConnector};
use crate::features::personas::PersonaManager;
use crate::features::rate_limiting::RateLimiter;

pub use error::ApiError;
pub use routes::{ChatRequest, ChatResponse};

/// Shared, read-only handler state. Nothing here is mutated per conversation.
#[derive(Clone)]
pub struct AppState {
    pub connector: Arc<dyn CompletionConnector>,
    pub personas: Arc<PersonaManager>,
    pub limiter: Arc<RateLimiter>,
    pub default_max_rounds: i64,
    pub max_rounds_limit: i64,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, CompletionError> {
        Ok(Self {
            connector: Arc::new(OpenAiConnector::from_config(config)?),
            personas: Arc::new(PersonaManager::new()),
            limiter: Arc::new(RateLimiter::new(
                config.rate_limit_max_requests,
                config.rate_limit_window,
            )),
            default_max_rounds: config.default_max_rounds,
            max_rounds_limit: config.max_rounds_limit,
        })
    }
}

/// Build the application router
pub fn router(state: AppState, allowed_origin: &str) -> Result<Router, ConfigError> {
    let origin = HeaderValue::from_str(allowed_origin).map_err(|_| ConfigError::Invalid {
        key: "ALLOWED_ORIGIN",
        value: allowed_origin.to_string(),
    })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::POST])
        .allow_headers(Any);

    Ok(Router::new()
        .route("/chat", post(routes::chat))
        .route("/health", get(routes::health))
        .with_state(state)
        .layer(cors))
}
