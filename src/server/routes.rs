//! Request handlers for the chat sidecar

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use axum::Json;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use uuid::Uuid;

use super::error::ApiError;
use super::AppState;
use crate::features::agents::Agent;
use crate::features::conversation::{ConversationOrchestrator, MaxMessages, TranscriptEntry};
use crate::features::usage::UsageTotal;

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    /// Turn budget including the seed; the configured default applies when absent
    #[serde(default)]
    pub max_rounds: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub messages: Vec<TranscriptEntry>,
    pub usage: UsageTotal,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Run one two-agent conversation on the submitted topic
pub async fn chat(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let client = client_key(&headers, peer);

    if !state.limiter.check_rate_limit(&client).await {
        warn!("[{request_id}] 🚫 Rate limit exceeded for {client}");
        return Err(ApiError::RateLimited {
            retry_after: state.limiter.time_window(),
        });
    }

    let Json(request) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

    if request.query.trim().is_empty() {
        return Err(ApiError::InvalidRequest("query must not be empty".to_string()));
    }

    let budget = request.max_rounds.unwrap_or(state.default_max_rounds);
    if budget > state.max_rounds_limit {
        return Err(ApiError::InvalidRequest(format!(
            "max_rounds must be at most {}",
            state.max_rounds_limit
        )));
    }

    info!(
        "[{request_id}] 📨 Chat request from {client} | max_rounds: {budget} | Query: '{}'",
        request.query.chars().take(80).collect::<String>()
    );

    let (first, second) = state
        .personas
        .conversation_pair()
        .ok_or_else(|| ApiError::Internal("conversation personas are not configured".to_string()))?;

    // Fresh agents and backend binding per request
    let completion = state.connector.connect();
    let orchestrator = ConversationOrchestrator::new(
        Agent::from_persona(first, completion.clone()),
        Agent::from_persona(second, completion),
        MaxMessages::new(budget),
    )
    .with_request_id(request_id);

    let outcome = orchestrator.run(&request.query).await?;
    let messages = outcome.transcript();

    info!("[{request_id}] 📤 Returning {} messages", messages.len());

    Ok(Json(ChatResponse {
        messages,
        usage: outcome.usage,
    }))
}

/// First `x-forwarded-for` hop, else the peer address
fn client_key(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| peer.ip().to_string())
}
