//! HTTP surface for the bot
//!
//! Exposes the command webhook the messaging platform delivers messages to,
//! plus a constant liveness endpoint for external uptime monitoring.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use log::info;
use serde::{Deserialize, Serialize};

use crate::commands::Dispatcher;

/// Shared state for HTTP handlers
///
/// Everything here is immutable; concurrent requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub bot_token: Arc<String>,
}

/// JSON request body for the command webhook
#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    /// Raw message text as typed by the user
    pub content: String,
}

/// JSON response body for the command webhook
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// Reply text, or null when the message was not a command
    pub reply: Option<String>,
}

/// GET / - Liveness endpoint
async fn alive() -> &'static str {
    "alive"
}

/// POST /command - Handle one delivered message
async fn handle_command(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CommandRequest>,
) -> Result<Json<CommandResponse>, StatusCode> {
    if !is_authorized(&headers, &state.bot_token) {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let reply = state.dispatcher.dispatch(&request.content).await;
    Ok(Json(CommandResponse { reply }))
}

/// Check the static bootstrap token on the Authorization header
fn is_authorized(headers: &HeaderMap, token: &str) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|presented| presented == token)
}

/// Create the HTTP router
pub fn create_router(dispatcher: Arc<Dispatcher>, bot_token: String) -> Router {
    let state = AppState {
        dispatcher,
        bot_token: Arc::new(bot_token),
    };

    Router::new()
        .route("/", get(alive))
        .route("/command", post(handle_command))
        .with_state(state)
}

/// Run the HTTP server until the task is dropped
pub async fn run_server(
    dispatcher: Arc<Dispatcher>,
    bot_token: String,
    port: u16,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_router(dispatcher, bot_token);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("HTTP server listening on port {}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
