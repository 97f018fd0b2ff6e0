//! REST endpoint for the concierge chat.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use crate::concierge::{ChatMessage, ConciergeProvider, Role};
use crate::store::Database;

/// Shared state for concierge routes.
#[derive(Clone)]
pub struct ConciergeRouteState {
    pub db: Arc<dyn Database>,
    pub provider: Arc<dyn ConciergeProvider>,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    user_id: String,
    /// Continue an existing thread, or omit to start a new one.
    thread_id: Option<Uuid>,
    message: String,
}

/// POST /api/concierge/chat
///
/// Supplies the persona profile and conversation history to the concierge
/// backend and returns its free-text reply. Both turns are persisted to the
/// thread.
async fn chat(
    State(state): State<ConciergeRouteState>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    let stored = match state.db.get_profile(&request.user_id).await {
        Ok(Some(stored)) => stored,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "Complete onboarding first" })),
            )
                .into_response();
        }
        Err(err) => {
            tracing::error!("Database error: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Internal error" })),
            )
                .into_response();
        }
    };

    let thread_id = request.thread_id.unwrap_or_else(Uuid::new_v4);
    if let Err(err) = state.db.ensure_conversation(thread_id, &request.user_id).await {
        tracing::error!("Failed to ensure conversation: {err}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "Internal error" })),
        )
            .into_response();
    }

    let history: Vec<ChatMessage> = match state.db.list_conversation_messages(thread_id).await {
        Ok(messages) => messages
            .into_iter()
            .map(|m| ChatMessage {
                role: match m.role.as_str() {
                    "assistant" => Role::Assistant,
                    "system" => Role::System,
                    _ => Role::User,
                },
                content: m.content,
            })
            .collect(),
        Err(err) => {
            tracing::warn!("Failed to load conversation history: {err}");
            Vec::new()
        }
    };

    let reply = match state
        .provider
        .generate_reply(&request.message, &stored.profile, &history)
        .await
    {
        Ok(reply) => reply,
        Err(err) => {
            tracing::error!("Concierge backend failed: {err}");
            return (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({
                    "error": "I apologize, but I'm having trouble connecting right now. Please try again in a moment.",
                })),
            )
                .into_response();
        }
    };

    for (role, content) in [("user", request.message.as_str()), ("assistant", reply.as_str())] {
        if let Err(err) = state
            .db
            .add_conversation_message(thread_id, role, content)
            .await
        {
            tracing::warn!("Failed to persist chat message: {err}");
        }
    }

    if let Err(err) = state
        .db
        .log_interaction(
            &request.user_id,
            "ai_concierge",
            "chat",
            &serde_json::json!({ "thread_id": thread_id }),
            &serde_json::json!({ "model": state.provider.model_name() }),
            true,
        )
        .await
    {
        tracing::warn!("Failed to log concierge interaction: {err}");
    }

    Json(serde_json::json!({
        "thread_id": thread_id,
        "reply": reply,
    }))
    .into_response()
}

/// Build the concierge REST routes.
pub fn concierge_routes(state: ConciergeRouteState) -> Router {
    Router::new()
        .route("/api/concierge/chat", post(chat))
        .with_state(state)
}
