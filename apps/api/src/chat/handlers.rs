//! Axum route handlers for the Chatbot page.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat::session::ChatMessage;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub id: Uuid,
    pub messages: Vec<ChatMessage>,
}

fn chat_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Chat session {id} not found"))
}

/// POST /api/v1/chats
pub async fn handle_create_chat(State(state): State<AppState>) -> (StatusCode, Json<ChatResponse>) {
    let (id, messages) = state.chats.create().await;
    (StatusCode::CREATED, Json(ChatResponse { id, messages }))
}

/// GET /api/v1/chats/:id
pub async fn handle_get_chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChatResponse>, AppError> {
    let messages = state
        .chats
        .messages(id)
        .await
        .ok_or_else(|| chat_not_found(id))?;
    Ok(Json(ChatResponse { id, messages }))
}

/// POST /api/v1/chats/:id/messages
///
/// Returns the stored user message; the bot reply shows up in the transcript
/// after the configured delay.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessage>), AppError> {
    let message = state
        .chats
        .send(id, request.text)
        .await
        .ok_or_else(|| chat_not_found(id))??;
    Ok((StatusCode::ACCEPTED, Json(message)))
}

/// DELETE /api/v1/chats/:id
pub async fn handle_close_chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.chats.close(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(chat_not_found(id))
    }
}
