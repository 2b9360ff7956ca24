use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequestBody {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatReplyBody {
    pub reply: String,
}

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequestBody>,
) -> Result<Json<ChatReplyBody>, AppError> {
    let client = state.chat.as_ref().ok_or(AppError::ChatUnavailable)?;
    if request.messages.is_empty() {
        return Err(AppError::Validation("messages cannot be empty".to_string()));
    }

    let reply = client
        .send_message(&request.messages)
        .await
        .ok_or(AppError::ChatFailed)?;
    Ok(Json(ChatReplyBody { reply }))
}
