//! Conversation and message endpoints.

use axum::extract::{Path, State};
use axum::Json;

use crate::api::dto::{ConversationItem, ItemsResponse, MessageItem, SendMessageRequest};
use crate::api::extract::CurrentUser;
use crate::api::state::AppState;
use crate::error::AppError;
use crate::services::messaging;

/// GET /conversations
pub async fn list_conversations(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ItemsResponse<ConversationItem>>, AppError> {
    let mut db = state.db.lock().await;
    let conversations = messaging::list_conversations(&mut db, &user)?;
    Ok(Json(ItemsResponse {
        items: conversations
            .into_iter()
            .map(ConversationItem::from)
            .collect(),
    }))
}

/// GET /conversations/{conversation_id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(conversation_id): Path<String>,
) -> Result<Json<ItemsResponse<MessageItem>>, AppError> {
    let mut db = state.db.lock().await;
    let messages = messaging::list_messages(&mut db, &user, &conversation_id)?;
    Ok(Json(ItemsResponse {
        items: messages.into_iter().map(MessageItem::from).collect(),
    }))
}

/// POST /conversations/{conversation_id}/messages
pub async fn send_message(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(conversation_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<MessageItem>, AppError> {
    let mut db = state.db.lock().await;
    let message = messaging::send_message(&mut db, &user, &conversation_id, &request.text)?;
    Ok(Json(MessageItem::from(message)))
}
