use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    services::provider::start_chat,
    state::SharedState,
};

/// Relay one message to the provider in a fresh, empty-history session.
#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let message = payload.message()?;

    let mut chat = start_chat(state.provider.as_ref());
    let reply = chat.send_message(message).await?;

    tracing::info!(
        model = state.provider.model(),
        message_len = message.len(),
        reply_len = reply.len(),
        "chat reply relayed"
    );

    Ok(Json(ChatResponse::reply(reply)))
}
