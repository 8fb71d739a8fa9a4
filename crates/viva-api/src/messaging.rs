//! Messaging procedures.
//!
//! Placeholders: there is no message store or delivery path yet. Conversations
//! are always empty, sent messages are acknowledged and dropped, and the
//! screenshot toggle is not persisted.

use axum::{
    Extension, Json, Router,
    routing::{get, post},
};
use tracing::debug;
use uuid::Uuid;
use viva_types::api::{SendMessageRequest, SendMessageResponse, SuccessResponse, ToggleRequest};

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/getConversations", get(get_conversations))
        .route("/sendMessage", post(send_message))
        .route("/toggleScreenshotDetection", post(toggle_screenshot_detection))
}

pub async fn get_conversations(
    Extension(CurrentUser(_user)): Extension<CurrentUser>,
) -> Json<Vec<serde_json::Value>> {
    Json(Vec::new())
}

pub async fn send_message(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    if req.content.is_empty() {
        return Err(ApiError::bad_request("content must not be empty"));
    }

    debug!(
        "Discarding message from user {} to {} (self_destruct={:?})",
        user.id, req.recipient_id, req.self_destruct
    );

    Ok(Json(SendMessageResponse {
        success: true,
        message_id: Uuid::new_v4(),
    }))
}

pub async fn toggle_screenshot_detection(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<ToggleRequest>,
) -> Json<SuccessResponse> {
    debug!("Ignoring screenshotDetection={} for user {}", req.enabled, user.id);
    Json(SuccessResponse::ok())
}
