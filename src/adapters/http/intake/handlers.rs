//! HTTP handlers for intake endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};

use crate::application::{InboundMessage, InboundMessageHandler, IntakeHandlerError};
use crate::domain::foundation::Timestamp;

use super::dto::{ErrorResponse, MessageRequest, MessageResponse, WebhookForm};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct IntakeAppState {
    handler: Arc<InboundMessageHandler>,
}

impl IntakeAppState {
    pub fn new(handler: Arc<InboundMessageHandler>) -> Self {
        Self { handler }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/messages - Apply one JSON message
pub async fn post_message(
    State(state): State<IntakeAppState>,
    Json(req): Json<MessageRequest>,
) -> Response {
    let msg = InboundMessage {
        sender: req.sender,
        text: req.text,
        received_at: Timestamp::now(),
    };

    match state.handler.handle(msg).await {
        Ok(reply) => (StatusCode::OK, Json(MessageResponse::from(reply))).into_response(),
        Err(e) => handle_intake_error(e),
    }
}

/// POST /webhook - Apply one form-encoded provider message, reply as plain text
pub async fn post_webhook(
    State(state): State<IntakeAppState>,
    Form(form): Form<WebhookForm>,
) -> Response {
    let msg = InboundMessage {
        sender: form.from,
        text: form.body,
        received_at: Timestamp::now(),
    };

    match state.handler.handle(msg).await {
        Ok(reply) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            reply.reply,
        )
            .into_response(),
        Err(e) => handle_intake_error(e),
    }
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_intake_error(error: IntakeHandlerError) -> Response {
    match error {
        IntakeHandlerError::InvalidSender(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(e.to_string())),
        )
            .into_response(),
        IntakeHandlerError::Storage(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(e.to_string())),
        )
            .into_response(),
    }
}
