//! HTTP DTOs for intake endpoints.

use serde::{Deserialize, Serialize};

use crate::application::InboundReply;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// JSON message from a channel bridge.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRequest {
    pub sender: String,
    pub text: String,
}

/// Form-encoded webhook payload as posted by messaging providers.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookForm {
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "Body", default)]
    pub body: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub complaint_id: Option<String>,
}

impl From<InboundReply> for MessageResponse {
    fn from(reply: InboundReply) -> Self {
        Self {
            reply: reply.reply,
            complaint_id: reply.complaint_id.map(|id| id.to_string()),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ComplaintId, Identity};

    #[test]
    fn webhook_form_reads_provider_field_names() {
        let form: WebhookForm =
            serde_json::from_str(r#"{"From":"whatsapp:+911234567890","Body":"hi"}"#).unwrap();
        assert_eq!(form.from, "whatsapp:+911234567890");
        assert_eq!(form.body, "hi");
    }

    #[test]
    fn message_response_omits_missing_complaint_id() {
        let reply = InboundReply {
            identity: Identity::new("a").unwrap(),
            reply: "hello".into(),
            state: None,
            complaint_id: None,
        };
        let json = serde_json::to_string(&MessageResponse::from(reply)).unwrap();
        assert_eq!(json, r#"{"reply":"hello"}"#);
    }

    #[test]
    fn message_response_carries_complaint_id() {
        let id = ComplaintId::new();
        let reply = InboundReply {
            identity: Identity::new("a").unwrap(),
            reply: "done".into(),
            state: None,
            complaint_id: Some(id),
        };
        let response = MessageResponse::from(reply);
        assert_eq!(response.complaint_id, Some(id.to_string()));
    }
}
