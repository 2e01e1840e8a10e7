//! HTTP DTOs for the generation endpoints
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::chat::{ChatOutcome, ChatReply};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request for a chat turn
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
}

/// Request for standalone image generation
#[derive(Debug, Clone, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
}

/// Request for conversation title generation
#[derive(Debug, Clone, Deserialize)]
pub struct TitleRequest {
    pub conversation: String,
}

/// Request for response regeneration
#[derive(Debug, Clone, Deserialize)]
pub struct RegenerateRequest {
    pub prompt: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for a chat turn: `{response?, imageUrl?, toolUsed?}`
pub type ChatResponse = ChatReply;

/// Builds the chat response body from a turn outcome.
pub fn chat_response(outcome: ChatOutcome) -> ChatResponse {
    ChatReply::from(outcome)
}

/// Response for image generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResponse {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// Response for title generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleResponse {
    pub title: String,
}

/// Response for regeneration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegenerateResponse {
    pub response: String,
}

/// Standard error response
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

    pub fn generation_failed(message: impl Into<String>) -> Self {
        Self {
            code: "GENERATION_FAILED".to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_deserializes() {
        let req: ChatRequest =
            serde_json::from_str(r#"{ "prompt": "What is 2+2?" }"#).unwrap();
        assert_eq!(req.prompt, "What is 2+2?");
    }

    #[test]
    fn chat_response_carries_outcome_shape() {
        let body = chat_response(ChatOutcome::Image {
            image_url: "data:image/png;base64,AAAA".to_string(),
        });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["imageUrl"], "data:image/png;base64,AAAA");
        assert_eq!(json["toolUsed"], "imageGeneration");
        assert!(json.get("response").is_none());
    }

    #[test]
    fn image_response_uses_camel_case_key() {
        let body = ImageResponse {
            image_url: "data:x".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "imageUrl": "data:x" }));
    }

    #[test]
    fn error_response_constructors_set_codes() {
        assert_eq!(ErrorResponse::bad_request("x").code, "BAD_REQUEST");
        assert_eq!(
            ErrorResponse::generation_failed("x").code,
            "GENERATION_FAILED"
        );
    }
}
