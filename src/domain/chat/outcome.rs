//! Chat turn outcome - the terminal result of one conversational turn.
//!
//! A turn ends with exactly one content modality: plain text, a generated
//! image, or a search-grounded answer. The enum makes the exclusivity
//! structural; [`ChatReply`] is the wire shape the caller persists.

use serde::{Deserialize, Serialize};

use super::tools::{IMAGE_GENERATION_TOOL_NAME, WEB_SEARCH_TOOL_NAME};

/// Terminal outcome of a chat turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// The model answered directly with text; no tool was invoked.
    Text { response: String },

    /// The model requested image generation; the turn ends with the image.
    Image { image_url: String },

    /// The model requested a web search and synthesized an answer from
    /// the results in a second call.
    SearchAnswer { response: String },
}

impl ChatOutcome {
    /// Returns the name of the tool used in this turn, if any.
    pub fn tool_used(&self) -> Option<&'static str> {
        match self {
            ChatOutcome::Text { .. } => None,
            ChatOutcome::Image { .. } => Some(IMAGE_GENERATION_TOOL_NAME),
            ChatOutcome::SearchAnswer { .. } => Some(WEB_SEARCH_TOOL_NAME),
        }
    }

    /// Returns the text response, if this outcome carries one.
    pub fn response(&self) -> Option<&str> {
        match self {
            ChatOutcome::Text { response } | ChatOutcome::SearchAnswer { response } => {
                Some(response)
            }
            ChatOutcome::Image { .. } => None,
        }
    }

    /// Returns the image URL, if this outcome carries one.
    pub fn image_url(&self) -> Option<&str> {
        match self {
            ChatOutcome::Image { image_url } => Some(image_url),
            _ => None,
        }
    }
}

/// Serialized form of a chat outcome.
///
/// `response` and `image_url` are mutually exclusive; `tool_used` is
/// informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,

    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(rename = "toolUsed", skip_serializing_if = "Option::is_none")]
    pub tool_used: Option<String>,
}

impl From<ChatOutcome> for ChatReply {
    fn from(outcome: ChatOutcome) -> Self {
        let tool_used = outcome.tool_used().map(str::to_string);
        match outcome {
            ChatOutcome::Text { response } | ChatOutcome::SearchAnswer { response } => Self {
                response: Some(response),
                image_url: None,
                tool_used,
            },
            ChatOutcome::Image { image_url } => Self {
                response: None,
                image_url: Some(image_url),
                tool_used,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_outcome_has_no_tool() {
        let outcome = ChatOutcome::Text {
            response: "4".to_string(),
        };
        assert_eq!(outcome.tool_used(), None);
        assert_eq!(outcome.response(), Some("4"));
        assert_eq!(outcome.image_url(), None);
    }

    #[test]
    fn image_outcome_reports_image_generation() {
        let outcome = ChatOutcome::Image {
            image_url: "data:image/png;base64,AAAA".to_string(),
        };
        assert_eq!(outcome.tool_used(), Some("imageGeneration"));
        assert_eq!(outcome.response(), None);
        assert_eq!(outcome.image_url(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn search_outcome_reports_web_search() {
        let outcome = ChatOutcome::SearchAnswer {
            response: "It is sunny in Paris.".to_string(),
        };
        assert_eq!(outcome.tool_used(), Some("webSearch"));
        assert_eq!(outcome.response(), Some("It is sunny in Paris."));
    }

    #[test]
    fn reply_serializes_text_only() {
        let reply = ChatReply::from(ChatOutcome::Text {
            response: "4".to_string(),
        });
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json, serde_json::json!({ "response": "4" }));
    }

    #[test]
    fn reply_serializes_image_with_tool() {
        let reply = ChatReply::from(ChatOutcome::Image {
            image_url: "data:image/png;base64,AAAA".to_string(),
        });
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "imageUrl": "data:image/png;base64,AAAA",
                "toolUsed": "imageGeneration"
            })
        );
    }

    #[test]
    fn reply_never_carries_both_modalities() {
        let text = ChatReply::from(ChatOutcome::SearchAnswer {
            response: "answer".to_string(),
        });
        assert!(text.response.is_some() && text.image_url.is_none());

        let image = ChatReply::from(ChatOutcome::Image {
            image_url: "data:x".to_string(),
        });
        assert!(image.response.is_none() && image.image_url.is_some());
    }
}
