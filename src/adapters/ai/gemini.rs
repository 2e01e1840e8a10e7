//! Gemini Backend - Google Generative Language API client.
//!
//! Implements [`GenerationBackend`] over the REST API. Chat models go
//! through `generateContent` with function calling; `imagen-*` models go
//! through `predict`, whose base64 payload is returned as a `data:` URI.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new()
//!     .with_base_url("https://generativelanguage.googleapis.com/v1beta")
//!     .with_timeout(Duration::from_secs(120));
//!
//! let backend = GeminiBackend::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::chat::tools::ToolCall;
use crate::ports::{
    GeneratedMedia, GenerationError, GenerationRequest, GenerationResponse, PromptPart, PromptRole,
};

use super::resilient::GenerationBackend;

/// Default API base URL.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default retry-after hint when the provider rate limits without one.
const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

/// Configuration for the Gemini backend.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiConfig {
    /// Creates a configuration with production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Gemini API backend. One instance shares its HTTP connection pool across
/// all credentials; the key travels per request.
pub struct GeminiBackend {
    config: GeminiConfig,
    client: Client,
}

impl GeminiBackend {
    /// Creates a new backend with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn generate_content_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.config.base_url, model)
    }

    fn predict_url(&self, model: &str) -> String {
        format!("{}/models/{}:predict", self.config.base_url, model)
    }

    /// Image models use the `predict` endpoint instead of `generateContent`.
    fn is_image_model(model: &str) -> bool {
        model.starts_with("imagen")
    }

    async fn post_json<T: Serialize>(
        &self,
        url: String,
        api_key: &str,
        body: &T,
    ) -> Result<Response, GenerationError> {
        self.client
            .post(url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    GenerationError::network(format!("Connection failed: {}", e))
                } else {
                    GenerationError::network(e.to_string())
                }
            })
    }

    /// Maps non-success statuses into the error taxonomy.
    async fn handle_response_status(response: Response) -> Result<Response, GenerationError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(GenerationError::AuthenticationFailed),
            429 => Err(GenerationError::rate_limited(DEFAULT_RETRY_AFTER_SECS)),
            400 => Err(GenerationError::invalid_request(error_body)),
            500..=599 => Err(GenerationError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(GenerationError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let body = build_generate_content_body(request);
        let url = self.generate_content_url(&request.model);

        let response = self.post_json(url, api_key, &body).await?;
        let response = Self::handle_response_status(response).await?;

        let api_response: GeminiGenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::parse(format!("Failed to parse response: {}", e)))?;

        parse_generate_response(api_response)
    }

    async fn predict(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let body = build_predict_body(request)?;
        let url = self.predict_url(&request.model);

        let response = self.post_json(url, api_key, &body).await?;
        let response = Self::handle_response_status(response).await?;

        let api_response: GeminiPredictResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::parse(format!("Failed to parse response: {}", e)))?;

        parse_predict_response(api_response)
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        if Self::is_image_model(&request.model) {
            self.predict(api_key, request).await
        } else {
            self.generate_content(api_key, request).await
        }
    }
}

/// Converts a generation request into the `generateContent` body.
fn build_generate_content_body(request: &GenerationRequest) -> GeminiGenerateRequest {
    let contents = request
        .messages
        .iter()
        .map(|message| {
            let role = match message.role {
                PromptRole::User => "user",
                PromptRole::Model => "model",
                PromptRole::Tool => "tool",
            };
            let parts = message
                .parts
                .iter()
                .map(|part| match part {
                    PromptPart::Text(text) => GeminiPart::Text { text: text.clone() },
                    PromptPart::ToolCall(call) => GeminiPart::FunctionCall {
                        function_call: GeminiFunctionCall {
                            name: call.name.clone(),
                            args: call.arguments.clone(),
                        },
                    },
                    PromptPart::ToolResult(output) => GeminiPart::FunctionResponse {
                        function_response: GeminiFunctionResponse {
                            name: output.name.clone(),
                            response: output.payload.clone(),
                        },
                    },
                })
                .collect();

            GeminiContent {
                role: role.to_string(),
                parts,
            }
        })
        .collect();

    let tools = if request.tools.is_empty() {
        None
    } else {
        Some(vec![GeminiTool {
            function_declarations: request
                .tools
                .iter()
                .map(|tool| tool.to_gemini_format())
                .collect(),
        }])
    };

    GeminiGenerateRequest { contents, tools }
}

/// Converts an image generation request into the `predict` body.
///
/// The prompt is the text of the last user message.
fn build_predict_body(request: &GenerationRequest) -> Result<GeminiPredictRequest, GenerationError> {
    let prompt = request
        .messages
        .iter()
        .rev()
        .find(|m| m.role == PromptRole::User)
        .and_then(|m| {
            m.parts.iter().find_map(|p| match p {
                PromptPart::Text(text) => Some(text.clone()),
                _ => None,
            })
        })
        .ok_or_else(|| {
            GenerationError::invalid_request("image generation requires a text prompt")
        })?;

    Ok(GeminiPredictRequest {
        instances: vec![GeminiPredictInstance { prompt }],
        parameters: GeminiPredictParameters { sample_count: 1 },
    })
}

/// Extracts the response payload from a `generateContent` reply.
///
/// The first function call wins; otherwise text parts concatenate; an
/// inline image becomes a media payload.
fn parse_generate_response(
    response: GeminiGenerateResponse,
) -> Result<GenerationResponse, GenerationError> {
    let candidate = response
        .candidates
        .into_iter()
        .flatten()
        .next()
        .ok_or(GenerationError::NoOutput)?;

    let parts = candidate.content.parts;

    if let Some(call) = parts.iter().find_map(|p| p.function_call.as_ref()) {
        return Ok(GenerationResponse::ToolCall(ToolCall::new(
            call.name.clone(),
            call.args.clone(),
        )));
    }

    if let Some(inline) = parts.iter().find_map(|p| p.inline_data.as_ref()) {
        return Ok(GenerationResponse::Media(GeneratedMedia {
            url: format!("data:{};base64,{}", inline.mime_type, inline.data),
            mime_type: Some(inline.mime_type.clone()),
        }));
    }

    let text: String = parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect::<Vec<_>>()
        .join("");

    if text.is_empty() {
        return Err(GenerationError::NoOutput);
    }
    Ok(GenerationResponse::Text(text))
}

/// Extracts the generated image from a `predict` reply as a `data:` URI.
fn parse_predict_response(
    response: GeminiPredictResponse,
) -> Result<GenerationResponse, GenerationError> {
    let prediction = response
        .predictions
        .into_iter()
        .flatten()
        .next()
        .ok_or(GenerationError::NoOutput)?;

    let data = prediction
        .bytes_base64_encoded
        .ok_or(GenerationError::NoOutput)?;
    let mime_type = prediction
        .mime_type
        .unwrap_or_else(|| "image/png".to_string());

    Ok(GenerationResponse::Media(GeneratedMedia {
        url: format!("data:{};base64,{}", mime_type, data),
        mime_type: Some(mime_type),
    }))
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
struct GeminiGenerateRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<GeminiTool>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
    },
    FunctionCall {
        #[serde(rename = "functionCall")]
        function_call: GeminiFunctionCall,
    },
    FunctionResponse {
        #[serde(rename = "functionResponse")]
        function_response: GeminiFunctionResponse,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiFunctionCall {
    name: String,
    args: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct GeminiFunctionResponse {
    name: String,
    response: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct GeminiTool {
    #[serde(rename = "functionDeclarations")]
    function_declarations: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GeminiGenerateResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Debug, Deserialize, Default)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
    #[serde(rename = "functionCall")]
    function_call: Option<GeminiFunctionCall>,
    #[serde(rename = "inlineData")]
    inline_data: Option<GeminiInlineData>,
}

#[derive(Debug, Deserialize)]
struct GeminiInlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GeminiPredictRequest {
    instances: Vec<GeminiPredictInstance>,
    parameters: GeminiPredictParameters,
}

#[derive(Debug, Serialize)]
struct GeminiPredictInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
struct GeminiPredictParameters {
    #[serde(rename = "sampleCount")]
    sample_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiPredictResponse {
    predictions: Option<Vec<GeminiPrediction>>,
}

#[derive(Debug, Deserialize)]
struct GeminiPrediction {
    #[serde(rename = "bytesBase64Encoded")]
    bytes_base64_encoded: Option<String>,
    #[serde(rename = "mimeType")]
    mime_type: Option<String>,
}
