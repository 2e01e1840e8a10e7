//! HTTP handlers for the generation endpoints
//!
//! These handlers connect Axum routes to the application-layer flows.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::flows::{
    ChatError, ChatFlow, ChatInput, FlowModels, GenerateImageFlow, GenerateImageInput,
    GenerateTitleFlow, GenerateTitleInput, ImageFlowError, RegenerateError, RegenerateFlow,
    RegenerateInput, TitleFlowError,
};
use crate::ports::{Generator, SearchProvider};

use super::dto::{
    chat_response, ChatRequest, ErrorResponse, ImageRequest, ImageResponse, RegenerateRequest,
    RegenerateResponse, TitleRequest, TitleResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn Generator>,
    pub search: Arc<dyn SearchProvider>,
    pub models: FlowModels,
}

impl AppState {
    pub fn new(
        generator: Arc<dyn Generator>,
        search: Arc<dyn SearchProvider>,
        models: FlowModels,
    ) -> Self {
        Self {
            generator,
            search,
            models,
        }
    }

    pub fn chat_flow(&self) -> ChatFlow<dyn Generator, dyn SearchProvider> {
        ChatFlow::new(
            self.generator.clone(),
            self.search.clone(),
            self.models.clone(),
        )
    }

    pub fn image_flow(&self) -> GenerateImageFlow<dyn Generator> {
        GenerateImageFlow::new(self.generator.clone(), self.models.image.clone())
    }

    pub fn title_flow(&self) -> GenerateTitleFlow<dyn Generator> {
        GenerateTitleFlow::new(self.generator.clone(), self.models.chat.clone())
    }

    pub fn regenerate_flow(&self) -> RegenerateFlow<dyn Generator> {
        RegenerateFlow::new(self.generator.clone(), self.models.chat.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// Run one chat turn
///
/// POST /chat
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let flow = state.chat_flow();

    let outcome = flow.execute(ChatInput::new(req.prompt)).await.map_err(|e| match e {
        ChatError::EmptyPrompt => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(e.to_string())),
        ),
        ChatError::GenerationFailed(_) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::generation_failed(e.to_string())),
        ),
    })?;

    Ok(Json(chat_response(outcome)))
}

/// Generate an image
///
/// POST /images
pub async fn generate_image(
    State(state): State<AppState>,
    Json(req): Json<ImageRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let flow = state.image_flow();

    let image = flow
        .execute(GenerateImageInput::new(req.prompt))
        .await
        .map_err(|e| match e {
            ImageFlowError::EmptyPrompt => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            ),
            ImageFlowError::GenerationFailed(_) => (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::generation_failed(e.to_string())),
            ),
        })?;

    Ok(Json(ImageResponse {
        image_url: image.image_url,
    }))
}

/// Generate a conversation title
///
/// POST /chat/title
pub async fn generate_title(
    State(state): State<AppState>,
    Json(req): Json<TitleRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let flow = state.title_flow();

    let title = flow
        .execute(GenerateTitleInput::new(req.conversation))
        .await
        .map_err(|e| match e {
            TitleFlowError::EmptyConversation => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            ),
            TitleFlowError::GenerationFailed(_) => (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::generation_failed(e.to_string())),
            ),
        })?;

    Ok(Json(TitleResponse { title: title.title }))
}

/// Regenerate an assistant response
///
/// POST /chat/regenerate
pub async fn regenerate(
    State(state): State<AppState>,
    Json(req): Json<RegenerateRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let flow = state.regenerate_flow();

    let regenerated = flow
        .execute(RegenerateInput::new(req.prompt))
        .await
        .map_err(|e| match e {
            RegenerateError::EmptyPrompt => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            ),
            RegenerateError::GenerationFailed(_) => (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::generation_failed(e.to_string())),
            ),
        })?;

    Ok(Json(RegenerateResponse {
        response: regenerated.response,
    }))
}
