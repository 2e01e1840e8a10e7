//! Route definitions for the generation endpoints

use axum::routing::post;
use axum::Router;

use super::handlers::{chat, generate_image, generate_title, regenerate, AppState};

/// Create the API router
///
/// # Endpoints
///
/// - `POST /chat` - Run one chat turn (may invoke tools)
/// - `POST /chat/title` - Generate a conversation title
/// - `POST /chat/regenerate` - Regenerate an assistant response
/// - `POST /images` - Generate an image from a prompt
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/chat/title", post(generate_title))
        .route("/chat/regenerate", post(regenerate))
        .route("/images", post(generate_image))
}
