//! HTTP adapter - Axum routes, handlers, and DTOs for the flows.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChatRequest, ChatResponse, ErrorResponse, ImageRequest, ImageResponse, RegenerateRequest,
    RegenerateResponse, TitleRequest, TitleResponse,
};
pub use handlers::AppState;
pub use routes::routes;
