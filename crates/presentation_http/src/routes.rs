//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Tutor chat and quizzes
        .route("/api/chat", post(handlers::chat::chat))
        .route("/api/quiz", post(handlers::quiz::generate_quiz))
        // Realtime voice
        .route(
            "/api/realtime/openai",
            post(handlers::realtime::openai_session),
        )
        .route(
            "/api/realtime/connect",
            post(handlers::realtime::connect_session),
        )
        .route("/api/ice-servers", get(handlers::ice::ice_servers))
        // Attach state
        .with_state(state)
}
