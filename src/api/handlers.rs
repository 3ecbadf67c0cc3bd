//! HTTP request handlers

use super::sse::sse_stream;
use super::types::{ErrorResponse, MessageRequest, MessageResponse, SessionSnapshot};
use super::AppState;
use crate::runtime::SubmitError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/session", get(get_session))
        .route("/api/session/messages", post(post_message))
        .route("/api/session/stream", get(stream_session))
        .route("/version", get(get_version))
        .with_state(state)
}

async fn get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(SessionSnapshot::from(&state.session.snapshot()))
}

/// Accept a message and run the exchange in the background
async fn post_message(
    State(state): State<AppState>,
    Json(req): Json<MessageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let pending = state.session.begin(&req.text)?;
    tokio::spawn(pending.run());
    Ok((StatusCode::ACCEPTED, Json(MessageResponse { accepted: true })))
}

async fn stream_session(State(state): State<AppState>) -> impl IntoResponse {
    // Subscribe before taking the snapshot so no event falls in between
    let broadcast_rx = state.session.subscribe();
    let init = SessionSnapshot::from(&state.session.snapshot());
    sse_stream(init, broadcast_rx)
}

async fn get_version() -> &'static str {
    concat!("home-strategist ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Conflict(String),
}

impl From<SubmitError> for AppError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::EmptyMessage => AppError::BadRequest(e.to_string()),
            SubmitError::ExchangeInFlight => AppError::Conflict(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
