//! VideoShare Server Library
//!
//! This module exports the core types and functions for testing and reuse.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod queue;
pub mod routes;
pub mod security;
pub mod speech;
pub mod storage;

pub use config::Config;
pub use db::{open_store, Db, DocumentStore};
pub use error::{AppError, Result};

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{header, Method, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use queue::QueueClient;
use routes::{
    delete_video, get_transcription, get_video, health_check, like_video, list_videos, login_user,
    register_user, transcribe_video, upload_video,
};
use speech::SpeechClient;
use storage::BlobStore;

/// Application state shared across all handlers.
///
/// Service clients are constructed once at startup and injected here; no
/// handler reaches for ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub store: DocumentStore,
    pub blobs: BlobStore,
    pub queue: QueueClient,
    pub speech: Arc<dyn SpeechClient>,
    pub config: Config,
}

/// Rewrite CORS preflight answers to `204 No Content`. The CORS layer
/// replies to preflights itself, but with 200.
async fn preflight_no_content(request: Request, next: Next) -> Response {
    let preflight = request.method() == Method::OPTIONS
        && request
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD);
    let mut response = next.run(request).await;
    if preflight && response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}

/// Build the full application router: API routes, blob serving, and the
/// static frontend, wrapped in permissive CORS and request tracing.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/register", post(register_user))
        .route("/api/auth/login", post(login_user))
        .route("/api/videos", get(list_videos).post(upload_video))
        .route("/api/videos/:id", get(get_video).delete(delete_video))
        .route("/api/videos/:id/like", post(like_video))
        .route("/api/videos/:id/transcribe", post(transcribe_video))
        .route("/api/videos/:id/transcript", get(get_transcription))
        .nest_service("/blobs", ServeDir::new(&state.config.blob_dir))
        .fallback_service(ServeDir::new(&state.config.static_dir))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(preflight_no_content))
        .with_state(state)
}
