//! HTTP surface of the prompt dispatcher
//!
//! - POST /api/gemini/chat - dispatch a transcript, returns one assistant turn
//! - GET /api/status - health check
//! - GET /api/personas, GET /api/topics - static catalogs

mod error;

pub use error::{ApiError, ApiResult, ErrorEnvelope, DISPATCH_FAILURE};

use crate::api::GeminiClient;
use crate::catalog::{Persona, Topic, PERSONAS, TOPICS};
use crate::config::Config;
use crate::dispatcher::{DispatchReply, DispatchRequest, Dispatcher, Generator};
use crate::error::ChatError;
use anyhow::Result;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, Method},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub const CHAT_ROUTE: &str = "/api/gemini/chat";

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub model: String,
}

impl AppState {
    pub fn new(generator: Arc<dyn Generator>, model: impl Into<String>) -> Self {
        Self {
            dispatcher: Dispatcher::new(generator),
            model: model.into(),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(CHAT_ROUTE, post(chat_handler))
        .route("/api/status", get(status_handler))
        .route("/api/personas", get(personas_handler))
        .route("/api/topics", get(topics_handler))
        .layer(cors)
        .with_state(state)
}

/// Run the dispatcher until Ctrl-C.
pub async fn run(config: &Config) -> Result<()> {
    let client = GeminiClient::from_config(config)?;
    let state = AppState::new(Arc::new(client), config.model.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    info!(addr = %listener.local_addr()?, model = %config.model, "Dispatcher listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}

async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<DispatchReply>> {
    // Oversized or unreadable bodies get the same envelope as any other failure.
    let body = body.map_err(|e| {
        ApiError::dispatch(&ChatError::InvalidRequest(format!("Unreadable body: {}", e)), None)
    })?;
    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        ApiError::dispatch(&ChatError::InvalidRequest(format!("Body is not JSON: {}", e)), None)
    })?;

    let request = DispatchRequest::from_json(&payload).map_err(|e| ApiError::dispatch(&e, None))?;

    state
        .dispatcher
        .dispatch(&request)
        .await
        .map(Json)
        .map_err(|e| ApiError::dispatch(&e, Some(&request.selection())))
}

async fn status_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": state.model,
        "personas": PERSONAS.len(),
        "topics": TOPICS.len(),
    }))
}

async fn personas_handler() -> Json<&'static [Persona]> {
    Json(PERSONAS)
}

async fn topics_handler() -> Json<&'static [Topic]> {
    Json(TOPICS)
}
