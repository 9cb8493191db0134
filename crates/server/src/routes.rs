//! JSON API routes for the conversation and recommendation flow.
//!
//! - `POST /chat`      — one conversation turn; replies with a follow-up
//!   question or the fixed completion message
//! - `GET  /recommend` — ranked cards for a completed session
//! - `POST /reset`     — drop the session and start fresh
//!
//! Unmatched paths fall through to the static frontend directory.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use tracing::{info, warn};
use uuid::Uuid;

use cardwise_agent::ConversationRuntime;
use cardwise_core::domain::card::RecommendedCard;
use cardwise_core::errors::{ApplicationError, DomainError};
use cardwise_core::{catalog, recommend};

use crate::sessions::{SessionId, SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub runtime: Arc<ConversationRuntime>,
    pub catalog_path: PathBuf,
}

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub cards: Vec<RecommendedCard>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub status: &'static str,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/recommend", get(recommend_cards))
        .route("/reset", post(reset))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let correlation_id = Uuid::new_v4().to_string();
    let session_id = SessionId::from_request(request.session_id);

    // Work on a snapshot so no session lock is held across the oracle call;
    // the commit below merges monotonically.
    let mut profile = state.sessions.profile(&session_id).await;
    let outcome = state.runtime.advance(&mut profile, &request.message).await;
    state.sessions.commit(&session_id, &profile).await;

    info!(
        event_name = "server.chat.turn",
        correlation_id = %correlation_id,
        session_id = %session_id.0,
        profile_complete = profile.is_complete(),
        "chat turn processed"
    );

    Json(ChatResponse { reply: outcome.reply().to_string() })
}

pub async fn recommend_cards(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4().to_string();
    let session_id = SessionId::from_request(query.session_id);
    let profile = state.sessions.profile(&session_id).await;

    if !profile.is_complete() {
        let interface = ApplicationError::from(DomainError::IncompleteProfile {
            missing: profile.missing_fields(),
        })
        .into_interface(correlation_id.clone());
        warn!(
            event_name = "server.recommend.incomplete_profile",
            correlation_id = %correlation_id,
            session_id = %session_id.0,
            "recommendation requested before all fields were collected"
        );
        return (
            StatusCode::CONFLICT,
            Json(ErrorResponse { error: interface.user_message().to_string() }),
        )
            .into_response();
    }

    let snapshot = match catalog::load_from_path(&state.catalog_path) {
        Ok(snapshot) => snapshot,
        Err(error) => {
            let interface =
                ApplicationError::Catalog(error.to_string()).into_interface(correlation_id.clone());
            warn!(
                event_name = "server.recommend.catalog_unavailable",
                correlation_id = %correlation_id,
                session_id = %session_id.0,
                error = %error,
                "catalog snapshot could not be loaded"
            );
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse { error: interface.user_message().to_string() }),
            )
                .into_response();
        }
    };

    let cards = recommend::recommend(&profile, &snapshot);
    info!(
        event_name = "server.recommend.ranked",
        correlation_id = %correlation_id,
        session_id = %session_id.0,
        result_count = cards.len(),
        "catalog ranked for completed profile"
    );

    (StatusCode::OK, Json(RecommendResponse { cards })).into_response()
}

pub async fn reset(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Json<ResetResponse> {
    let correlation_id = Uuid::new_v4().to_string();
    let session_id = SessionId::from_request(query.session_id);
    let removed = state.sessions.reset(&session_id).await;

    info!(
        event_name = "server.session.reset",
        correlation_id = %correlation_id,
        session_id = %session_id.0,
        removed,
        "session state cleared"
    );

    Json(ResetResponse { status: "reset" })
}
