use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::error::JudgeError;
use crate::judge::JudgeResponse;
use crate::orchestrator::{JudgeService, ServiceMetadata};

// In-band error body. Never carries a signature.
struct ServerError {
    error: JudgeError,
    judge_address: String,
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self.error {
            JudgeError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("❌ Judge request failed: {}", self.error);
        } else {
            warn!("Rejected judge request: {}", self.error);
        }

        let body = serde_json::json!({
            "error": self.error.to_string(),
            "judge_address": self.judge_address,
        });
        (status, Json(body)).into_response()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub judge: Arc<JudgeService>,
}

impl AppState {
    pub fn new(judge: JudgeService) -> Self {
        Self { judge: Arc::new(judge) }
    }
}

/// `/judge` plus its legacy aliases.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(metadata))
        .route("/judge", post(judge))
        .route("/analyze", post(judge))
        .route("/finalize", post(judge))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(state: AppState, addr: &str) -> Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 Water Judge ready: http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn metadata(State(state): State<AppState>) -> Json<ServiceMetadata> {
    Json(state.judge.metadata())
}

async fn judge(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<JudgeResponse>, ServerError> {
    let into_server_error = |error| ServerError {
        error,
        judge_address: state.judge.judge_address(),
    };

    let Json(body) =
        payload.map_err(|e| into_server_error(JudgeError::InvalidRequest(e.body_text())))?;
    let response = state.judge.judge(body).await.map_err(into_server_error)?;

    Ok(Json(response))
}
