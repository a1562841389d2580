//! HTTP boundary for the SMS gateway
//!
//! Two routes:
//! - POST /process-sms - run one agent turn over an inbound message body
//! - GET /health - liveness check

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

use crate::llm::SmsResponder;

/// Inbound message from the SMS gateway
#[derive(Debug, Deserialize)]
pub struct SmsRequest {
    pub sms_body: String,
}

/// Reply sent back to the gateway
#[derive(Debug, Serialize)]
pub struct SmsResponse {
    pub response: String,
}

#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<dyn SmsResponder>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/process-sms", post(process_sms_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn run(port: u16, agent: Arc<dyn SmsResponder>) -> anyhow::Result<()> {
    let app = create_router(AppState { agent });
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn process_sms_handler(
    State(state): State<AppState>,
    Json(request): Json<SmsRequest>,
) -> Result<Json<SmsResponse>, (StatusCode, String)> {
    let sms_body = request.sms_body.trim();
    if sms_body.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "sms_body must not be empty".to_string(),
        ));
    }

    info!("Received SMS for processing: `{}`", sms_body);

    match state.agent.respond(sms_body).await {
        Ok(reply) => {
            info!("Agent generated reply: `{}`", reply);
            Ok(Json(SmsResponse { response: reply }))
        }
        Err(e) => {
            error!("Agent invocation failed: {:#}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error while processing your message".to_string(),
            ))
        }
    }
}
