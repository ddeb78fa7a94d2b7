use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::handlers;
use crate::state::AppState;

const OK: &str = "OK";

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/", get(health_check))

        // Telephony webhooks
        .route("/voice", post(handlers::voice))
        .route("/process", post(handlers::process))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;

    let openai = if config.llm_config.api_key().is_some() {
        OK
    } else {
        "OPENAI_API_KEY is not set"
    };
    let twilio = if config.twilio_config.is_configured() {
        OK
    } else {
        "TWILIO_ACCOUNT_SID or TWILIO_AUTH_TOKEN is not set"
    };

    Json(json!({
        "app": OK,
        "openai": openai,
        "twilio": twilio
    }))
}
