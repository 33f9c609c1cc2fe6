pub mod contacts;
pub mod error;
pub mod notes;
pub mod payload;

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use tether_core::MessageDto;

use crate::state::AppState;

pub async fn root(State(state): State<AppState>) -> Json<MessageDto> {
    Json(MessageDto::new(format!("Welcome to {}", state.title())))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
