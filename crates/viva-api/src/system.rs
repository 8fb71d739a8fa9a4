use axum::{Json, extract::State};
use viva_types::api::HealthResponse;

use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        storage: state.store.is_available(),
    })
}
