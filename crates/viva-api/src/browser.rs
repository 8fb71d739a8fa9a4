use axum::{
    Extension, Json, Router,
    extract::State,
    routing::{get, post},
};
use tracing::debug;
use viva_types::api::{SuccessResponse, ToggleRequest};
use viva_types::models::TrackerBlock;

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::{AppState, run_blocking};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/getTrackerStats", get(get_tracker_stats))
        .route("/toggleTrackerBlocking", post(toggle_tracker_blocking))
        .route("/toggleAdBlocking", post(toggle_ad_blocking))
}

pub async fn get_tracker_stats(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<TrackerBlock>>, ApiError> {
    let stats = run_blocking(&state, move |store| {
        store.read("get tracker stats", |db| db.get_tracker_block_stats(user.id))
    })
    .await?;
    Ok(Json(stats))
}

/// Placeholder: no blocking engine reads this preference yet.
pub async fn toggle_tracker_blocking(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<ToggleRequest>,
) -> Json<SuccessResponse> {
    debug!("Ignoring trackerBlocking={} for user {}", req.enabled, user.id);
    Json(SuccessResponse::ok())
}

/// Placeholder, see [`toggle_tracker_blocking`].
pub async fn toggle_ad_blocking(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<ToggleRequest>,
) -> Json<SuccessResponse> {
    debug!("Ignoring adBlocking={} for user {}", req.enabled, user.id);
    Json(SuccessResponse::ok())
}
