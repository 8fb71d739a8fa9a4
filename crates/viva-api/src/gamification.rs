use axum::{
    Extension, Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::Utc;
use tracing::debug;
use viva_types::models::{Badge, PrivacyStreak};

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::{AppState, run_blocking};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/getStreak", get(get_streak))
        .route("/getBadges", get(get_badges))
        .route("/incrementStreak", post(increment_streak))
}

pub async fn get_streak(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Option<PrivacyStreak>>, ApiError> {
    let streak = run_blocking(&state, move |store| {
        store.read("get privacy streak", |db| db.get_privacy_streak(user.id))
    })
    .await?;
    Ok(Json(streak))
}

pub async fn get_badges(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<Badge>>, ApiError> {
    let badges = run_blocking(&state, move |store| {
        store.read("get badges", |db| db.get_user_badges(user.id))
    })
    .await?;
    Ok(Json(badges))
}

/// Daily check-in. Takes no body.
pub async fn increment_streak(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<PrivacyStreak>, ApiError> {
    let streak = run_blocking(&state, move |store| {
        store.write("increment streak", |db| db.increment_streak(user.id, Utc::now()))
    })
    .await?;

    debug!(
        "User {} streak now {} (longest {})",
        streak.user_id, streak.current_streak, streak.longest_streak
    );
    Ok(Json(streak))
}
