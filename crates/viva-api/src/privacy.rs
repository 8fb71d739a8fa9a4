use axum::{
    Extension, Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::Utc;
use viva_types::api::{CompleteRecommendationRequest, MutationResponse, ResolveAlertRequest};
use viva_types::models::{Alert, PrivacyMetric, PrivacyScore, Recommendation};

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::{AppState, run_blocking};

/// Metric rows returned to the dashboard chart.
const METRICS_LIMIT: u32 = 30;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/getScore", get(get_score))
        .route("/getMetrics", get(get_metrics))
        .route("/getAlerts", get(get_alerts))
        .route("/getRecommendations", get(get_recommendations))
        .route("/resolveAlert", post(resolve_alert))
        .route("/completeRecommendation", post(complete_recommendation))
}

/// Current score, or `null` when none was recorded; the client shows its own default.
pub async fn get_score(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Option<PrivacyScore>>, ApiError> {
    let score = run_blocking(&state, move |store| {
        store.read("get privacy score", |db| db.get_privacy_score(user.id))
    })
    .await?;
    Ok(Json(score))
}

pub async fn get_metrics(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<PrivacyMetric>>, ApiError> {
    let metrics = run_blocking(&state, move |store| {
        store.read("get privacy metrics", |db| db.get_privacy_metrics(user.id, METRICS_LIMIT))
    })
    .await?;
    Ok(Json(metrics))
}

pub async fn get_alerts(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<Alert>>, ApiError> {
    let alerts = run_blocking(&state, move |store| {
        store.read("get alerts", |db| db.get_active_alerts(user.id))
    })
    .await?;
    Ok(Json(alerts))
}

pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<Recommendation>>, ApiError> {
    let recs = run_blocking(&state, move |store| {
        store.read("get recommendations", |db| db.get_recommendations(user.id))
    })
    .await?;
    Ok(Json(recs))
}

pub async fn resolve_alert(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<ResolveAlertRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let affected = run_blocking(&state, move |store| {
        store.write("resolve alert", |db| db.resolve_alert(user.id, req.alert_id, Utc::now()))
    })
    .await?;
    Ok(Json(MutationResponse { success: true, affected }))
}

pub async fn complete_recommendation(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<CompleteRecommendationRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let affected = run_blocking(&state, move |store| {
        store.write("complete recommendation", |db| {
            db.complete_recommendation(user.id, req.recommendation_id, Utc::now())
        })
    })
    .await?;
    Ok(Json(MutationResponse { success: true, affected }))
}
