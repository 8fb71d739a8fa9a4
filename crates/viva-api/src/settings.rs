//! Preference procedures. Placeholder: preferences are not stored, reads
//! return the default set and updates are validated then dropped.

use axum::{
    Extension, Json, Router,
    routing::{get, post},
};
use tracing::debug;
use viva_types::api::SuccessResponse;
use viva_types::placeholders::{UserPreferences, UserPreferencesPatch};

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/getPreferences", get(get_preferences))
        .route("/updatePreferences", post(update_preferences))
}

pub async fn get_preferences(Extension(CurrentUser(_user)): Extension<CurrentUser>) -> Json<UserPreferences> {
    Json(UserPreferences::default())
}

pub async fn update_preferences(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(patch): Json<UserPreferencesPatch>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if patch.session_timeout == Some(0) {
        return Err(ApiError::bad_request("sessionTimeout must be at least one minute"));
    }

    debug!("Discarding preference update for user {}: {:?}", user.id, patch);
    Ok(Json(SuccessResponse::ok()))
}
