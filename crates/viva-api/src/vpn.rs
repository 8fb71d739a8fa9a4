use axum::{
    Extension, Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::Utc;
use tracing::info;
use viva_types::api::{MutationResponse, ToggleVpnRequest};
use viva_types::models::VpnSession;
use viva_types::placeholders::{DEFAULT_VPN_LOCATION, VpnServer, vpn_servers};

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::{AppState, run_blocking};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/getStatus", get(get_status))
        .route("/toggleVpn", post(toggle_vpn))
        .route("/getServers", get(get_servers))
}

/// The active session, or `null` when disconnected.
pub async fn get_status(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Option<VpnSession>>, ApiError> {
    let session = run_blocking(&state, move |store| {
        store.read("get vpn session", |db| db.get_active_vpn_session(user.id))
    })
    .await?;
    Ok(Json(session))
}

/// Records session state only; no tunnel is opened.
pub async fn toggle_vpn(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<ToggleVpnRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let enabled = req.enabled;
    let location = req
        .server_location
        .unwrap_or_else(|| DEFAULT_VPN_LOCATION.to_string());
    // location is ignored when disconnecting
    if enabled && !vpn_servers().iter().any(|s| s.name == location) {
        return Err(ApiError::bad_request(format!("unknown server location: {}", location)));
    }

    let affected = run_blocking(&state, move |store| {
        store.write("update vpn status", |db| {
            db.update_vpn_status(user.id, enabled, &location, Utc::now())
        })
    })
    .await?;

    info!("VPN {} for user {} ({} sessions changed)", if enabled { "on" } else { "off" }, user.id, affected);
    Ok(Json(MutationResponse { success: true, affected }))
}

/// Placeholder: fixed list, not backed by real endpoints.
pub async fn get_servers(Extension(CurrentUser(_user)): Extension<CurrentUser>) -> Json<Vec<VpnServer>> {
    Json(vpn_servers())
}
