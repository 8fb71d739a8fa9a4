use axum::{
    Extension, Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::Utc;
use tracing::info;
use viva_crypto::seal::seal_secret;
use viva_db::models::NewPasswordEntry;
use viva_types::api::{AddPasswordRequest, CreatedResponse, DeletePasswordRequest, MutationResponse};
use viva_types::models::PasswordEntry;

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::{AppState, run_blocking};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/getPasswords", get(get_passwords))
        .route("/getBreachedPasswords", get(get_breached_passwords))
        .route("/addPassword", post(add_password))
        .route("/deletePassword", post(delete_password))
}

pub async fn get_passwords(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<PasswordEntry>>, ApiError> {
    let entries = run_blocking(&state, move |store| {
        store.read("get password entries", |db| db.get_password_entries(user.id))
    })
    .await?;
    Ok(Json(entries))
}

pub async fn get_breached_passwords(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<PasswordEntry>>, ApiError> {
    let entries = run_blocking(&state, move |store| {
        store.read("get breached passwords", |db| db.get_breached_passwords(user.id))
    })
    .await?;
    Ok(Json(entries))
}

/// Store a credential. The plaintext is sealed with the vault key here and
/// never reaches storage.
pub async fn add_password(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<AddPasswordRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    if req.site.trim().is_empty() || req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("site, username and password are required"));
    }

    let sealed = seal_secret(&state.vault_key, req.password.as_bytes())
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let entry = NewPasswordEntry {
        user_id: user.id,
        website_url: req.site.trim().to_string(),
        username: req.username,
        encrypted_password: sealed,
        password_strength: req.strength.unwrap_or_default(),
        is_breached: req.breached.unwrap_or(false),
        created_at: Utc::now(),
    };
    let id = run_blocking(&state, move |store| {
        store.write("create password entry", |db| db.create_password_entry(&entry))
    })
    .await?;

    info!("Stored vault entry {} for user {}", id, user.id);
    Ok(Json(CreatedResponse { success: true, id }))
}

pub async fn delete_password(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<DeletePasswordRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let affected = run_blocking(&state, move |store| {
        store.write("delete password entry", |db| db.delete_password_entry(user.id, req.password_id))
    })
    .await?;
    Ok(Json(MutationResponse { success: true, affected }))
}
