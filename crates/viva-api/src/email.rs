use axum::{
    Extension, Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::Utc;
use tracing::info;
use viva_db::models::NewEmailAlias;
use viva_types::api::{
    CreateAliasRequest, CreatedResponse, DeleteAliasRequest, MarkReviewedRequest, MutationResponse,
};
use viva_types::models::{EmailAlias, QuarantinedEmail};

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::{AppState, run_blocking};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/getAliases", get(get_aliases))
        .route("/getQuarantined", get(get_quarantined))
        .route("/createAlias", post(create_alias))
        .route("/deleteAlias", post(delete_alias))
        .route("/markReviewed", post(mark_reviewed))
}

pub async fn get_aliases(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<EmailAlias>>, ApiError> {
    let aliases = run_blocking(&state, move |store| {
        store.read("get email aliases", |db| db.get_email_aliases(user.id))
    })
    .await?;
    Ok(Json(aliases))
}

pub async fn get_quarantined(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<QuarantinedEmail>>, ApiError> {
    let emails = run_blocking(&state, move |store| {
        store.read("get quarantined emails", |db| db.get_quarantined_emails(user.id))
    })
    .await?;
    Ok(Json(emails))
}

/// Mail to the alias forwards to `forwardingEmail`, or to the account's own
/// address when none is given.
pub async fn create_alias(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<CreateAliasRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let alias_email = req.alias.trim().to_string();
    if !looks_like_address(&alias_email) {
        return Err(ApiError::bad_request("alias must be an email address"));
    }

    let forwarding_email = match req.forwarding_email {
        Some(supplied) if looks_like_address(supplied.trim()) => supplied.trim().to_string(),
        Some(_) => return Err(ApiError::bad_request("forwardingEmail must be an email address")),
        None => user
            .email
            .clone()
            .filter(|e| looks_like_address(e))
            .ok_or_else(|| ApiError::bad_request("forwardingEmail is required"))?,
    };

    let alias = NewEmailAlias {
        user_id: user.id,
        alias_email,
        forwarding_email,
        created_at: Utc::now(),
    };
    let id = run_blocking(&state, move |store| {
        store.write("create email alias", |db| db.create_email_alias(&alias))
    })
    .await?;

    info!("Created email alias {} for user {}", id, user.id);
    Ok(Json(CreatedResponse { success: true, id }))
}

pub async fn delete_alias(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<DeleteAliasRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let affected = run_blocking(&state, move |store| {
        store.write("delete email alias", |db| db.delete_email_alias(user.id, req.alias_id))
    })
    .await?;
    Ok(Json(MutationResponse { success: true, affected }))
}

pub async fn mark_reviewed(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<MarkReviewedRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let affected = run_blocking(&state, move |store| {
        store.write("mark email reviewed", |db| db.mark_quarantined_reviewed(user.id, req.email_id))
    })
    .await?;
    Ok(Json(MutationResponse { success: true, affected }))
}

fn looks_like_address(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !s.contains(char::is_whitespace),
        None => false,
    }
}
