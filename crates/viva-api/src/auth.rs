use axum::{Json, extract::State, http::HeaderMap};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::{debug, info};
use viva_db::models::UpsertUser;
use viva_types::api::{IdentityClaims, LoginRequest, LoginResponse, SessionClaims, SuccessResponse};
use viva_types::models::User;

use crate::error::ApiError;
use crate::middleware::resolve_user;
use crate::state::{AppState, run_blocking};

/// POST /rpc/auth/login: exchange an identity token from the OAuth bridge for
/// a session. Creates the user on first login and refreshes it afterwards.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let identity = decode::<IdentityClaims>(
        &req.identity_token,
        &DecodingKey::from_secret(state.identity_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        debug!("Rejected identity token: {}", e);
        ApiError::unauthorized()
    })?
    .claims;

    let upsert = UpsertUser {
        open_id: identity.sub,
        name: identity.name,
        email: identity.email,
        login_method: identity.login_method,
        role: None,
        last_signed_in: Some(chrono::Utc::now()),
    };
    let open_id = upsert.open_id.clone();

    let user = run_blocking(&state, move |store| {
        store.upsert_user(&upsert)?;
        store.get_user_by_open_id(&upsert.open_id)
    })
    .await?
    .ok_or_else(|| ApiError::unavailable("storage not available"))?;

    let token = create_session_token(&state.jwt_secret, &user, state.session_ttl)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    info!("User {} signed in", open_id);

    let cookie = Cookie::build((state.cookie_name.clone(), token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    Ok((jar.add(cookie), Json(LoginResponse { user, token })))
}

/// GET /rpc/auth/me: the signed-in user, or `null`.
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Option<User>>, ApiError> {
    Ok(Json(resolve_user(&state, &headers).await?))
}

/// POST /rpc/auth/logout: always answers with an expired session cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<SuccessResponse>) {
    let mut removal = Cookie::build((state.cookie_name.clone(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    removal.make_removal();

    (jar.add(removal), Json(SuccessResponse::ok()))
}

pub fn create_session_token(
    secret: &str,
    user: &User,
    ttl: chrono::Duration,
) -> anyhow::Result<String> {
    let exp = chrono::Utc::now()
        .checked_add_signed(ttl)
        .filter(|exp| exp.timestamp() > 0)
        .ok_or_else(|| anyhow::anyhow!("Session lifetime out of range: {}", ttl))?;

    let claims = SessionClaims {
        sub: user.open_id.clone(),
        name: user.name.clone(),
        exp: exp.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}
