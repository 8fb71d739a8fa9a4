use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{DecodingKey, Validation, decode};
use tracing::debug;
use viva_types::api::SessionClaims;
use viva_types::models::User;

use crate::error::ApiError;
use crate::state::{AppState, run_blocking};

/// The authenticated user, inserted into request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Session token from `Authorization: Bearer`, falling back to the session cookie.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    bearer.or_else(|| {
        CookieJar::from_headers(headers)
            .get(cookie_name)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    })
}

pub fn decode_session(token: &str, secret: &str) -> Result<SessionClaims, ApiError> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!("Rejected session token: {}", e);
        ApiError::unauthorized()
    })
}

/// Resolve the caller to a stored user.
///
/// `Ok(None)` when there is no valid session. The token is checked before
/// storage is consulted.
pub async fn resolve_user(state: &AppState, headers: &HeaderMap) -> Result<Option<User>, ApiError> {
    let Some(token) = session_token(headers, &state.cookie_name) else {
        return Ok(None);
    };
    let Ok(claims) = decode_session(&token, &state.jwt_secret) else {
        return Ok(None);
    };

    run_blocking(state, move |store| store.get_user_by_open_id(&claims.sub)).await
}

/// Gate for protected procedures. Rejects with 401 before the handler runs.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = resolve_user(&state, req.headers())
        .await?
        .ok_or_else(ApiError::unauthorized)?;

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_takes_precedence_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("app_session_id=from-cookie"));
        assert_eq!(session_token(&headers, "app_session_id").as_deref(), Some("from-cookie"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(session_token(&headers, "app_session_id").as_deref(), Some("from-header"));
    }

    #[test]
    fn no_token_anywhere() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("other=1; app_session_id="));
        assert!(session_token(&headers, "app_session_id").is_none());
        assert!(session_token(&HeaderMap::new(), "app_session_id").is_none());
    }

    #[test]
    fn empty_bearer_falls_back_to_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        headers.insert(header::COOKIE, HeaderValue::from_static("app_session_id=from-cookie"));
        assert_eq!(session_token(&headers, "app_session_id").as_deref(), Some("from-cookie"));
    }

    #[test]
    fn garbage_token_is_unauthorized() {
        let err = decode_session("not-a-jwt", "secret").unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }
}
