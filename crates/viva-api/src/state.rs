use std::sync::Arc;

use tracing::error;
use viva_db::{Store, StoreError};

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Store,
    /// HS256 secret for session tokens issued by this server.
    pub jwt_secret: String,
    /// HS256 secret shared with the OAuth bridge that mints identity tokens.
    pub identity_secret: String,
    pub cookie_name: String,
    pub session_ttl: chrono::Duration,
    /// AES-256 key sealing vault secrets.
    pub vault_key: [u8; 32],
}

/// Run a storage call on the blocking pool.
pub async fn run_blocking<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Store) -> Result<T, StoreError> + Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.store))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::internal("internal error")
        })?
        .map_err(ApiError::from)
}
