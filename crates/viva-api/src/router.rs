use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::require_auth;
use crate::state::AppState;
use crate::{auth, browser, email, gamification, messaging, privacy, settings, system, vault, vpn};

/// The full procedure tree. Layers such as CORS and tracing are left to the binary.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/rpc/auth/login", post(auth::login))
        .route("/rpc/auth/me", get(auth::me))
        .route("/rpc/auth/logout", post(auth::logout))
        .route("/health", get(system::health));

    let protected_routes = Router::new()
        .nest("/rpc/privacy", privacy::routes())
        .nest("/rpc/messaging", messaging::routes())
        .nest("/rpc/browser", browser::routes())
        .nest("/rpc/vpn", vpn::routes())
        .nest("/rpc/email", email::routes())
        .nest("/rpc/vault", vault::routes())
        .nest("/rpc/gamification", gamification::routes())
        .nest("/rpc/settings", settings::routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
