// End-to-end tests driving the procedure tree through the router.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use tower::ServiceExt;
use viva_api::{AppState, AppStateInner, build_router};
use viva_crypto::seal::open_secret;
use viva_db::models::{NewAlert, NewQuarantinedEmail, NewRecommendation};
use viva_db::{Database, Store};
use viva_types::api::IdentityClaims;
use viva_types::models::{AlertType, RecommendationType, Severity, ThreatType};

const JWT_SECRET: &str = "test-session-secret";
const IDENTITY_SECRET: &str = "test-identity-secret";
const COOKIE: &str = "app_session_id";
const OWNER: &str = "owner-open-id";
const VAULT_KEY: [u8; 32] = [7; 32];

fn state_with(store: Store) -> AppState {
    state_with_ttl(store, Duration::days(1))
}

fn state_with_ttl(store: Store, session_ttl: Duration) -> AppState {
    Arc::new(AppStateInner {
        store,
        jwt_secret: JWT_SECRET.into(),
        identity_secret: IDENTITY_SECRET.into(),
        cookie_name: COOKIE.into(),
        session_ttl,
        vault_key: VAULT_KEY,
    })
}

fn test_app() -> (Router, AppState) {
    let store = Store::new(Database::open_in_memory().unwrap(), Some(OWNER.into()));
    let state = state_with(store);
    (build_router(state.clone()), state)
}

fn disabled_app() -> Router {
    build_router(state_with(Store::disabled(Some(OWNER.into()))))
}

fn identity_token(open_id: &str, name: &str) -> String {
    let claims = IdentityClaims {
        sub: open_id.into(),
        name: Some(name.into()),
        email: Some(format!("{}@mail.test", open_id)),
        login_method: Some("google".into()),
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(IDENTITY_SECRET.as_bytes()),
    )
    .unwrap()
}

fn get(path: &str, token: Option<&str>) -> Request<Body> {
    let mut req = Request::builder().method("GET").uri(path);
    if let Some(token) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    req.body(Body::empty()).unwrap()
}

fn post(path: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut req = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    req.body(Body::from(body.to_string())).unwrap()
}

async fn call(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    // extractor rejections answer in plain text
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}

/// Sign in and return (session token, user json).
async fn login(app: &Router, open_id: &str, name: &str) -> (String, Value) {
    let (status, _, body) = call(
        app,
        post("/rpc/auth/login", None, json!({ "identityToken": identity_token(open_id, name) })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    (body["token"].as_str().unwrap().to_string(), body["user"].clone())
}

const PROTECTED: &[(&str, &str)] = &[
    ("GET", "/rpc/privacy/getScore"),
    ("GET", "/rpc/privacy/getMetrics"),
    ("GET", "/rpc/privacy/getAlerts"),
    ("GET", "/rpc/privacy/getRecommendations"),
    ("POST", "/rpc/privacy/resolveAlert"),
    ("POST", "/rpc/privacy/completeRecommendation"),
    ("GET", "/rpc/messaging/getConversations"),
    ("POST", "/rpc/messaging/sendMessage"),
    ("POST", "/rpc/messaging/toggleScreenshotDetection"),
    ("GET", "/rpc/browser/getTrackerStats"),
    ("POST", "/rpc/browser/toggleTrackerBlocking"),
    ("POST", "/rpc/browser/toggleAdBlocking"),
    ("GET", "/rpc/vpn/getStatus"),
    ("POST", "/rpc/vpn/toggleVpn"),
    ("GET", "/rpc/vpn/getServers"),
    ("GET", "/rpc/email/getAliases"),
    ("GET", "/rpc/email/getQuarantined"),
    ("POST", "/rpc/email/createAlias"),
    ("POST", "/rpc/email/deleteAlias"),
    ("POST", "/rpc/email/markReviewed"),
    ("GET", "/rpc/vault/getPasswords"),
    ("GET", "/rpc/vault/getBreachedPasswords"),
    ("POST", "/rpc/vault/addPassword"),
    ("POST", "/rpc/vault/deletePassword"),
    ("GET", "/rpc/gamification/getStreak"),
    ("GET", "/rpc/gamification/getBadges"),
    ("POST", "/rpc/gamification/incrementStreak"),
    ("GET", "/rpc/settings/getPreferences"),
    ("POST", "/rpc/settings/updatePreferences"),
];

// -- Auth gate --

#[tokio::test]
async fn protected_procedures_reject_anonymous_callers() {
    for app in [test_app().0, disabled_app()] {
        for (method, path) in PROTECTED {
            let req = Request::builder()
                .method(*method)
                .uri(*path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap();
            let (status, _, body) = call(&app, req).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, path);
            assert_eq!(body["error"], "Please login");
        }
    }
}

#[tokio::test]
async fn forged_session_token_is_rejected() {
    let (app, _) = test_app();
    login(&app, "alice", "Alice").await;

    let forged = encode(
        &Header::default(),
        &json!({ "sub": "alice", "exp": (Utc::now() + Duration::hours(1)).timestamp() }),
        &EncodingKey::from_secret(b"wrong-secret"),
    )
    .unwrap();
    let (status, _, _) = call(&app, get("/rpc/privacy/getScore", Some(&forged))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// -- Login / session --

#[tokio::test]
async fn second_login_updates_the_same_user() {
    let (app, _) = test_app();
    let (_, first) = login(&app, "alice", "Alice").await;
    let (token, second) = login(&app, "alice", "Alice Liddell").await;

    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["name"], "Alice Liddell");
    assert_eq!(second["role"], "user");
    assert_eq!(second["loginMethod"], "google");

    let (status, _, me) = call(&app, get("/rpc/auth/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["openId"], "alice");
    assert_eq!(me["name"], "Alice Liddell");
}

#[tokio::test]
async fn owner_is_promoted_to_admin() {
    let (app, _) = test_app();
    let (_, owner) = login(&app, OWNER, "Owner").await;
    assert_eq!(owner["role"], "admin");
}

#[tokio::test]
async fn login_sets_session_cookie_usable_without_bearer() {
    let (app, _) = test_app();
    let (status, headers, body) = call(
        &app,
        post("/rpc/auth/login", None, json!({ "identityToken": identity_token("bob", "Bob") })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let set_cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.starts_with(&format!("{}=", COOKIE)));
    assert!(set_cookie.contains("HttpOnly"));

    let token = body["token"].as_str().unwrap();
    let req = Request::builder()
        .uri("/rpc/auth/me")
        .header(header::COOKIE, format!("{}={}", COOKIE, token))
        .body(Body::empty())
        .unwrap();
    let (status, _, me) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["openId"], "bob");
}

#[tokio::test]
async fn bad_identity_token_is_unauthorized() {
    let (app, _) = test_app();
    let (status, _, body) = call(
        &app,
        post("/rpc/auth/login", None, json!({ "identityToken": "not-a-jwt" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Please login");
}

#[tokio::test]
async fn login_without_storage_is_unavailable() {
    let app = disabled_app();
    let (status, _, body) = call(
        &app,
        post("/rpc/auth/login", None, json!({ "identityToken": identity_token("alice", "Alice") })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "storage not available");
}

#[tokio::test]
async fn oversized_session_lifetime_fails_the_login() {
    let store = Store::new(Database::open_in_memory().unwrap(), None);
    let app = build_router(state_with_ttl(store, Duration::days(100_000_000)));

    let (status, headers, body) = call(
        &app,
        post("/rpc/auth/login", None, json!({ "identityToken": identity_token("alice", "Alice") })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("out of range"));
    assert!(headers.get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn empty_bearer_header_still_reads_the_cookie() {
    let (app, _) = test_app();
    let (token, _) = login(&app, "carol", "Carol").await;

    let req = Request::builder()
        .uri("/rpc/auth/me")
        .header(header::AUTHORIZATION, "Bearer ")
        .header(header::COOKIE, format!("{}={}", COOKIE, token))
        .body(Body::empty())
        .unwrap();
    let (status, _, me) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["openId"], "carol");
}

#[tokio::test]
async fn me_is_null_when_anonymous() {
    let (app, _) = test_app();
    let (status, _, body) = call(&app, get("/rpc/auth/me", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
}

#[tokio::test]
async fn logout_expires_the_cookie() {
    let (app, _) = test_app();
    let (status, headers, body) = call(&app, post("/rpc/auth/logout", None, json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let set_cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.starts_with(&format!("{}=;", COOKIE)));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn health_reports_storage() {
    let (app, _) = test_app();
    let (_, _, body) = call(&app, get("/health", None)).await;
    assert_eq!(body, json!({ "status": "ok", "storage": true }));

    let (_, _, body) = call(&disabled_app(), get("/health", None)).await;
    assert_eq!(body["storage"], false);
}

// -- Privacy --

#[tokio::test]
async fn fresh_user_has_no_score_and_empty_lists() {
    let (app, _) = test_app();
    let (token, _) = login(&app, "alice", "Alice").await;

    let (status, _, score) = call(&app, get("/rpc/privacy/getScore", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(score.is_null());

    for path in ["/rpc/privacy/getMetrics", "/rpc/privacy/getAlerts", "/rpc/privacy/getRecommendations"] {
        let (_, _, body) = call(&app, get(path, Some(&token))).await;
        assert_eq!(body, json!([]), "{}", path);
    }
}

#[tokio::test]
async fn resolved_alert_leaves_active_list() {
    let (app, state) = test_app();
    let (token, user) = login(&app, "alice", "Alice").await;
    let (other_token, _) = login(&app, "mallory", "Mallory").await;
    let user_id = user["id"].as_i64().unwrap();

    let alert_id = state
        .store
        .write("create alert", |db| {
            db.create_alert(&NewAlert {
                user_id,
                alert_type: AlertType::PhishingEmail,
                severity: Severity::High,
                title: "Phishing attempt blocked".into(),
                description: None,
                created_at: Utc::now(),
            })
        })
        .unwrap();

    let (_, _, alerts) = call(&app, get("/rpc/privacy/getAlerts", Some(&token))).await;
    assert_eq!(alerts.as_array().unwrap().len(), 1);
    assert_eq!(alerts[0]["alertType"], "phishingEmail");

    let (_, _, body) = call(
        &app,
        post("/rpc/privacy/resolveAlert", Some(&other_token), json!({ "alertId": alert_id })),
    )
    .await;
    assert_eq!(body["affected"], 0);

    let (status, _, body) = call(
        &app,
        post("/rpc/privacy/resolveAlert", Some(&token), json!({ "alertId": alert_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "affected": 1 }));

    let (_, _, alerts) = call(&app, get("/rpc/privacy/getAlerts", Some(&token))).await;
    assert_eq!(alerts, json!([]));
}

#[tokio::test]
async fn completed_recommendation_leaves_open_list() {
    let (app, state) = test_app();
    let (token, user) = login(&app, "alice", "Alice").await;
    let (other_token, _) = login(&app, "mallory", "Mallory").await;
    let user_id = user["id"].as_i64().unwrap();

    let rec_id = state
        .store
        .write("create recommendation", |db| {
            db.create_recommendation(&NewRecommendation {
                user_id,
                recommendation_type: RecommendationType::EnableVpn,
                title: "Turn on the VPN".into(),
                description: None,
                action_url: Some("/vpn".into()),
                priority: 5,
                created_at: Utc::now(),
            })
        })
        .unwrap();

    let (_, _, recs) = call(&app, get("/rpc/privacy/getRecommendations", Some(&token))).await;
    assert_eq!(recs[0]["recommendationType"], "enableVPN");

    let (_, _, body) = call(
        &app,
        post("/rpc/privacy/completeRecommendation", Some(&other_token), json!({ "recommendationId": rec_id })),
    )
    .await;
    assert_eq!(body["affected"], 0);

    let (status, _, body) = call(
        &app,
        post("/rpc/privacy/completeRecommendation", Some(&token), json!({ "recommendationId": rec_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "affected": 1 }));

    let (_, _, recs) = call(&app, get("/rpc/privacy/getRecommendations", Some(&token))).await;
    assert_eq!(recs, json!([]));
}

#[tokio::test]
async fn unknown_body_fields_are_rejected() {
    let (app, _) = test_app();
    let (token, _) = login(&app, "alice", "Alice").await;

    let (status, _, _) = call(
        &app,
        post("/rpc/privacy/resolveAlert", Some(&token), json!({ "alertId": 1, "force": true })),
    )
    .await;
    assert!(status.is_client_error());
    assert_ne!(status, StatusCode::UNAUTHORIZED);
}

// -- Vault --

#[tokio::test]
async fn vault_seals_passwords_and_scopes_deletes() {
    let (app, _) = test_app();
    let (token, _) = login(&app, "alice", "Alice").await;
    let (other_token, _) = login(&app, "mallory", "Mallory").await;

    let (status, _, created) = call(
        &app,
        post(
            "/rpc/vault/addPassword",
            Some(&token),
            json!({ "site": "example.com", "username": "alice", "password": "hunter2", "breached": true }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_i64().unwrap();

    let (_, _, entries) = call(&app, get("/rpc/vault/getPasswords", Some(&token))).await;
    let sealed = entries[0]["encryptedPassword"].as_str().unwrap();
    assert_ne!(sealed, "hunter2");
    assert_eq!(open_secret(&VAULT_KEY, sealed).unwrap(), b"hunter2");
    assert_eq!(entries[0]["passwordStrength"], "fair");

    let (_, _, breached) = call(&app, get("/rpc/vault/getBreachedPasswords", Some(&token))).await;
    assert_eq!(breached.as_array().unwrap().len(), 1);

    let (_, _, body) = call(
        &app,
        post("/rpc/vault/deletePassword", Some(&other_token), json!({ "passwordId": id })),
    )
    .await;
    assert_eq!(body["affected"], 0);

    let (_, _, body) = call(
        &app,
        post("/rpc/vault/deletePassword", Some(&token), json!({ "passwordId": id })),
    )
    .await;
    assert_eq!(body["affected"], 1);

    let (_, _, entries) = call(&app, get("/rpc/vault/getPasswords", Some(&token))).await;
    assert_eq!(entries, json!([]));
}

#[tokio::test]
async fn vault_requires_a_password() {
    let (app, _) = test_app();
    let (token, _) = login(&app, "alice", "Alice").await;
    let (status, _, body) = call(
        &app,
        post(
            "/rpc/vault/addPassword",
            Some(&token),
            json!({ "site": "example.com", "username": "alice", "password": "" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("password"));
}

// -- Email --

#[tokio::test]
async fn alias_defaults_to_account_address_and_deletes_are_scoped() {
    let (app, _) = test_app();
    let (token, _) = login(&app, "alice", "Alice").await;
    let (other_token, _) = login(&app, "mallory", "Mallory").await;

    let (status, _, created) = call(
        &app,
        post("/rpc/email/createAlias", Some(&token), json!({ "alias": "shop@relay.test" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let alias_id = created["id"].as_i64().unwrap();

    let (_, _, aliases) = call(&app, get("/rpc/email/getAliases", Some(&token))).await;
    assert_eq!(aliases[0]["aliasEmail"], "shop@relay.test");
    assert_eq!(aliases[0]["forwardingEmail"], "alice@mail.test");
    assert_eq!(aliases[0]["isActive"], true);

    let (_, _, body) = call(
        &app,
        post("/rpc/email/deleteAlias", Some(&other_token), json!({ "aliasId": alias_id })),
    )
    .await;
    assert_eq!(body["affected"], 0);

    let (_, _, body) = call(
        &app,
        post("/rpc/email/deleteAlias", Some(&token), json!({ "aliasId": alias_id })),
    )
    .await;
    assert_eq!(body["affected"], 1);
}

#[tokio::test]
async fn duplicate_alias_is_a_storage_failure() {
    let (app, _) = test_app();
    let (token, _) = login(&app, "alice", "Alice").await;
    let (other_token, _) = login(&app, "mallory", "Mallory").await;

    let body = json!({ "alias": "shop@relay.test" });
    let (status, _, _) = call(&app, post("/rpc/email/createAlias", Some(&token), body.clone())).await;
    assert_eq!(status, StatusCode::OK);

    // addresses are unique across all users
    let (status, _, err) = call(&app, post("/rpc/email/createAlias", Some(&other_token), body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(err["error"].as_str().unwrap().contains("UNIQUE constraint failed"));
}

#[tokio::test]
async fn forwarding_address_errors_name_the_problem() {
    let (app, _) = test_app();
    let (token, _) = login(&app, "alice", "Alice").await;

    let (status, _, err) = call(
        &app,
        post(
            "/rpc/email/createAlias",
            Some(&token),
            json!({ "alias": "shop@relay.test", "forwardingEmail": "not-an-address" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "forwardingEmail must be an email address");

    let (status, _, created) = call(
        &app,
        post(
            "/rpc/email/createAlias",
            Some(&token),
            json!({ "alias": "news@relay.test", "forwardingEmail": "inbox@mail.test" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(created["id"].as_i64().is_some());
}

#[tokio::test]
async fn reviewed_quarantine_entries_are_scoped() {
    let (app, state) = test_app();
    let (token, user) = login(&app, "alice", "Alice").await;
    let (other_token, _) = login(&app, "mallory", "Mallory").await;
    let user_id = user["id"].as_i64().unwrap();

    let email_id = state
        .store
        .write("create quarantined email", |db| {
            db.create_quarantined_email(&NewQuarantinedEmail {
                user_id,
                sender_email: "billing@paypa1.test".into(),
                subject: Some("Verify your account".into()),
                threat_type: ThreatType::Phishing,
                encrypted_content: None,
                created_at: Utc::now(),
            })
        })
        .unwrap();

    let (_, _, body) = call(
        &app,
        post("/rpc/email/markReviewed", Some(&other_token), json!({ "emailId": email_id })),
    )
    .await;
    assert_eq!(body["affected"], 0);

    let (status, _, body) = call(
        &app,
        post("/rpc/email/markReviewed", Some(&token), json!({ "emailId": email_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affected"], 1);

    let (_, _, emails) = call(&app, get("/rpc/email/getQuarantined", Some(&token))).await;
    assert_eq!(emails[0]["threatType"], "phishing");
    assert_eq!(emails[0]["isReviewed"], true);
}

#[tokio::test]
async fn alias_must_look_like_an_address() {
    let (app, _) = test_app();
    let (token, _) = login(&app, "alice", "Alice").await;
    let (status, _, _) = call(
        &app,
        post("/rpc/email/createAlias", Some(&token), json!({ "alias": "shop" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// -- VPN --

#[tokio::test]
async fn vpn_toggle_opens_and_closes_sessions() {
    let (app, _) = test_app();
    let (token, _) = login(&app, "alice", "Alice").await;

    let (_, _, status_body) = call(&app, get("/rpc/vpn/getStatus", Some(&token))).await;
    assert!(status_body.is_null());

    let (_, _, body) = call(&app, post("/rpc/vpn/toggleVpn", Some(&token), json!({ "enabled": true }))).await;
    assert_eq!(body["affected"], 1);

    // already connected
    let (_, _, body) = call(&app, post("/rpc/vpn/toggleVpn", Some(&token), json!({ "enabled": true }))).await;
    assert_eq!(body["affected"], 0);

    let (_, _, session) = call(&app, get("/rpc/vpn/getStatus", Some(&token))).await;
    assert_eq!(session["serverLocation"], "US-East");
    assert_eq!(session["isActive"], true);
    assert_eq!(session["dataUsedMB"], 0);

    let (_, _, body) = call(&app, post("/rpc/vpn/toggleVpn", Some(&token), json!({ "enabled": false }))).await;
    assert_eq!(body["affected"], 1);

    let (_, _, session) = call(&app, get("/rpc/vpn/getStatus", Some(&token))).await;
    assert!(session.is_null());
}

#[tokio::test]
async fn vpn_disconnect_ignores_location() {
    let (app, _) = test_app();
    let (token, _) = login(&app, "alice", "Alice").await;

    let (_, _, body) = call(
        &app,
        post("/rpc/vpn/toggleVpn", Some(&token), json!({ "enabled": true, "serverLocation": "EU-London" })),
    )
    .await;
    assert_eq!(body["affected"], 1);

    let (status, _, body) = call(
        &app,
        post("/rpc/vpn/toggleVpn", Some(&token), json!({ "enabled": false, "serverLocation": "Mars" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affected"], 1);

    let (_, _, session) = call(&app, get("/rpc/vpn/getStatus", Some(&token))).await;
    assert!(session.is_null());
}

#[tokio::test]
async fn vpn_rejects_unlisted_location() {
    let (app, _) = test_app();
    let (token, _) = login(&app, "alice", "Alice").await;
    let (status, _, _) = call(
        &app,
        post("/rpc/vpn/toggleVpn", Some(&token), json!({ "enabled": true, "serverLocation": "Moon-Base" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, _, servers) = call(&app, get("/rpc/vpn/getServers", Some(&token))).await;
    assert_eq!(servers.as_array().unwrap().len(), 5);
}

// -- Gamification --

#[tokio::test]
async fn same_day_check_in_keeps_the_streak() {
    let (app, _) = test_app();
    let (token, _) = login(&app, "alice", "Alice").await;

    let (_, _, streak) = call(&app, get("/rpc/gamification/getStreak", Some(&token))).await;
    assert!(streak.is_null());

    let (status, _, streak) = call(&app, post("/rpc/gamification/incrementStreak", Some(&token), json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(streak["currentStreak"], 1);
    assert_eq!(streak["longestStreak"], 1);

    let (_, _, streak) = call(&app, post("/rpc/gamification/incrementStreak", Some(&token), json!({}))).await;
    assert_eq!(streak["currentStreak"], 1);

    let (_, _, badges) = call(&app, get("/rpc/gamification/getBadges", Some(&token))).await;
    assert_eq!(badges, json!([]));
}

// -- Placeholders --

#[tokio::test]
async fn placeholder_procedures_answer_with_canned_data() {
    let (app, _) = test_app();
    let (token, _) = login(&app, "alice", "Alice").await;

    let (_, _, prefs) = call(&app, get("/rpc/settings/getPreferences", Some(&token))).await;
    assert_eq!(prefs["trackerBlocking"], true);
    assert_eq!(prefs["sessionTimeout"], 30);

    let (status, _, body) = call(
        &app,
        post("/rpc/settings/updatePreferences", Some(&token), json!({ "adBlocking": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, _, conversations) = call(&app, get("/rpc/messaging/getConversations", Some(&token))).await;
    assert_eq!(conversations, json!([]));

    let (_, _, sent) = call(
        &app,
        post(
            "/rpc/messaging/sendMessage",
            Some(&token),
            json!({ "recipientId": 2, "content": "hi", "selfDestruct": true }),
        ),
    )
    .await;
    assert_eq!(sent["success"], true);
    assert!(sent["messageId"].as_str().is_some());

    for path in [
        "/rpc/browser/toggleTrackerBlocking",
        "/rpc/browser/toggleAdBlocking",
        "/rpc/messaging/toggleScreenshotDetection",
    ] {
        let (status, _, body) = call(&app, post(path, Some(&token), json!({ "enabled": false }))).await;
        assert_eq!(status, StatusCode::OK, "{}", path);
        assert_eq!(body, json!({ "success": true }));
    }
}
