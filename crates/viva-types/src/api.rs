use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{PasswordStrength, User};

// -- Tokens --

/// Session token claims. `sub` is the user's openId.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub exp: usize,
}

/// Claims of the identity token minted by the OAuth bridge after a
/// successful provider login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityClaims {
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub login_method: Option<String>,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginRequest {
    pub identity_token: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

// -- Generic --

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MutationResponse {
    pub success: bool,
    /// Rows touched. Zero when the target does not exist or belongs to someone else.
    pub affected: usize,
}

/// Reply to a mutation that inserts a row.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToggleRequest {
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub storage: bool,
}

// -- Privacy --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResolveAlertRequest {
    pub alert_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompleteRecommendationRequest {
    pub recommendation_id: i64,
}

// -- Messaging --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SendMessageRequest {
    pub recipient_id: i64,
    pub content: String,
    #[serde(default)]
    pub self_destruct: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub success: bool,
    pub message_id: Uuid,
}

// -- VPN --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ToggleVpnRequest {
    pub enabled: bool,
    #[serde(default)]
    pub server_location: Option<String>,
}

// -- Email --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateAliasRequest {
    pub alias: String,
    #[serde(default)]
    pub forwarding_email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeleteAliasRequest {
    pub alias_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MarkReviewedRequest {
    pub email_id: i64,
}

// -- Vault --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AddPasswordRequest {
    pub site: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub strength: Option<PasswordStrength>,
    #[serde(default)]
    pub breached: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeletePasswordRequest {
    pub password_id: i64,
}
