//! Insert and upsert parameters. Read-side rows are the `viva_types::models`
//! entities; these carry only what a caller supplies. Ids are assigned by
//! SQLite.

use chrono::{DateTime, Utc};
use viva_types::models::{
    AlertType, MetricType, PasswordStrength, RecommendationType, Role, Severity, ThreatType,
    TrackerType,
};

/// Identity fields from a login. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UpsertUser {
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_method: Option<String>,
    pub role: Option<Role>,
    pub last_signed_in: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewPrivacyScore {
    pub user_id: i64,
    pub score: i64,
    pub messaging_score: i64,
    pub browsing_score: i64,
    pub vpn_score: i64,
    pub email_score: i64,
    pub password_score: i64,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPrivacyMetric {
    pub user_id: i64,
    pub metric_type: MetricType,
    pub value: i64,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAlert {
    pub user_id: i64,
    pub alert_type: AlertType,
    pub severity: Severity,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRecommendation {
    pub user_id: i64,
    pub recommendation_type: RecommendationType,
    pub title: String,
    pub description: Option<String>,
    pub action_url: Option<String>,
    pub priority: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPasswordEntry {
    pub user_id: i64,
    pub website_url: String,
    pub username: String,
    pub encrypted_password: String,
    pub password_strength: PasswordStrength,
    pub is_breached: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEmailAlias {
    pub user_id: i64,
    pub alias_email: String,
    pub forwarding_email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewQuarantinedEmail {
    pub user_id: i64,
    pub sender_email: String,
    pub subject: Option<String>,
    pub threat_type: ThreatType,
    pub encrypted_content: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVpnSession {
    pub user_id: i64,
    pub server_location: String,
    pub connected_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTrackerBlock {
    pub user_id: i64,
    pub tracker_domain: String,
    pub tracker_type: TrackerType,
    pub block_count: i64,
    pub last_blocked_at: DateTime<Utc>,
}
