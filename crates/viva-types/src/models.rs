use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

string_enum! {
    pub enum Role {
        User => "user",
        Admin => "admin",
    }
}

string_enum! {
    pub enum MetricType {
        E2eeMessages => "e2eeMessages",
        SelfDestructMessages => "selfDestructMessages",
        TrackersBlocked => "trackersBlocked",
        AdsBlocked => "adsBlocked",
        FingerprintingBlocked => "fingerprintingBlocked",
        VpnConnected => "vpnConnected",
        E2eeEmails => "e2eeEmails",
        PhishingDetected => "phishingDetected",
        WeakPasswords => "weakPasswords",
        BreachesDetected => "breachesDetected",
    }
}

string_enum! {
    pub enum AlertType {
        WeakPassword => "weakPassword",
        DataLeak => "dataLeak",
        PhishingEmail => "phishingEmail",
        MaliciousTracker => "maliciousTracker",
        UnencryptedConnection => "unencryptedConnection",
        VpnDisconnected => "vpnDisconnected",
        SuspiciousApp => "suspiciousApp",
    }
}

string_enum! {
    #[derive(Default)]
    pub enum Severity {
        Low => "low",
        #[default]
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
}

string_enum! {
    pub enum RecommendationType {
        UpdatePassword => "updatePassword",
        EnableVpn => "enableVPN",
        ReviewQuarantinedEmails => "reviewQuarantinedEmails",
        EnableE2ee => "enableE2EE",
        BlockTrackers => "blockTrackers",
        AuditPasswords => "auditPasswords",
    }
}

string_enum! {
    pub enum BadgeType {
        E2eeMaster => "e2eeMaster",
        FingerprintGhost => "fingerprintGhost",
        VpnGuardian => "vpnGuardian",
        PhishingDefender => "phishingDefender",
        PasswordPro => "passwordPro",
        PrivacyChampion => "privacyChampion",
        SevenDayStreak => "sevenDayStreak",
        ThirtyDayStreak => "thirtyDayStreak",
    }
}

string_enum! {
    #[derive(Default)]
    pub enum PasswordStrength {
        Weak => "weak",
        #[default]
        Fair => "fair",
        Good => "good",
        Strong => "strong",
    }
}

string_enum! {
    pub enum ThreatType {
        Phishing => "phishing",
        Spam => "spam",
        Malware => "malware",
        Suspicious => "suspicious",
    }
}

string_enum! {
    pub enum TrackerType {
        Analytics => "analytics",
        Advertising => "advertising",
        Social => "social",
        Fingerprinting => "fingerprinting",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_method: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_signed_in: DateTime<Utc>,
}

/// A point-in-time privacy score. The newest row for a user is their current score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyScore {
    pub id: i64,
    pub user_id: i64,
    pub score: i64,
    pub messaging_score: i64,
    pub browsing_score: i64,
    pub vpn_score: i64,
    pub email_score: i64,
    pub password_score: i64,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyMetric {
    pub id: i64,
    pub user_id: i64,
    pub metric_type: MetricType,
    pub value: i64,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: i64,
    pub user_id: i64,
    pub alert_type: AlertType,
    pub severity: Severity,
    pub title: String,
    pub description: Option<String>,
    pub is_resolved: bool,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: i64,
    pub user_id: i64,
    pub recommendation_type: RecommendationType,
    pub title: String,
    pub description: Option<String>,
    pub action_url: Option<String>,
    pub priority: i64,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyStreak {
    pub id: i64,
    pub user_id: i64,
    pub current_streak: i64,
    pub longest_streak: i64,
    pub last_check_in_date: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: i64,
    pub user_id: i64,
    pub badge_type: BadgeType,
    pub earned_at: DateTime<Utc>,
}

/// A vault entry. `encrypted_password` is sealed before it reaches storage;
/// strength and breach status come from the client, nothing here computes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordEntry {
    pub id: i64,
    pub user_id: i64,
    pub website_url: String,
    pub username: String,
    pub encrypted_password: String,
    pub password_strength: PasswordStrength,
    pub is_breached: bool,
    pub last_modified: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAlias {
    pub id: i64,
    pub user_id: i64,
    pub alias_email: String,
    pub forwarding_email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarantinedEmail {
    pub id: i64,
    pub user_id: i64,
    pub sender_email: String,
    pub subject: Option<String>,
    pub threat_type: ThreatType,
    pub encrypted_content: Option<String>,
    pub is_reviewed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpnSession {
    pub id: i64,
    pub user_id: i64,
    pub server_location: String,
    pub is_active: bool,
    #[serde(rename = "dataUsedMB")]
    pub data_used_mb: i64,
    pub connected_at: DateTime<Utc>,
    pub disconnected_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerBlock {
    pub id: i64,
    pub user_id: i64,
    pub tracker_domain: String,
    pub tracker_type: TrackerType,
    pub block_count: i64,
    pub last_blocked_at: DateTime<Utc>,
}
