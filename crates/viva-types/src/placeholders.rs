//! Canned data for features that exist only as toggles or mock endpoints.
//!
//! Nothing here is persisted. Preference updates are accepted and discarded,
//! the VPN server list is fixed and no tunnel is ever opened.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub tracker_blocking: bool,
    pub ad_blocking: bool,
    pub screenshot_detection: bool,
    pub two_factor_auth: bool,
    pub biometric_login: bool,
    /// Minutes.
    pub session_timeout: u32,
    pub login_alerts: bool,
    pub analytics_enabled: bool,
    pub crash_reports: bool,
    pub critical_alerts: bool,
    pub high_priority_alerts: bool,
    pub medium_priority_alerts: bool,
    pub low_priority_alerts: bool,
    pub in_app_notifications: bool,
    pub email_notifications: bool,
    pub push_notifications: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            tracker_blocking: true,
            ad_blocking: true,
            screenshot_detection: true,
            two_factor_auth: false,
            biometric_login: false,
            session_timeout: 30,
            login_alerts: true,
            analytics_enabled: false,
            crash_reports: true,
            critical_alerts: true,
            high_priority_alerts: true,
            medium_priority_alerts: true,
            low_priority_alerts: false,
            in_app_notifications: true,
            email_notifications: true,
            push_notifications: false,
        }
    }
}

/// Partial preference update. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPreferencesPatch {
    pub tracker_blocking: Option<bool>,
    pub ad_blocking: Option<bool>,
    pub screenshot_detection: Option<bool>,
    pub two_factor_auth: Option<bool>,
    pub biometric_login: Option<bool>,
    pub session_timeout: Option<u32>,
    pub login_alerts: Option<bool>,
    pub analytics_enabled: Option<bool>,
    pub crash_reports: Option<bool>,
    pub critical_alerts: Option<bool>,
    pub high_priority_alerts: Option<bool>,
    pub medium_priority_alerts: Option<bool>,
    pub low_priority_alerts: Option<bool>,
    pub in_app_notifications: Option<bool>,
    pub email_notifications: Option<bool>,
    pub push_notifications: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnServer {
    pub id: u32,
    pub name: String,
    pub country: String,
    pub speed: String,
}

/// Location used when a VPN session is opened without choosing a server.
pub const DEFAULT_VPN_LOCATION: &str = "US-East";

pub fn vpn_servers() -> Vec<VpnServer> {
    [
        (1, "US-East", "United States", "Fast"),
        (2, "US-West", "United States", "Fast"),
        (3, "EU-London", "United Kingdom", "Very Fast"),
        (4, "EU-Amsterdam", "Netherlands", "Very Fast"),
        (5, "APAC-Singapore", "Singapore", "Fast"),
    ]
    .into_iter()
    .map(|(id, name, country, speed)| VpnServer {
        id,
        name: name.to_string(),
        country: country.to_string(),
        speed: speed.to_string(),
    })
    .collect()
}
