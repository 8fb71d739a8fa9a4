use std::net::SocketAddr;

use anyhow::{Context, Result, bail};
use tracing::warn;
use viva_crypto::keys::{generate_vault_key, key_from_base64};

/// Session secrets that must never reach production.
const PLACEHOLDER_SECRETS: &[&str] = &["change-me-to-a-random-string", "dev-secret-change-me"];

const DEV_JWT_SECRET: &str = "dev-secret-change-me";

/// Accepted session lifetimes, in days.
const SESSION_DAYS_RANGE: std::ops::RangeInclusive<i64> = 1..=3650;

#[derive(Debug)]
pub struct ServerConfig {
    pub database_url: Option<String>,
    pub owner_open_id: Option<String>,
    pub jwt_secret: String,
    pub identity_secret: String,
    pub vault_key: [u8; 32],
    pub cookie_name: String,
    pub session_days: i64,
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let jwt_secret = var("VIVA_JWT_SECRET").unwrap_or_else(|| DEV_JWT_SECRET.into());
        if PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            warn!("VIVA_JWT_SECRET is unset or a placeholder; sessions can be forged");
        }
        let identity_secret = var("VIVA_IDENTITY_SECRET").unwrap_or_else(|| jwt_secret.clone());

        let vault_key = match var("VIVA_VAULT_KEY") {
            Some(encoded) => key_from_base64(&encoded).context("VIVA_VAULT_KEY must be 32 bytes of base64")?,
            None => {
                warn!("VIVA_VAULT_KEY is unset; vault entries will not survive a restart");
                generate_vault_key()
            }
        };

        let session_days: i64 = match var("VIVA_SESSION_DAYS") {
            Some(v) => v.parse().context("VIVA_SESSION_DAYS must be a whole number")?,
            None => 365,
        };
        if !SESSION_DAYS_RANGE.contains(&session_days) {
            bail!(
                "VIVA_SESSION_DAYS must be between {} and {}, got {}",
                SESSION_DAYS_RANGE.start(),
                SESSION_DAYS_RANGE.end(),
                session_days
            );
        }
        let port = match var("VIVA_PORT") {
            Some(v) => v.parse().context("VIVA_PORT must be a port number")?,
            None => 3000,
        };

        Ok(Self {
            database_url: var("DATABASE_URL"),
            owner_open_id: var("OWNER_OPEN_ID"),
            jwt_secret,
            identity_secret,
            vault_key,
            cookie_name: var("VIVA_COOKIE_NAME").unwrap_or_else(|| "app_session_id".into()),
            session_days,
            host: var("VIVA_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}
