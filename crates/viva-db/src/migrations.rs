use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                open_id         TEXT NOT NULL UNIQUE,
                name            TEXT,
                email           TEXT,
                login_method    TEXT,
                role            TEXT NOT NULL DEFAULT 'user' CHECK (role IN ('user', 'admin')),
                created_at      TEXT NOT NULL,
                updated_at      TEXT NOT NULL,
                last_signed_in  TEXT NOT NULL
            );

            CREATE TABLE messages (
                id                  INTEGER PRIMARY KEY AUTOINCREMENT,
                sender_id           INTEGER NOT NULL REFERENCES users(id),
                recipient_id        INTEGER NOT NULL REFERENCES users(id),
                encrypted_content   TEXT NOT NULL,
                message_type        TEXT NOT NULL DEFAULT 'text',
                self_destruct_timer INTEGER,
                is_revoked          INTEGER NOT NULL DEFAULT 0,
                screenshot_detected INTEGER NOT NULL DEFAULT 0,
                created_at          TEXT NOT NULL,
                expires_at          TEXT
            );

            CREATE TABLE privacy_metrics (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id     INTEGER NOT NULL REFERENCES users(id),
                metric_type TEXT NOT NULL,
                value       INTEGER NOT NULL DEFAULT 0,
                recorded_at TEXT NOT NULL
            );

            CREATE INDEX idx_privacy_metrics_user ON privacy_metrics(user_id, recorded_at);

            CREATE TABLE privacy_scores (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id         INTEGER NOT NULL REFERENCES users(id),
                score           INTEGER NOT NULL,
                messaging_score INTEGER NOT NULL DEFAULT 0,
                browsing_score  INTEGER NOT NULL DEFAULT 0,
                vpn_score       INTEGER NOT NULL DEFAULT 0,
                email_score     INTEGER NOT NULL DEFAULT 0,
                password_score  INTEGER NOT NULL DEFAULT 0,
                recorded_at     TEXT NOT NULL
            );

            CREATE INDEX idx_privacy_scores_user ON privacy_scores(user_id, recorded_at);

            CREATE TABLE alerts (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id     INTEGER NOT NULL REFERENCES users(id),
                alert_type  TEXT NOT NULL,
                severity    TEXT NOT NULL DEFAULT 'medium',
                title       TEXT NOT NULL,
                description TEXT,
                is_resolved INTEGER NOT NULL DEFAULT 0,
                created_at  TEXT NOT NULL,
                resolved_at TEXT
            );

            CREATE INDEX idx_alerts_user ON alerts(user_id, is_resolved, created_at);

            CREATE TABLE recommendations (
                id                  INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id             INTEGER NOT NULL REFERENCES users(id),
                recommendation_type TEXT NOT NULL,
                title               TEXT NOT NULL,
                description         TEXT,
                action_url          TEXT,
                priority            INTEGER NOT NULL DEFAULT 0,
                is_completed        INTEGER NOT NULL DEFAULT 0,
                created_at          TEXT NOT NULL,
                completed_at        TEXT
            );

            CREATE TABLE privacy_streaks (
                id                 INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id            INTEGER NOT NULL UNIQUE REFERENCES users(id),
                current_streak     INTEGER NOT NULL DEFAULT 0,
                longest_streak     INTEGER NOT NULL DEFAULT 0,
                last_check_in_date TEXT,
                updated_at         TEXT NOT NULL
            );

            CREATE TABLE badges (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id     INTEGER NOT NULL REFERENCES users(id),
                badge_type  TEXT NOT NULL,
                earned_at   TEXT NOT NULL
            );

            CREATE TABLE password_entries (
                id                 INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id            INTEGER NOT NULL REFERENCES users(id),
                website_url        TEXT NOT NULL,
                username           TEXT NOT NULL,
                encrypted_password TEXT NOT NULL,
                password_strength  TEXT NOT NULL DEFAULT 'fair',
                is_breached        INTEGER NOT NULL DEFAULT 0,
                last_modified      TEXT NOT NULL,
                created_at         TEXT NOT NULL
            );

            CREATE INDEX idx_password_entries_user ON password_entries(user_id, created_at);

            CREATE TABLE email_aliases (
                id               INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id          INTEGER NOT NULL REFERENCES users(id),
                alias_email      TEXT NOT NULL UNIQUE,
                forwarding_email TEXT NOT NULL,
                is_active        INTEGER NOT NULL DEFAULT 1,
                created_at       TEXT NOT NULL
            );

            CREATE TABLE quarantined_emails (
                id                INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id           INTEGER NOT NULL REFERENCES users(id),
                sender_email      TEXT NOT NULL,
                subject           TEXT,
                threat_type       TEXT NOT NULL,
                encrypted_content TEXT,
                is_reviewed       INTEGER NOT NULL DEFAULT 0,
                created_at        TEXT NOT NULL
            );

            CREATE TABLE vpn_sessions (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id         INTEGER NOT NULL REFERENCES users(id),
                server_location TEXT NOT NULL,
                is_active       INTEGER NOT NULL DEFAULT 1,
                data_used_mb    INTEGER NOT NULL DEFAULT 0,
                connected_at    TEXT NOT NULL,
                disconnected_at TEXT
            );

            CREATE INDEX idx_vpn_sessions_active ON vpn_sessions(user_id, is_active);

            CREATE TABLE tracker_blocks (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id         INTEGER NOT NULL REFERENCES users(id),
                tracker_domain  TEXT NOT NULL,
                tracker_type    TEXT NOT NULL,
                block_count     INTEGER NOT NULL DEFAULT 1,
                last_blocked_at TEXT NOT NULL
            );

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
