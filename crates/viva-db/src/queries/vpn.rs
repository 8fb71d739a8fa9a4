use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use viva_types::models::VpnSession;

use super::OptionalExt;
use crate::Database;
use crate::models::NewVpnSession;

impl Database {
    pub fn get_active_vpn_session(&self, user_id: i64) -> Result<Option<VpnSession>> {
        self.with_conn(|conn| query_active_session(conn, user_id))
    }

    pub fn create_vpn_session(&self, session: &NewVpnSession) -> Result<i64> {
        self.with_conn(|conn| insert_session(conn, session))
    }

    /// Switch the user's VPN on or off.
    ///
    /// On: opens a session at `server_location` unless one is already active
    /// (returns 1 when a session was opened, 0 otherwise).
    /// Off: closes every active session and returns how many were closed.
    pub fn update_vpn_status(
        &self,
        user_id: i64,
        enabled: bool,
        server_location: &str,
        now: DateTime<Utc>,
    ) -> Result<usize> {
        self.with_conn(|conn| {
            if enabled {
                if query_active_session(conn, user_id)?.is_some() {
                    return Ok(0);
                }
                insert_session(
                    conn,
                    &NewVpnSession {
                        user_id,
                        server_location: server_location.to_string(),
                        connected_at: now,
                    },
                )?;
                Ok(1)
            } else {
                let closed = conn.execute(
                    "UPDATE vpn_sessions SET is_active = 0, disconnected_at = ?2
                     WHERE user_id = ?1 AND is_active = 1",
                    params![user_id, now],
                )?;
                Ok(closed)
            }
        })
    }
}

fn query_active_session(conn: &Connection, user_id: i64) -> Result<Option<VpnSession>> {
    conn.query_row(
        "SELECT id, user_id, server_location, is_active, data_used_mb, connected_at, disconnected_at
         FROM vpn_sessions
         WHERE user_id = ?1 AND is_active = 1
         ORDER BY connected_at DESC, id DESC
         LIMIT 1",
        [user_id],
        |row| {
            Ok(VpnSession {
                id: row.get(0)?,
                user_id: row.get(1)?,
                server_location: row.get(2)?,
                is_active: row.get(3)?,
                data_used_mb: row.get(4)?,
                connected_at: row.get(5)?,
                disconnected_at: row.get(6)?,
            })
        },
    )
    .optional()
}

fn insert_session(conn: &Connection, session: &NewVpnSession) -> Result<i64> {
    conn.execute(
        "INSERT INTO vpn_sessions (user_id, server_location, is_active, data_used_mb, connected_at)
         VALUES (?1, ?2, 1, 0, ?3)",
        params![session.user_id, session.server_location, session.connected_at],
    )?;
    Ok(conn.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::{at, db, user};

    #[test]
    fn toggle_on_then_off() {
        let db = db();
        let uid = user(&db, "a");
        assert!(db.get_active_vpn_session(uid).unwrap().is_none());

        assert_eq!(db.update_vpn_status(uid, true, "EU-London", at(0)).unwrap(), 1);
        let session = db.get_active_vpn_session(uid).unwrap().unwrap();
        assert_eq!(session.server_location, "EU-London");
        assert!(session.is_active);
        assert_eq!(session.data_used_mb, 0);

        assert_eq!(db.update_vpn_status(uid, false, "EU-London", at(30)).unwrap(), 1);
        assert!(db.get_active_vpn_session(uid).unwrap().is_none());

        let disconnected: Option<DateTime<Utc>> = db
            .with_conn(|c| {
                Ok(c.query_row("SELECT disconnected_at FROM vpn_sessions WHERE id = ?1", [session.id], |r| {
                    r.get(0)
                })?)
            })
            .unwrap();
        assert_eq!(disconnected, Some(at(30)));
    }

    #[test]
    fn enabling_twice_keeps_one_session() {
        let db = db();
        let uid = user(&db, "a");
        db.update_vpn_status(uid, true, "US-East", at(0)).unwrap();
        assert_eq!(db.update_vpn_status(uid, true, "US-West", at(1)).unwrap(), 0);
        assert_eq!(db.get_active_vpn_session(uid).unwrap().unwrap().server_location, "US-East");
    }

    #[test]
    fn disabling_closes_every_active_session() {
        let db = db();
        let uid = user(&db, "a");
        for secs in 0..2 {
            db.create_vpn_session(&NewVpnSession {
                user_id: uid,
                server_location: "US-East".into(),
                connected_at: at(secs),
            })
            .unwrap();
        }
        assert_eq!(db.update_vpn_status(uid, false, "US-East", at(5)).unwrap(), 2);
        assert_eq!(db.update_vpn_status(uid, false, "US-East", at(6)).unwrap(), 0);
    }
}
