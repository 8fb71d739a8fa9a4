use anyhow::{Result, anyhow};
use chrono::Utc;
use rusqlite::{Connection, Row, params};
use viva_types::models::{Role, User};

use super::{OptionalExt, enum_column};
use crate::Database;
use crate::models::UpsertUser;

const USER_COLUMNS: &str =
    "id, open_id, name, email, login_method, role, created_at, updated_at, last_signed_in";

impl Database {
    /// Insert the user, or update the supplied fields when the openId exists.
    ///
    /// `owner_open_id` names the identity that is always stored as admin,
    /// whatever role the caller passed.
    pub fn upsert_user(&self, user: &UpsertUser, owner_open_id: Option<&str>) -> Result<()> {
        if user.open_id.is_empty() {
            return Err(anyhow!("User openId is required for upsert"));
        }

        let now = Utc::now();
        let last_signed_in = user.last_signed_in.unwrap_or(now);
        let role = if owner_open_id == Some(user.open_id.as_str()) {
            Some(Role::Admin)
        } else {
            user.role
        };

        let mut update_set = Vec::with_capacity(6);
        if user.name.is_some() {
            update_set.push("name = excluded.name");
        }
        if user.email.is_some() {
            update_set.push("email = excluded.email");
        }
        if user.login_method.is_some() {
            update_set.push("login_method = excluded.login_method");
        }
        if role.is_some() {
            update_set.push("role = excluded.role");
        }
        update_set.push("last_signed_in = excluded.last_signed_in");
        update_set.push("updated_at = excluded.updated_at");

        let sql = format!(
            "INSERT INTO users (open_id, name, email, login_method, role, created_at, updated_at, last_signed_in)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6, ?7)
             ON CONFLICT(open_id) DO UPDATE SET {}",
            update_set.join(", ")
        );

        self.with_conn(|conn| {
            conn.execute(
                &sql,
                params![
                    user.open_id,
                    user.name,
                    user.email,
                    user.login_method,
                    role.unwrap_or(Role::User).as_str(),
                    now,
                    last_signed_in,
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_open_id(&self, open_id: &str) -> Result<Option<User>> {
        self.with_conn(|conn| query_user_by_open_id(conn, open_id))
    }
}

fn query_user_by_open_id(conn: &Connection, open_id: &str) -> Result<Option<User>> {
    let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE open_id = ?1"))?;
    stmt.query_row([open_id], user_from_row).optional()
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        open_id: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        login_method: row.get(4)?,
        role: enum_column(row, 5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
        last_signed_in: row.get(8)?,
    })
}
