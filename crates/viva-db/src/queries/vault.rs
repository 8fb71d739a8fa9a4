use anyhow::Result;
use rusqlite::{Row, params};
use viva_types::models::PasswordEntry;

use super::enum_column;
use crate::Database;
use crate::models::NewPasswordEntry;

const ENTRY_COLUMNS: &str = "id, user_id, website_url, username, encrypted_password, \
     password_strength, is_breached, last_modified, created_at";

impl Database {
    pub fn get_password_entries(&self, user_id: i64) -> Result<Vec<PasswordEntry>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ENTRY_COLUMNS} FROM password_entries
                 WHERE user_id = ?1
                 ORDER BY created_at DESC, id DESC"
            ))?;
            let rows = stmt
                .query_map([user_id], entry_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_breached_passwords(&self, user_id: i64) -> Result<Vec<PasswordEntry>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ENTRY_COLUMNS} FROM password_entries
                 WHERE user_id = ?1 AND is_breached = 1
                 ORDER BY created_at DESC, id DESC"
            ))?;
            let rows = stmt
                .query_map([user_id], entry_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn create_password_entry(&self, entry: &NewPasswordEntry) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO password_entries (user_id, website_url, username, encrypted_password,
                                               password_strength, is_breached, last_modified, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
                params![
                    entry.user_id,
                    entry.website_url,
                    entry.username,
                    entry.encrypted_password,
                    entry.password_strength.as_str(),
                    entry.is_breached,
                    entry.created_at,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Delete an entry owned by `user_id`. Another user's entry is left alone
    /// and the call reports 0 rows.
    pub fn delete_password_entry(&self, user_id: i64, entry_id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let deleted = conn.execute(
                "DELETE FROM password_entries WHERE id = ?1 AND user_id = ?2",
                params![entry_id, user_id],
            )?;
            Ok(deleted)
        })
    }
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<PasswordEntry> {
    Ok(PasswordEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        website_url: row.get(2)?,
        username: row.get(3)?,
        encrypted_password: row.get(4)?,
        password_strength: enum_column(row, 5)?,
        is_breached: row.get(6)?,
        last_modified: row.get(7)?,
        created_at: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::{at, db, user};
    use viva_types::models::PasswordStrength;

    fn entry(user_id: i64, site: &str, breached: bool, secs: i64) -> NewPasswordEntry {
        NewPasswordEntry {
            user_id,
            website_url: site.to_string(),
            username: "me".into(),
            encrypted_password: "sealed".into(),
            password_strength: PasswordStrength::Weak,
            is_breached: breached,
            created_at: at(secs),
        }
    }

    #[test]
    fn entries_newest_first_and_breached_filter() {
        let db = db();
        let uid = user(&db, "a");
        db.create_password_entry(&entry(uid, "a.example", false, 0)).unwrap();
        db.create_password_entry(&entry(uid, "b.example", true, 5)).unwrap();

        let all = db.get_password_entries(uid).unwrap();
        let sites: Vec<&str> = all.iter().map(|e| e.website_url.as_str()).collect();
        assert_eq!(sites, vec!["b.example", "a.example"]);
        assert_eq!(all[0].password_strength, PasswordStrength::Weak);
        assert_eq!(all[0].last_modified, at(5));

        let breached = db.get_breached_passwords(uid).unwrap();
        assert_eq!(breached.len(), 1);
        assert!(breached[0].is_breached);
    }

    #[test]
    fn delete_is_scoped_to_owner() {
        let db = db();
        let owner = user(&db, "a");
        let other = user(&db, "b");
        let id = db.create_password_entry(&entry(owner, "bank.example", false, 0)).unwrap();

        assert_eq!(db.delete_password_entry(other, id).unwrap(), 0);
        assert_eq!(db.get_password_entries(owner).unwrap().len(), 1);

        assert_eq!(db.delete_password_entry(owner, id).unwrap(), 1);
        assert!(db.get_password_entries(owner).unwrap().is_empty());
    }
}
