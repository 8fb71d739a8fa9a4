use anyhow::Result;
use rusqlite::params;
use viva_types::models::{EmailAlias, QuarantinedEmail};

use super::enum_column;
use crate::Database;
use crate::models::{NewEmailAlias, NewQuarantinedEmail};

impl Database {
    // -- Aliases --

    pub fn get_email_aliases(&self, user_id: i64) -> Result<Vec<EmailAlias>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, alias_email, forwarding_email, is_active, created_at
                 FROM email_aliases
                 WHERE user_id = ?1
                 ORDER BY id",
            )?;
            let rows = stmt
                .query_map([user_id], |row| {
                    Ok(EmailAlias {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        alias_email: row.get(2)?,
                        forwarding_email: row.get(3)?,
                        is_active: row.get(4)?,
                        created_at: row.get(5)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Fails on a duplicate alias address (UNIQUE constraint).
    pub fn create_email_alias(&self, alias: &NewEmailAlias) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO email_aliases (user_id, alias_email, forwarding_email, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![alias.user_id, alias.alias_email, alias.forwarding_email, alias.created_at],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn delete_email_alias(&self, user_id: i64, alias_id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let deleted = conn.execute(
                "DELETE FROM email_aliases WHERE id = ?1 AND user_id = ?2",
                params![alias_id, user_id],
            )?;
            Ok(deleted)
        })
    }

    // -- Quarantine --

    pub fn get_quarantined_emails(&self, user_id: i64) -> Result<Vec<QuarantinedEmail>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, sender_email, subject, threat_type, encrypted_content,
                        is_reviewed, created_at
                 FROM quarantined_emails
                 WHERE user_id = ?1
                 ORDER BY created_at DESC, id DESC",
            )?;
            let rows = stmt
                .query_map([user_id], |row| {
                    Ok(QuarantinedEmail {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        sender_email: row.get(2)?,
                        subject: row.get(3)?,
                        threat_type: enum_column(row, 4)?,
                        encrypted_content: row.get(5)?,
                        is_reviewed: row.get(6)?,
                        created_at: row.get(7)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn create_quarantined_email(&self, email: &NewQuarantinedEmail) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO quarantined_emails (user_id, sender_email, subject, threat_type,
                                                 encrypted_content, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    email.user_id,
                    email.sender_email,
                    email.subject,
                    email.threat_type.as_str(),
                    email.encrypted_content,
                    email.created_at,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn mark_quarantined_reviewed(&self, user_id: i64, email_id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE quarantined_emails SET is_reviewed = 1 WHERE id = ?1 AND user_id = ?2",
                params![email_id, user_id],
            )?;
            Ok(changed)
        })
    }
}
