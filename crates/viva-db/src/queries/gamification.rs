use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row, params};
use viva_types::models::{Badge, BadgeType, PrivacyStreak};

use super::{OptionalExt, enum_column};
use crate::Database;

impl Database {
    // -- Streaks --

    pub fn get_privacy_streak(&self, user_id: i64) -> Result<Option<PrivacyStreak>> {
        self.with_conn(|conn| query_streak(conn, user_id))
    }

    /// Record a daily check-in and return the updated streak.
    ///
    /// Read and write are separate statements with no transaction; the
    /// connection lock is what keeps two check-ins from interleaving.
    pub fn increment_streak(&self, user_id: i64, now: DateTime<Utc>) -> Result<PrivacyStreak> {
        self.with_conn(|conn| {
            let existing = query_streak(conn, user_id)?;
            let (current, longest) = match &existing {
                Some(s) => advance_streak(s.current_streak, s.longest_streak, s.last_check_in_date, now),
                None => advance_streak(0, 0, None, now),
            };

            conn.execute(
                "INSERT INTO privacy_streaks (user_id, current_streak, longest_streak, last_check_in_date, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)
                 ON CONFLICT(user_id) DO UPDATE SET
                     current_streak = excluded.current_streak,
                     longest_streak = excluded.longest_streak,
                     last_check_in_date = excluded.last_check_in_date,
                     updated_at = excluded.updated_at",
                params![user_id, current, longest, now],
            )?;

            query_streak(conn, user_id)?
                .ok_or_else(|| anyhow::anyhow!("Streak row missing after upsert for user {}", user_id))
        })
    }

    // -- Badges --

    /// Earned badges, newest first.
    pub fn get_user_badges(&self, user_id: i64) -> Result<Vec<Badge>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, badge_type, earned_at
                 FROM badges
                 WHERE user_id = ?1
                 ORDER BY earned_at DESC, id DESC",
            )?;
            let rows = stmt
                .query_map([user_id], |row| {
                    Ok(Badge {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        badge_type: enum_column(row, 2)?,
                        earned_at: row.get(3)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn award_badge(&self, user_id: i64, badge_type: BadgeType, earned_at: DateTime<Utc>) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO badges (user_id, badge_type, earned_at) VALUES (?1, ?2, ?3)",
                params![user_id, badge_type.as_str(), earned_at],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }
}

/// Next (current, longest) after a check-in at `now`.
///
/// Same UTC day keeps the counters, the following day extends the run, any
/// longer gap (or a first check-in) starts over at 1.
fn advance_streak(
    current: i64,
    longest: i64,
    last_check_in: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> (i64, i64) {
    let today = now.date_naive();
    let current = match last_check_in.map(|t| t.date_naive()) {
        Some(last) if last >= today => current.max(1),
        Some(last) if last.succ_opt() == Some(today) => current + 1,
        _ => 1,
    };
    (current, longest.max(current))
}

fn query_streak(conn: &Connection, user_id: i64) -> Result<Option<PrivacyStreak>> {
    conn.query_row(
        "SELECT id, user_id, current_streak, longest_streak, last_check_in_date, updated_at
         FROM privacy_streaks WHERE user_id = ?1",
        [user_id],
        streak_from_row,
    )
    .optional()
}

fn streak_from_row(row: &Row<'_>) -> rusqlite::Result<PrivacyStreak> {
    Ok(PrivacyStreak {
        id: row.get(0)?,
        user_id: row.get(1)?,
        current_streak: row.get(2)?,
        longest_streak: row.get(3)?,
        last_check_in_date: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
