use anyhow::Result;
use rusqlite::params;
use viva_types::models::TrackerBlock;

use super::enum_column;
use crate::Database;
use crate::models::NewTrackerBlock;

impl Database {
    /// Blocked trackers, most frequently blocked first.
    pub fn get_tracker_block_stats(&self, user_id: i64) -> Result<Vec<TrackerBlock>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, tracker_domain, tracker_type, block_count, last_blocked_at
                 FROM tracker_blocks
                 WHERE user_id = ?1
                 ORDER BY block_count DESC, id",
            )?;
            let rows = stmt
                .query_map([user_id], |row| {
                    Ok(TrackerBlock {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        tracker_domain: row.get(2)?,
                        tracker_type: enum_column(row, 3)?,
                        block_count: row.get(4)?,
                        last_blocked_at: row.get(5)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn record_tracker_block(&self, block: &NewTrackerBlock) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO tracker_blocks (user_id, tracker_domain, tracker_type, block_count, last_blocked_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    block.user_id,
                    block.tracker_domain,
                    block.tracker_type.as_str(),
                    block.block_count,
                    block.last_blocked_at,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }
}
