use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{Row, params};
use viva_types::models::{Alert, PrivacyMetric, PrivacyScore, Recommendation};

use super::{OptionalExt, enum_column};
use crate::Database;
use crate::models::{NewAlert, NewPrivacyMetric, NewPrivacyScore, NewRecommendation};

impl Database {
    // -- Scores --

    /// The newest score for the user, if any was ever recorded.
    pub fn get_privacy_score(&self, user_id: i64) -> Result<Option<PrivacyScore>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, user_id, score, messaging_score, browsing_score, vpn_score,
                        email_score, password_score, recorded_at
                 FROM privacy_scores
                 WHERE user_id = ?1
                 ORDER BY recorded_at DESC, id DESC
                 LIMIT 1",
                [user_id],
                score_from_row,
            )
            .optional()
        })
    }

    pub fn create_privacy_score(&self, score: &NewPrivacyScore) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO privacy_scores (user_id, score, messaging_score, browsing_score,
                                             vpn_score, email_score, password_score, recorded_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    score.user_id,
                    score.score,
                    score.messaging_score,
                    score.browsing_score,
                    score.vpn_score,
                    score.email_score,
                    score.password_score,
                    score.recorded_at,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    // -- Metrics --

    pub fn get_privacy_metrics(&self, user_id: i64, limit: u32) -> Result<Vec<PrivacyMetric>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, metric_type, value, recorded_at
                 FROM privacy_metrics
                 WHERE user_id = ?1
                 ORDER BY recorded_at DESC, id DESC
                 LIMIT ?2",
            )?;
            let rows = stmt
                .query_map(params![user_id, limit], |row| {
                    Ok(PrivacyMetric {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        metric_type: enum_column(row, 2)?,
                        value: row.get(3)?,
                        recorded_at: row.get(4)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn create_privacy_metric(&self, metric: &NewPrivacyMetric) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO privacy_metrics (user_id, metric_type, value, recorded_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    metric.user_id,
                    metric.metric_type.as_str(),
                    metric.value,
                    metric.recorded_at,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    // -- Alerts --

    /// Unresolved alerts, newest first.
    pub fn get_active_alerts(&self, user_id: i64) -> Result<Vec<Alert>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, alert_type, severity, title, description,
                        is_resolved, created_at, resolved_at
                 FROM alerts
                 WHERE user_id = ?1 AND is_resolved = 0
                 ORDER BY created_at DESC, id DESC",
            )?;
            let rows = stmt
                .query_map([user_id], alert_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn create_alert(&self, alert: &NewAlert) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO alerts (user_id, alert_type, severity, title, description, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    alert.user_id,
                    alert.alert_type.as_str(),
                    alert.severity.as_str(),
                    alert.title,
                    alert.description,
                    alert.created_at,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Mark an alert resolved. Alerts are never deleted.
    /// Returns the number of rows changed: 0 for an unknown id or another user's alert.
    pub fn resolve_alert(&self, user_id: i64, alert_id: i64, now: DateTime<Utc>) -> Result<usize> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE alerts SET is_resolved = 1, resolved_at = ?3
                 WHERE id = ?1 AND user_id = ?2",
                params![alert_id, user_id, now],
            )?;
            Ok(changed)
        })
    }

    // -- Recommendations --

    /// Open recommendations, highest priority first.
    pub fn get_recommendations(&self, user_id: i64) -> Result<Vec<Recommendation>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, recommendation_type, title, description, action_url,
                        priority, is_completed, created_at, completed_at
                 FROM recommendations
                 WHERE user_id = ?1 AND is_completed = 0
                 ORDER BY priority DESC, created_at DESC, id DESC",
            )?;
            let rows = stmt
                .query_map([user_id], recommendation_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn create_recommendation(&self, rec: &NewRecommendation) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO recommendations (user_id, recommendation_type, title, description,
                                              action_url, priority, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    rec.user_id,
                    rec.recommendation_type.as_str(),
                    rec.title,
                    rec.description,
                    rec.action_url,
                    rec.priority,
                    rec.created_at,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn complete_recommendation(
        &self,
        user_id: i64,
        rec_id: i64,
        now: DateTime<Utc>,
    ) -> Result<usize> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE recommendations SET is_completed = 1, completed_at = ?3
                 WHERE id = ?1 AND user_id = ?2",
                params![rec_id, user_id, now],
            )?;
            Ok(changed)
        })
    }
}

fn score_from_row(row: &Row<'_>) -> rusqlite::Result<PrivacyScore> {
    Ok(PrivacyScore {
        id: row.get(0)?,
        user_id: row.get(1)?,
        score: row.get(2)?,
        messaging_score: row.get(3)?,
        browsing_score: row.get(4)?,
        vpn_score: row.get(5)?,
        email_score: row.get(6)?,
        password_score: row.get(7)?,
        recorded_at: row.get(8)?,
    })
}

fn alert_from_row(row: &Row<'_>) -> rusqlite::Result<Alert> {
    Ok(Alert {
        id: row.get(0)?,
        user_id: row.get(1)?,
        alert_type: enum_column(row, 2)?,
        severity: enum_column(row, 3)?,
        title: row.get(4)?,
        description: row.get(5)?,
        is_resolved: row.get(6)?,
        created_at: row.get(7)?,
        resolved_at: row.get(8)?,
    })
}

fn recommendation_from_row(row: &Row<'_>) -> rusqlite::Result<Recommendation> {
    Ok(Recommendation {
        id: row.get(0)?,
        user_id: row.get(1)?,
        recommendation_type: enum_column(row, 2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        action_url: row.get(5)?,
        priority: row.get(6)?,
        is_completed: row.get(7)?,
        created_at: row.get(8)?,
        completed_at: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::{at, db, user};
    use viva_types::models::{AlertType, MetricType, RecommendationType, Severity};

    fn score(user_id: i64, value: i64, recorded_at: DateTime<Utc>) -> NewPrivacyScore {
        NewPrivacyScore {
            user_id,
            score: value,
            messaging_score: value,
            browsing_score: value,
            vpn_score: value,
            email_score: value,
            password_score: value,
            recorded_at,
        }
    }

    fn alert(user_id: i64, title: &str, created_at: DateTime<Utc>) -> NewAlert {
        NewAlert {
            user_id,
            alert_type: AlertType::WeakPassword,
            severity: Severity::High,
            title: title.to_string(),
            description: None,
            created_at,
        }
    }

    fn rec(user_id: i64, title: &str, priority: i64) -> NewRecommendation {
        NewRecommendation {
            user_id,
            recommendation_type: RecommendationType::EnableVpn,
            title: title.to_string(),
            description: Some("Turn on VPN".into()),
            action_url: Some("/connect".into()),
            priority,
            created_at: at(0),
        }
    }

    #[test]
    fn missing_score_is_none() {
        let db = db();
        let uid = user(&db, "a");
        assert!(db.get_privacy_score(uid).unwrap().is_none());
    }

    #[test]
    fn latest_score_wins_regardless_of_insert_order() {
        let db = db();
        let uid = user(&db, "a");
        db.create_privacy_score(&score(uid, 80, at(100))).unwrap();
        db.create_privacy_score(&score(uid, 40, at(10))).unwrap();

        let current = db.get_privacy_score(uid).unwrap().unwrap();
        assert_eq!(current.score, 80);
        assert_eq!(current.recorded_at, at(100));
    }

    #[test]
    fn scores_are_per_user() {
        let db = db();
        let a = user(&db, "a");
        let b = user(&db, "b");
        db.create_privacy_score(&score(a, 70, at(0))).unwrap();
        assert!(db.get_privacy_score(b).unwrap().is_none());
    }

    #[test]
    fn metrics_are_newest_first_and_limited() {
        let db = db();
        let uid = user(&db, "a");
        for i in 0..5 {
            db.create_privacy_metric(&NewPrivacyMetric {
                user_id: uid,
                metric_type: MetricType::TrackersBlocked,
                value: i,
                recorded_at: at(i),
            })
            .unwrap();
        }

        let metrics = db.get_privacy_metrics(uid, 3).unwrap();
        let values: Vec<i64> = metrics.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![4, 3, 2]);
        assert_eq!(metrics[0].metric_type, MetricType::TrackersBlocked);
    }

    #[test]
    fn resolved_alert_leaves_active_list() {
        let db = db();
        let uid = user(&db, "a");
        let old = db.create_alert(&alert(uid, "old", at(0))).unwrap();
        db.create_alert(&alert(uid, "new", at(5))).unwrap();

        let active = db.get_active_alerts(uid).unwrap();
        let titles: Vec<&str> = active.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "old"]);
        assert!(active.iter().all(|a| !a.is_resolved && a.resolved_at.is_none()));

        assert_eq!(db.resolve_alert(uid, old, at(9)).unwrap(), 1);

        let active = db.get_active_alerts(uid).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "new");

        let (resolved, resolved_at): (bool, Option<DateTime<Utc>>) = db
            .with_conn(|c| {
                Ok(c.query_row(
                    "SELECT is_resolved, resolved_at FROM alerts WHERE id = ?1",
                    [old],
                    |r| Ok((r.get(0)?, r.get(1)?)),
                )?)
            })
            .unwrap();
        assert!(resolved);
        assert_eq!(resolved_at, Some(at(9)));
    }

    #[test]
    fn resolving_someone_elses_alert_changes_nothing() {
        let db = db();
        let owner = user(&db, "a");
        let intruder = user(&db, "b");
        let id = db.create_alert(&alert(owner, "mine", at(0))).unwrap();

        assert_eq!(db.resolve_alert(intruder, id, at(1)).unwrap(), 0);
        assert_eq!(db.get_active_alerts(owner).unwrap().len(), 1);
    }

    #[test]
    fn recommendations_by_priority_until_completed() {
        let db = db();
        let uid = user(&db, "a");
        db.create_recommendation(&rec(uid, "low", 1)).unwrap();
        let high = db.create_recommendation(&rec(uid, "high", 9)).unwrap();

        let open = db.get_recommendations(uid).unwrap();
        assert_eq!(open[0].title, "high");
        assert_eq!(open[0].recommendation_type, RecommendationType::EnableVpn);
        assert_eq!(open[1].title, "low");

        assert_eq!(db.complete_recommendation(uid, high, at(3)).unwrap(), 1);
        let open = db.get_recommendations(uid).unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].title, "low");
    }
}
