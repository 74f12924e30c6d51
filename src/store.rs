//! Historical-store seam
//!
//! The engine never owns training history; it reads it through the
//! [`HistoryStore`] trait. Real deployments back this with whatever the
//! tracking side writes to. [`MemoryStore`] is the bundled
//! implementation used by the CLI (loaded from a JSON history file) and
//! by tests.

use crate::error::Result;
use crate::load::LoadAggregator;
use crate::models::{DomsSurvey, ReadinessMetrics, SessionLog};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Read-only access to a user's training history
pub trait HistoryStore {
    /// Session logs within a date window (inclusive), most recent first
    fn session_logs(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SessionLog>>;

    /// Most recent soreness survey, if any
    fn latest_doms_survey(&self, user_id: &str) -> Result<Option<DomsSurvey>>;

    /// Most recent readiness metrics record, if any
    fn latest_readiness_metrics(&self, user_id: &str) -> Result<Option<ReadinessMetrics>>;
}

/// All stored records for one user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserHistory {
    /// Logged training sessions
    #[serde(default)]
    pub sessions: Vec<SessionLog>,

    /// Daily soreness surveys
    #[serde(default)]
    pub surveys: Vec<DomsSurvey>,

    /// Daily readiness metrics
    #[serde(default)]
    pub metrics: Vec<ReadinessMetrics>,
}

/// In-memory history store keyed by user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    users: HashMap<String, UserHistory>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON history file
    ///
    /// The file maps user ids to their `sessions` / `surveys` / `metrics`
    /// arrays; any of the three may be omitted.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let store = serde_json::from_str(&contents)?;
        Ok(store)
    }

    /// Record a training session for a user
    pub fn add_session(&mut self, user_id: &str, session: SessionLog) {
        self.users
            .entry(user_id.to_string())
            .or_default()
            .sessions
            .push(session);
    }

    /// Record a soreness survey for a user
    pub fn add_survey(&mut self, user_id: &str, survey: DomsSurvey) {
        self.users
            .entry(user_id.to_string())
            .or_default()
            .surveys
            .push(survey);
    }

    /// Record a readiness metrics entry for a user
    pub fn add_metrics(&mut self, user_id: &str, metrics: ReadinessMetrics) {
        self.users
            .entry(user_id.to_string())
            .or_default()
            .metrics
            .push(metrics);
    }
}

impl HistoryStore for MemoryStore {
    fn session_logs(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SessionLog>> {
        let Some(history) = self.users.get(user_id) else {
            return Ok(Vec::new());
        };

        let mut sessions = LoadAggregator::in_window(&history.sessions, start, end);
        sessions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(sessions)
    }

    fn latest_doms_survey(&self, user_id: &str) -> Result<Option<DomsSurvey>> {
        Ok(self
            .users
            .get(user_id)
            .and_then(|h| h.surveys.iter().max_by_key(|s| s.date))
            .cloned())
    }

    fn latest_readiness_metrics(&self, user_id: &str) -> Result<Option<ReadinessMetrics>> {
        Ok(self
            .users
            .get(user_id)
            .and_then(|h| h.metrics.iter().max_by_key(|m| m.date))
            .cloned())
    }
}
