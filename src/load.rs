use crate::models::SessionLog;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Sliding-window load aggregation
///
/// Averages per-session training load over a date window. Rolling acute
/// (7-day) and chronic (28-day) averages of this value are the inputs to
/// the acute:chronic workload ratio.
pub struct LoadAggregator;

impl LoadAggregator {
    /// Restrict sessions to a date window (inclusive on both ends)
    pub fn in_window(sessions: &[SessionLog], start: NaiveDate, end: NaiveDate) -> Vec<SessionLog> {
        sessions
            .iter()
            .filter(|s| s.date >= start && s.date <= end)
            .cloned()
            .collect()
    }

    /// Arithmetic mean of the effective load across sessions
    ///
    /// Each session contributes its exertion-weighted load, falling back
    /// to the raw total when no weighted value was recorded. An empty
    /// session list averages to zero.
    pub fn average_load(sessions: &[SessionLog]) -> Decimal {
        if sessions.is_empty() {
            return Decimal::ZERO;
        }

        let total: Decimal = sessions.iter().map(|s| s.effective_load()).sum();
        total / Decimal::from(sessions.len())
    }
}
