//! Request orchestration and response assembly
//!
//! Wires the calculators together for one progression request: fetch the
//! acute and chronic session windows plus the latest survey and metrics,
//! run load aggregation, ACWR, readiness, and the progression ladder,
//! and package the result. The evaluation is a pure function of the
//! request, the fetched records, and the caller-supplied timestamp:
//! nothing is written and no state is carried between requests.

use crate::acwr::{AcwrCalculator, AcwrConfig};
use crate::error::{ReadyRsError, Result};
use crate::load::LoadAggregator;
use crate::models::{ProgressionRequest, ProgressionResponse, SupportingMetrics};
use crate::progression::ProgressionCalculator;
use crate::readiness::{ReadinessCalculator, ReadinessInputs, DEFAULT_SLEEP_SCORE};
use crate::store::HistoryStore;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use tracing::debug;

/// Top-level readiness and progression engine
pub struct ReadinessEngine {
    acwr: AcwrCalculator,
}

impl ReadinessEngine {
    /// Create an engine with default ACWR windows (7/28 days)
    pub fn new() -> Self {
        ReadinessEngine {
            acwr: AcwrCalculator::new(),
        }
    }

    /// Create an engine with custom ACWR windows
    pub fn with_config(config: AcwrConfig) -> Self {
        ReadinessEngine {
            acwr: AcwrCalculator::with_config(config),
        }
    }

    /// Validate a progression request
    pub fn validate(request: &ProgressionRequest) -> Result<()> {
        if request.user_id.is_empty() {
            return Err(ReadyRsError::Validation("user_id is required".to_string()));
        }
        if request.current_load <= Decimal::ZERO {
            return Err(ReadyRsError::Validation(
                "current_load must be a positive number".to_string(),
            ));
        }
        Ok(())
    }

    /// Evaluate one progression request against stored history
    ///
    /// `as_of` anchors the sliding windows and is echoed back as the
    /// response timestamp; the engine itself never reads the clock.
    pub fn evaluate(
        &self,
        store: &dyn HistoryStore,
        request: &ProgressionRequest,
        as_of: DateTime<Utc>,
    ) -> Result<ProgressionResponse> {
        Self::validate(request)?;

        let today = as_of.date_naive();
        let (acute_start, acute_end) = self.acwr.acute_window(today);
        let (chronic_start, chronic_end) = self.acwr.chronic_window(today);

        let acute_sessions = store.session_logs(&request.user_id, acute_start, acute_end)?;
        let chronic_sessions = store.session_logs(&request.user_id, chronic_start, chronic_end)?;
        let survey = store.latest_doms_survey(&request.user_id)?;
        let metrics = store.latest_readiness_metrics(&request.user_id)?;

        let acute_avg = LoadAggregator::average_load(&acute_sessions);
        let chronic_avg = LoadAggregator::average_load(&chronic_sessions);
        let acwr = self
            .acwr
            .ratio(acute_avg, chronic_avg)
            .to_f64()
            .unwrap_or(1.0);

        // Chronic sessions arrive most recent first; the first session
        // that recorded an RPE is the latest exertion signal.
        let last_rpe = chronic_sessions.iter().find_map(|s| s.session_rpe);
        let last_soreness = survey.as_ref().map(|s| s.average_soreness());
        let sleep_score = survey
            .as_ref()
            .and_then(|s| s.sleep_quality)
            .map(|quality| f64::from(quality) * 10.0);
        let hrv_delta = metrics.as_ref().and_then(|m| m.hrv_score);

        let inputs = ReadinessInputs {
            sleep_score,
            hrv_delta,
            acwr,
            last_rpe,
            last_soreness,
        };
        let readiness = ReadinessCalculator::index(&inputs);

        debug!(
            user_id = %request.user_id,
            readiness,
            acwr,
            acute_sessions = acute_sessions.len(),
            chronic_sessions = chronic_sessions.len(),
            "evaluated readiness"
        );

        let progression = ProgressionCalculator::suggest(
            readiness,
            acwr,
            request.current_load,
            request.exercise_type,
            last_rpe,
            last_soreness,
        );

        Ok(ProgressionResponse {
            readiness_index: round2(readiness),
            acwr: round2(acwr),
            progression,
            metrics: SupportingMetrics {
                latest_rpe: last_rpe,
                latest_doms: last_soreness,
                sleep_score: sleep_score.unwrap_or(DEFAULT_SLEEP_SCORE),
                sessions_last_7_days: acute_sessions.len(),
                sessions_last_28_days: chronic_sessions.len(),
            },
            timestamp: as_of,
        })
    }
}

impl Default for ReadinessEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
