//! Readiness index calculation
//!
//! Combines sleep, HRV, workload balance, recent exertion, and soreness
//! into a single normalized 0-1 score.
//!
//! # Sports Science Background
//!
//! No single signal captures recovery state. Sleep quality and HRV track
//! the physiological side, the acute:chronic workload ratio tracks the
//! training-load side, and session RPE plus DOMS capture the subjective
//! side. Each signal is normalized into a 0-1 factor and the factors are
//! combined as a fixed weighted sum:
//!
//! - Sleep: 25%
//! - HRV: 20%
//! - Workload balance (ACWR fit): 20%
//! - Recent exertion: 20%
//! - Soreness: 15%
//!
//! Weights sum to 1.0 and every factor is clamped to [0,1] before
//! weighting, so the index is bounded by construction without a final
//! clamp.

/// Sleep score substituted when no survey reported sleep quality (0-100)
pub const DEFAULT_SLEEP_SCORE: f64 = 70.0;

/// Factor substituted when exertion or soreness data is absent
pub const NEUTRAL_FACTOR: f64 = 0.7;

/// Factor weights (must sum to 1.0)
const SLEEP_WEIGHT: f64 = 0.25;
const HRV_WEIGHT: f64 = 0.20;
const ACWR_WEIGHT: f64 = 0.20;
const EXERTION_WEIGHT: f64 = 0.20;
const SORENESS_WEIGHT: f64 = 0.15;

/// ACWR band treated as fully fit (inclusive)
const ACWR_SAFE_LOW: f64 = 0.8;
const ACWR_SAFE_HIGH: f64 = 1.3;

/// Midpoint of the safe band, used to penalize deviation
const ACWR_SAFE_MID: f64 = 1.05;

/// Hard floor for the ACWR-fit factor
const ACWR_FIT_FLOOR: f64 = 0.3;

/// Recovery signals feeding the readiness index
///
/// Data presence is explicit: every signal that can be missing is an
/// `Option`, and the neutral substitution happens visibly during factor
/// derivation rather than upstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadinessInputs {
    /// Sleep score on a 0-100 scale (survey sleep quality × 10)
    pub sleep_score: Option<f64>,

    /// Signed HRV delta from the personal baseline
    pub hrv_delta: Option<f64>,

    /// Acute:chronic workload ratio
    pub acwr: f64,

    /// Most recent session RPE (0-10)
    pub last_rpe: Option<f64>,

    /// Most recent average soreness (0-10)
    pub last_soreness: Option<f64>,
}

/// The five normalized factors, each in [0,1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadinessFactors {
    pub sleep: f64,
    pub hrv: f64,
    pub acwr_fit: f64,
    pub exertion: f64,
    pub soreness: f64,
}

impl ReadinessFactors {
    /// Fixed linear combination of the factors
    pub fn weighted_index(&self) -> f64 {
        SLEEP_WEIGHT * self.sleep
            + HRV_WEIGHT * self.hrv
            + ACWR_WEIGHT * self.acwr_fit
            + EXERTION_WEIGHT * self.exertion
            + SORENESS_WEIGHT * self.soreness
    }
}

/// Core readiness calculation engine
pub struct ReadinessCalculator;

impl ReadinessCalculator {
    /// Derive the five normalized factors from the raw signals
    pub fn factors(inputs: &ReadinessInputs) -> ReadinessFactors {
        let sleep_score = inputs.sleep_score.unwrap_or(DEFAULT_SLEEP_SCORE);
        let hrv_delta = inputs.hrv_delta.unwrap_or(0.0);

        ReadinessFactors {
            sleep: clamp01(sleep_score / 100.0),
            // A delta of -50 maps to 0, +50 maps to 1
            hrv: clamp01((hrv_delta + 50.0) / 100.0),
            acwr_fit: Self::acwr_fit(inputs.acwr),
            // Lower exertion = higher readiness
            exertion: match inputs.last_rpe {
                Some(rpe) => clamp01((10.0 - rpe) / 10.0),
                None => NEUTRAL_FACTOR,
            },
            // Lower soreness = higher readiness
            soreness: match inputs.last_soreness {
                Some(soreness) => clamp01((10.0 - soreness) / 10.0),
                None => NEUTRAL_FACTOR,
            },
        }
    }

    /// Compute the readiness index (0-1)
    pub fn index(inputs: &ReadinessInputs) -> f64 {
        Self::factors(inputs).weighted_index()
    }

    /// How well the ACWR sits in the safe 0.8-1.3 band
    ///
    /// 1.0 anywhere inside the band (inclusive); outside, the factor
    /// falls off linearly with distance from the band midpoint, floored
    /// at 0.3 so it never zeroes out the workload signal entirely.
    pub fn acwr_fit(acwr: f64) -> f64 {
        if (ACWR_SAFE_LOW..=ACWR_SAFE_HIGH).contains(&acwr) {
            1.0
        } else {
            (1.0 - (acwr - ACWR_SAFE_MID).abs() * 2.0).max(ACWR_FIT_FLOOR)
        }
    }
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
