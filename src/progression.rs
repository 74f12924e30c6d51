//! Progression suggestion generation
//!
//! Maps the readiness index and supporting recovery signals to a load
//! multiplier for the next session. The logic is an ordered rule ladder:
//! a readiness band picks the base multiplier, a fixed sequence of
//! override rules then scales it multiplicatively, and a per-category
//! factor is applied last. Each rule is independently testable and the
//! ladder can be reordered or extended without touching the others.

use crate::models::{ExerciseType, ProgressionSuggestion};
use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// ACWR above which the athlete is considered overreaching
const ACWR_OVERREACH_THRESHOLD: f64 = 1.5;

/// ACWR below which the athlete is considered under-loaded
const ACWR_UNDERLOAD_THRESHOLD: f64 = 0.5;

/// Session RPE at or above which recent effort suppresses progression
const RPE_HIGH_THRESHOLD: f64 = 8.0;

/// Session RPE at or below which recent effort invites progression
const RPE_LOW_THRESHOLD: f64 = 5.0;

/// Average soreness at or above which recovery is considered incomplete
const SORENESS_HIGH_THRESHOLD: f64 = 7.0;

/// Average soreness at or below which recovery is considered complete
const SORENESS_LOW_THRESHOLD: f64 = 3.0;

/// Readiness bands driving the base multiplier and recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessBand {
    /// Readiness >= 0.8
    High,
    /// Readiness 0.6 to 0.8
    Moderate,
    /// Readiness 0.4 to 0.6
    Low,
    /// Readiness below 0.4
    VeryLow,
}

impl ReadinessBand {
    /// Classify a readiness index into its band
    pub fn from_index(readiness: f64) -> Self {
        if readiness >= 0.8 {
            ReadinessBand::High
        } else if readiness >= 0.6 {
            ReadinessBand::Moderate
        } else if readiness >= 0.4 {
            ReadinessBand::Low
        } else {
            ReadinessBand::VeryLow
        }
    }

    /// Base load multiplier for the band
    pub fn multiplier(&self) -> Decimal {
        match self {
            ReadinessBand::High => dec!(1.05),
            ReadinessBand::Moderate => dec!(1.0),
            ReadinessBand::Low => dec!(0.9),
            ReadinessBand::VeryLow => dec!(0.8),
        }
    }

    /// Reasoning fragment contributed by the band
    pub fn reasoning(&self) -> &'static str {
        match self {
            ReadinessBand::High => "high readiness / good recovery",
            ReadinessBand::Moderate => "moderate readiness, maintain",
            ReadinessBand::Low => "lower readiness, deload",
            ReadinessBand::VeryLow => "very low readiness, significant deload",
        }
    }

    /// Short recommendation shown to the user
    ///
    /// Set once by the band; later rules refine the multiplier but never
    /// overwrite the recommendation.
    pub fn recommendation(&self) -> &'static str {
        match self {
            ReadinessBand::High => "Increase load",
            ReadinessBand::Moderate => "Maintain current load",
            ReadinessBand::Low => "Reduce load slightly",
            ReadinessBand::VeryLow => "Significant deload recommended",
        }
    }

    /// Base confidence for the band
    pub fn confidence(&self) -> f64 {
        match self {
            ReadinessBand::High => 0.9,
            ReadinessBand::Moderate => 0.8,
            ReadinessBand::Low => 0.85,
            ReadinessBand::VeryLow => 0.9,
        }
    }
}

/// Signals the override rules evaluate against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleContext {
    /// Acute:chronic workload ratio
    pub acwr: f64,

    /// Most recent session RPE (0-10)
    pub last_rpe: Option<f64>,

    /// Most recent average soreness (0-10)
    pub last_soreness: Option<f64>,
}

/// A multiplicative adjustment produced by a fired rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    /// Factor applied to the running multiplier
    pub multiplier: Decimal,

    /// Reasoning fragment appended to the justification
    pub reasoning: &'static str,

    /// Minimum confidence this rule enforces, if any
    pub confidence_floor: Option<f64>,
}

/// Override rules applied after the readiness band, in ladder order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideRule {
    /// ACWR above the overreach threshold
    AcwrOverreaching,
    /// ACWR below the under-load threshold
    AcwrUnderLoaded,
    /// Last session felt very hard
    HighExertion,
    /// Last session felt easy
    LowExertion,
    /// Soreness indicates incomplete recovery
    HighSoreness,
    /// Minimal soreness, recovery complete
    LowSoreness,
}

/// The ladder: rules fire in this order, each scaling the multiplier
pub const OVERRIDE_LADDER: [OverrideRule; 6] = [
    OverrideRule::AcwrOverreaching,
    OverrideRule::AcwrUnderLoaded,
    OverrideRule::HighExertion,
    OverrideRule::LowExertion,
    OverrideRule::HighSoreness,
    OverrideRule::LowSoreness,
];

impl OverrideRule {
    /// Evaluate the rule against the context, returning an adjustment
    /// when it fires
    pub fn evaluate(&self, context: &RuleContext) -> Option<Adjustment> {
        match self {
            OverrideRule::AcwrOverreaching => {
                (context.acwr > ACWR_OVERREACH_THRESHOLD).then_some(Adjustment {
                    multiplier: dec!(0.85),
                    reasoning: "overreaching risk",
                    confidence_floor: Some(0.9),
                })
            }
            OverrideRule::AcwrUnderLoaded => {
                (context.acwr < ACWR_UNDERLOAD_THRESHOLD).then_some(Adjustment {
                    multiplier: dec!(1.1),
                    reasoning: "under-loaded, room to progress",
                    confidence_floor: None,
                })
            }
            OverrideRule::HighExertion => context
                .last_rpe
                .filter(|rpe| *rpe >= RPE_HIGH_THRESHOLD)
                .map(|_| Adjustment {
                    multiplier: dec!(0.95),
                    reasoning: "recent high effort, fatigue",
                    confidence_floor: None,
                }),
            OverrideRule::LowExertion => context
                .last_rpe
                .filter(|rpe| *rpe <= RPE_LOW_THRESHOLD)
                .map(|_| Adjustment {
                    multiplier: dec!(1.05),
                    reasoning: "recent low effort, capacity for more",
                    confidence_floor: None,
                }),
            OverrideRule::HighSoreness => context
                .last_soreness
                .filter(|soreness| *soreness >= SORENESS_HIGH_THRESHOLD)
                .map(|_| Adjustment {
                    multiplier: dec!(0.9),
                    reasoning: "incomplete recovery",
                    confidence_floor: Some(0.85),
                }),
            OverrideRule::LowSoreness => context
                .last_soreness
                .filter(|soreness| *soreness <= SORENESS_LOW_THRESHOLD)
                .map(|_| Adjustment {
                    multiplier: dec!(1.03),
                    reasoning: "minimal soreness, good recovery",
                    confidence_floor: None,
                }),
        }
    }
}

/// Fixed load scaling per exercise category, applied after all rules
pub fn category_factor(exercise_type: ExerciseType) -> Decimal {
    match exercise_type {
        ExerciseType::Compound => dec!(1.0),
        ExerciseType::Isolation => dec!(1.05),
        ExerciseType::Cardio => dec!(1.08),
        ExerciseType::Power => dec!(0.95),
    }
}

/// Core progression suggestion engine
pub struct ProgressionCalculator;

impl ProgressionCalculator {
    /// Run the rule ladder and produce a load suggestion
    ///
    /// Single-pass and stateless: the readiness band picks the base
    /// multiplier and recommendation, each override rule that fires
    /// scales the multiplier and appends its reasoning, and the category
    /// factor is applied last. The final suggested load is deliberately
    /// not floored.
    pub fn suggest(
        readiness: f64,
        acwr: f64,
        current_load: Decimal,
        exercise_type: ExerciseType,
        last_rpe: Option<f64>,
        last_soreness: Option<f64>,
    ) -> ProgressionSuggestion {
        let band = ReadinessBand::from_index(readiness);
        let mut multiplier = band.multiplier();
        let mut confidence = band.confidence();
        let mut reasoning = vec![band.reasoning()];

        let context = RuleContext {
            acwr,
            last_rpe,
            last_soreness,
        };

        for rule in OVERRIDE_LADDER {
            if let Some(adjustment) = rule.evaluate(&context) {
                multiplier *= adjustment.multiplier;
                reasoning.push(adjustment.reasoning);
                if let Some(floor) = adjustment.confidence_floor {
                    confidence = confidence.max(floor);
                }
            }
        }

        multiplier *= category_factor(exercise_type);

        let suggested_load = (current_load * multiplier)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let load_change_percent = ((multiplier - Decimal::ONE) * dec!(100))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        ProgressionSuggestion {
            suggested_load: suggested_load.to_f64().unwrap_or(0.0),
            load_change_percent: load_change_percent.to_f64().unwrap_or(0.0),
            reasoning: reasoning.join("; "),
            recommendation: band.recommendation().to_string(),
            confidence,
        }
    }
}
