use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Exercise categories supported by the progression engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    /// Multi-joint lifts (squat, deadlift, press)
    Compound,
    /// Single-joint accessory work
    Isolation,
    /// Steady-state or interval conditioning
    Cardio,
    /// Explosive/velocity work (cleans, jumps, throws)
    Power,
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseType::Compound => write!(f, "compound"),
            ExerciseType::Isolation => write!(f, "isolation"),
            ExerciseType::Cardio => write!(f, "cardio"),
            ExerciseType::Power => write!(f, "power"),
        }
    }
}

impl FromStr for ExerciseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compound" => Ok(ExerciseType::Compound),
            "isolation" => Ok(ExerciseType::Isolation),
            "cardio" => Ok(ExerciseType::Cardio),
            "power" => Ok(ExerciseType::Power),
            _ => Err(format!("Invalid exercise type: {}", s)),
        }
    }
}

/// A single logged training session
///
/// Produced by the training-tracking collaborator and consumed read-only.
/// Load values are in arbitrary load units (weight x reps, TRIMP, etc.);
/// the engine only requires them to be consistent across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLog {
    /// Date of the session
    pub date: NaiveDate,

    /// Session rating of perceived exertion (0-10)
    pub session_rpe: Option<f64>,

    /// Total load for the session
    pub total_load: Decimal,

    /// Exertion-weighted load (sRPE load). Falls back to `total_load`
    /// when absent.
    pub rpe_load: Option<Decimal>,
}

impl SessionLog {
    /// Effective load used for rolling averages: exertion-weighted load
    /// when recorded, otherwise the raw total
    pub fn effective_load(&self) -> Decimal {
        self.rpe_load.unwrap_or(self.total_load)
    }
}

/// Daily delayed-onset muscle soreness survey
///
/// At most one survey per day; the engine uses the most recent one.
/// All soreness readings are 0-10, wellness scales are 1-10.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomsSurvey {
    /// Survey date
    pub date: NaiveDate,

    /// Chest soreness (0-10)
    pub chest: u8,

    /// Back soreness (0-10)
    pub back: u8,

    /// Legs soreness (0-10)
    pub legs: u8,

    /// Shoulders soreness (0-10)
    pub shoulders: u8,

    /// Arms soreness (0-10)
    pub arms: u8,

    /// Core soreness (0-10)
    pub core: u8,

    /// Overall soreness impression (0-10)
    pub overall_soreness: u8,

    /// Sleep quality (1-10)
    pub sleep_quality: Option<u8>,

    /// Energy level (1-10)
    pub energy_level: Option<u8>,

    /// Motivation (1-10)
    pub motivation: Option<u8>,
}

impl DomsSurvey {
    /// Unweighted mean of the six muscle-group readings plus the overall
    /// impression (seven values)
    pub fn average_soreness(&self) -> f64 {
        let sum = self.chest as f64
            + self.back as f64
            + self.legs as f64
            + self.shoulders as f64
            + self.arms as f64
            + self.core as f64
            + self.overall_soreness as f64;
        sum / 7.0
    }
}

/// Daily physiological readiness metrics from a wearable or manual entry
///
/// All fields are optional; the engine substitutes neutral defaults for
/// anything missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessMetrics {
    /// Measurement date
    pub date: NaiveDate,

    /// HRV expressed as a signed delta from the personal baseline,
    /// in milliseconds of RMSSD
    pub hrv_score: Option<f64>,

    /// Resting heart rate in beats per minute
    pub resting_heart_rate: Option<u16>,

    /// Device-reported sleep score (0-100)
    pub sleep_score: Option<f64>,

    /// Subjective stress level (0-10)
    pub stress_level: Option<f64>,
}

/// Request for a progression suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionRequest {
    /// User identifier
    pub user_id: String,

    /// Load of the most recent / planned session. Must be positive.
    pub current_load: Decimal,

    /// Exercise category the suggestion applies to
    pub exercise_type: ExerciseType,

    /// Days since the last session. Accepted for forward compatibility;
    /// not consumed by the current scoring formula.
    #[serde(default = "default_days_since_last")]
    pub days_since_last: u32,
}

fn default_days_since_last() -> u32 {
    1
}

/// Load suggestion produced by the progression rule ladder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionSuggestion {
    /// Recommended load for the next session (2-decimal rounding)
    pub suggested_load: f64,

    /// Percent change relative to the current load (2-decimal rounding)
    pub load_change_percent: f64,

    /// Concatenated reasoning fragments from every rule that fired
    pub reasoning: String,

    /// Short recommendation set by the readiness band
    pub recommendation: String,

    /// Confidence in the suggestion (0-1)
    pub confidence: f64,
}

/// Supporting metrics echoed back with the suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportingMetrics {
    /// Most recent session RPE, if any session in the chronic window
    /// recorded one
    pub latest_rpe: Option<f64>,

    /// Average soreness from the most recent survey (0-10)
    pub latest_doms: Option<f64>,

    /// Sleep score used by the readiness formula (0-100)
    pub sleep_score: f64,

    /// Session count in the acute (7-day) window
    pub sessions_last_7_days: usize,

    /// Session count in the chronic (28-day) window
    pub sessions_last_28_days: usize,
}

/// Complete engine output for one progression request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionResponse {
    /// Normalized readiness index (0-1, 2-decimal rounding)
    pub readiness_index: f64,

    /// Acute:chronic workload ratio (2-decimal rounding)
    pub acwr: f64,

    /// The load suggestion itself
    pub progression: ProgressionSuggestion,

    /// Supporting metrics for display
    pub metrics: SupportingMetrics,

    /// Evaluation timestamp (supplied by the caller)
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_exercise_type_serialization() {
        let json = serde_json::to_string(&ExerciseType::Compound).unwrap();
        assert_eq!(json, "\"compound\"");

        let deserialized: ExerciseType = serde_json::from_str("\"cardio\"").unwrap();
        assert_eq!(deserialized, ExerciseType::Cardio);
    }

    #[test]
    fn test_exercise_type_from_str() {
        assert_eq!("compound".parse::<ExerciseType>().unwrap(), ExerciseType::Compound);
        assert_eq!("POWER".parse::<ExerciseType>().unwrap(), ExerciseType::Power);
        assert!("yoga".parse::<ExerciseType>().is_err());
    }

    #[test]
    fn test_effective_load_prefers_rpe_load() {
        let session = SessionLog {
            date: NaiveDate::from_ymd_opt(2024, 9, 23).unwrap(),
            session_rpe: Some(7.0),
            total_load: dec!(1000),
            rpe_load: Some(dec!(7000)),
        };
        assert_eq!(session.effective_load(), dec!(7000));

        let without_rpe = SessionLog {
            rpe_load: None,
            ..session
        };
        assert_eq!(without_rpe.effective_load(), dec!(1000));
    }

    #[test]
    fn test_average_soreness_uses_seven_values() {
        let survey = DomsSurvey {
            date: NaiveDate::from_ymd_opt(2024, 9, 23).unwrap(),
            chest: 2,
            back: 4,
            legs: 6,
            shoulders: 2,
            arms: 3,
            core: 1,
            overall_soreness: 3,
            sleep_quality: Some(8),
            energy_level: Some(7),
            motivation: Some(9),
        };

        // (2 + 4 + 6 + 2 + 3 + 1 + 3) / 7 = 3.0
        assert!((survey.average_soreness() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_request_days_since_last_default() {
        let json = r#"{"user_id":"u1","current_load":100,"exercise_type":"compound"}"#;
        let request: ProgressionRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.days_since_last, 1);
        assert_eq!(request.current_load, dec!(100));
        assert_eq!(request.exercise_type, ExerciseType::Compound);
    }

    #[test]
    fn test_request_rejects_unknown_exercise_type() {
        let json = r#"{"user_id":"u1","current_load":100,"exercise_type":"pilates"}"#;
        let result: Result<ProgressionRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_response_serialization_round_trip() {
        let response = ProgressionResponse {
            readiness_index: 0.78,
            acwr: 1.12,
            progression: ProgressionSuggestion {
                suggested_load: 105.0,
                load_change_percent: 5.0,
                reasoning: "high readiness / good recovery".to_string(),
                recommendation: "increase".to_string(),
                confidence: 0.9,
            },
            metrics: SupportingMetrics {
                latest_rpe: Some(7.0),
                latest_doms: Some(2.5),
                sleep_score: 80.0,
                sessions_last_7_days: 4,
                sessions_last_28_days: 14,
            },
            timestamp: Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        let deserialized: ProgressionResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(response, deserialized);
    }
}
