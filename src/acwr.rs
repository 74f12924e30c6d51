//! Acute:Chronic Workload Ratio (ACWR)
//!
//! ACWR compares a short-term (acute) rolling load average against a
//! long-term (chronic) one. Ratios near 1.0 indicate the athlete is
//! training at a familiar load; ratios above ~1.5 are associated with
//! elevated injury risk, ratios below ~0.8 with detraining.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// ACWR configuration with customizable window lengths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcwrConfig {
    /// Acute window length in days (default: 7)
    pub acute_window_days: u16,

    /// Chronic window length in days (default: 28)
    pub chronic_window_days: u16,
}

impl Default for AcwrConfig {
    fn default() -> Self {
        AcwrConfig {
            acute_window_days: 7,
            chronic_window_days: 28,
        }
    }
}

/// ACWR interpretation bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcwrInterpretation {
    /// Below 0.8: load well under the chronic norm
    Detraining,
    /// 0.8 to 1.3: the commonly cited "sweet spot"
    Optimal,
    /// 1.3 to 1.5: load building faster than the base
    Caution,
    /// Above 1.5: acute load far above the chronic base
    HighRisk,
}

impl AcwrInterpretation {
    /// Classify a ratio into its interpretation band
    pub fn from_ratio(ratio: Decimal) -> Self {
        if ratio > dec!(1.5) {
            AcwrInterpretation::HighRisk
        } else if ratio > dec!(1.3) {
            AcwrInterpretation::Caution
        } else if ratio >= dec!(0.8) {
            AcwrInterpretation::Optimal
        } else {
            AcwrInterpretation::Detraining
        }
    }

    /// Get interpretation description
    pub fn description(&self) -> &'static str {
        match self {
            AcwrInterpretation::Detraining => "Under-loaded relative to chronic base",
            AcwrInterpretation::Optimal => "Workload balance in the optimal band",
            AcwrInterpretation::Caution => "Load rising faster than the chronic base",
            AcwrInterpretation::HighRisk => "Acute load spike (overreaching risk)",
        }
    }

    /// Get training recommendation
    pub fn recommendation(&self) -> &'static str {
        match self {
            AcwrInterpretation::Detraining => "Room to progress training load",
            AcwrInterpretation::Optimal => "Maintain current load progression",
            AcwrInterpretation::Caution => "Slow the ramp, monitor recovery",
            AcwrInterpretation::HighRisk => "Reduce load and prioritize recovery",
        }
    }
}

/// Core ACWR calculation engine
pub struct AcwrCalculator {
    config: AcwrConfig,
}

impl AcwrCalculator {
    /// Create new ACWR calculator with default windows
    pub fn new() -> Self {
        AcwrCalculator {
            config: AcwrConfig::default(),
        }
    }

    /// Create new ACWR calculator with custom configuration
    pub fn with_config(config: AcwrConfig) -> Self {
        AcwrCalculator { config }
    }

    /// Acute window date range ending at `as_of` (inclusive)
    pub fn acute_window(&self, as_of: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = as_of
            .checked_sub_days(Days::new(self.config.acute_window_days as u64))
            .unwrap_or(as_of);
        (start, as_of)
    }

    /// Chronic window date range ending at `as_of` (inclusive)
    pub fn chronic_window(&self, as_of: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = as_of
            .checked_sub_days(Days::new(self.config.chronic_window_days as u64))
            .unwrap_or(as_of);
        (start, as_of)
    }

    /// Acute ÷ chronic ratio
    ///
    /// A zero chronic average means there is no base to compare against;
    /// the ratio defaults to a neutral 1.0 instead of dividing by zero.
    pub fn ratio(&self, acute_avg: Decimal, chronic_avg: Decimal) -> Decimal {
        if chronic_avg.is_zero() {
            return Decimal::ONE;
        }
        acute_avg / chronic_avg
    }
}

impl Default for AcwrCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_chronic_average_is_neutral() {
        let calculator = AcwrCalculator::new();
        assert_eq!(calculator.ratio(dec!(500), dec!(0)), Decimal::ONE);
        assert_eq!(calculator.ratio(dec!(0), dec!(0)), Decimal::ONE);
    }

    #[test]
    fn test_equal_averages_give_unit_ratio() {
        let calculator = AcwrCalculator::new();
        assert_eq!(calculator.ratio(dec!(350), dec!(350)), Decimal::ONE);
    }

    #[test]
    fn test_ratio_is_plain_division() {
        let calculator = AcwrCalculator::new();
        assert_eq!(calculator.ratio(dec!(600), dec!(400)), dec!(1.5));
        assert_eq!(calculator.ratio(dec!(200), dec!(400)), dec!(0.5));
    }

    #[test]
    fn test_window_ranges() {
        let calculator = AcwrCalculator::new();
        let as_of = NaiveDate::from_ymd_opt(2024, 9, 28).unwrap();

        let (acute_start, acute_end) = calculator.acute_window(as_of);
        assert_eq!(acute_start, NaiveDate::from_ymd_opt(2024, 9, 21).unwrap());
        assert_eq!(acute_end, as_of);

        let (chronic_start, chronic_end) = calculator.chronic_window(as_of);
        assert_eq!(chronic_start, NaiveDate::from_ymd_opt(2024, 8, 31).unwrap());
        assert_eq!(chronic_end, as_of);
    }

    #[test]
    fn test_custom_config_windows() {
        let calculator = AcwrCalculator::with_config(AcwrConfig {
            acute_window_days: 3,
            chronic_window_days: 21,
        });
        let as_of = NaiveDate::from_ymd_opt(2024, 9, 28).unwrap();

        let (start, _) = calculator.acute_window(as_of);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 9, 25).unwrap());
    }

    #[test]
    fn test_interpretation_bands() {
        assert_eq!(
            AcwrInterpretation::from_ratio(dec!(0.5)),
            AcwrInterpretation::Detraining
        );
        assert_eq!(
            AcwrInterpretation::from_ratio(dec!(0.8)),
            AcwrInterpretation::Optimal
        );
        assert_eq!(
            AcwrInterpretation::from_ratio(dec!(1.3)),
            AcwrInterpretation::Optimal
        );
        assert_eq!(
            AcwrInterpretation::from_ratio(dec!(1.4)),
            AcwrInterpretation::Caution
        );
        assert_eq!(
            AcwrInterpretation::from_ratio(dec!(1.6)),
            AcwrInterpretation::HighRisk
        );
    }
}
