//! Rule constants for the progress engine.

use serde::{Deserialize, Serialize};

/// Tunable rules for day success, streak breaking and the accountability reset.
///
/// `Default` reproduces the production rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressConfig {
    /// Minimum completion percentage for a day to count as successful
    pub success_threshold_percent: u32,

    /// Maximum number of past days scanned when counting the streak
    pub streak_window_days: usize,

    /// Consecutive unsuccessful days that end the streak
    pub max_consecutive_misses: u32,

    /// Length of the recent window used for the weekly miss rule and the weekly average
    pub weekly_window_days: usize,

    /// Unsuccessful days tolerated inside the weekly window
    pub weekly_allowed_misses: u32,

    /// Number of recent days checked before zeroing the accountability score
    pub reset_window_days: usize,

    /// Unsuccessful days tolerated inside the reset window
    pub reset_allowed_misses: u32,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            success_threshold_percent: 80,
            streak_window_days: 90,
            max_consecutive_misses: 3,
            weekly_window_days: 7,
            weekly_allowed_misses: 2,
            reset_window_days: 30,
            reset_allowed_misses: 3,
        }
    }
}

impl ProgressConfig {
    /// Set the day success threshold.
    pub fn with_success_threshold(mut self, percent: u32) -> Self {
        self.success_threshold_percent = percent;
        self
    }

    /// Set the streak scan window.
    pub fn with_streak_window(mut self, days: usize) -> Self {
        self.streak_window_days = days;
        self
    }

    /// Set the accountability reset rule.
    pub fn with_reset_rule(mut self, window_days: usize, allowed_misses: u32) -> Self {
        self.reset_window_days = window_days;
        self.reset_allowed_misses = allowed_misses;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ProgressConfig =
            serde_json::from_str(r#"{ "successThresholdPercent": 90 }"#).unwrap();
        assert_eq!(config.success_threshold_percent, 90);
        assert_eq!(config.streak_window_days, 90);
        assert_eq!(config.max_consecutive_misses, 3);
    }

    #[test]
    fn test_builders() {
        let config = ProgressConfig::default()
            .with_success_threshold(75)
            .with_streak_window(30)
            .with_reset_rule(14, 1);
        assert_eq!(config.success_threshold_percent, 75);
        assert_eq!(config.streak_window_days, 30);
        assert_eq!(config.reset_window_days, 14);
        assert_eq!(config.reset_allowed_misses, 1);
    }
}
