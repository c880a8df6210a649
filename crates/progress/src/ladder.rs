//! Tier and accountability-level ladders.
//!
//! Both ladders are driven purely by the current streak. The windowed progress
//! figures look at the earliest trackers on record instead.

use serde::{Deserialize, Serialize};
use transcend_core::{AccountabilityLevel, DailyTracker, Tier};
use crate::day::DayLedger;

/// Streak needed for silver.
pub const SILVER_STREAK: u32 = 31;
/// Streak needed for gold.
pub const GOLD_STREAK: u32 = 61;
/// Streak at which the accountability countdown bottoms out.
pub const COUNTDOWN_CAP: u32 = 90;
/// Streak needed for the intermediate level.
pub const INTERMEDIATE_STREAK: u32 = 91;
/// Streak needed for the master level.
pub const MASTER_STREAK: u32 = 181;

/// Days of successes targeted to advance from bronze.
pub const SILVER_WINDOW: usize = 30;
/// Days of successes targeted to advance from silver.
pub const GOLD_WINDOW: usize = 60;
/// Days of successes targeted to advance an accountability level.
pub const LEVEL_WINDOW: usize = 90;

/// Shown next to a non-zero countdown.
pub const COUNTDOWN_MESSAGE: &str = "more days to next level!";
/// Shown once the countdown reaches zero.
pub const HIGHEST_LEVEL_MESSAGE: &str = "You have reached the highest accountability level!";

/// Tier a streak of this length qualifies for.
pub fn tier_for_streak(streak: u32) -> Tier {
    if streak >= GOLD_STREAK {
        Tier::Gold
    } else if streak >= SILVER_STREAK {
        Tier::Silver
    } else {
        Tier::Bronze
    }
}

/// Accountability level a streak of this length qualifies for.
pub fn level_for_streak(streak: u32) -> AccountabilityLevel {
    if streak >= MASTER_STREAK {
        AccountabilityLevel::Master
    } else if streak >= INTERMEDIATE_STREAK {
        AccountabilityLevel::Intermediate
    } else {
        AccountabilityLevel::Beginner
    }
}

/// Days left until the next tier boundary, 0 once the cap is reached.
pub fn accountability_countdown(streak: u32) -> u32 {
    if streak >= COUNTDOWN_CAP {
        0
    } else if streak >= GOLD_STREAK {
        COUNTDOWN_CAP - streak
    } else if streak >= SILVER_STREAK {
        GOLD_STREAK - streak
    } else {
        SILVER_STREAK - streak
    }
}

/// Message paired with a countdown value.
pub fn countdown_message(countdown: u32) -> &'static str {
    if countdown == 0 {
        HIGHEST_LEVEL_MESSAGE
    } else {
        COUNTDOWN_MESSAGE
    }
}

/// Next step on the tier ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierTarget {
    /// Working toward silver
    Silver,
    /// Working toward gold
    Gold,
    /// Top of the ladder
    Max,
}

/// Next step on the accountability ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelTarget {
    /// Working toward intermediate
    Intermediate,
    /// Working toward master
    Master,
    /// Top of the ladder
    Max,
}

/// Successful-day counts over the first 30 and 60 days on record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierProgress {
    /// Successful days among the first 30 on record
    pub successful_days_30: usize,
    /// Successful days among the first 60 on record
    pub successful_days_60: usize,
    /// Percentage of the 30-day target met, capped at 100
    pub progress_30: f64,
    /// Percentage of the 60-day target met, capped at 100
    pub progress_60: f64,
    /// Next tier for the current tier
    pub next_target: TierTarget,
    /// Percentage toward the next tier
    pub current_progress: f64,
    /// Days targeted for the next tier, 0 at gold
    pub target_days: usize,
}

/// Successful-day count over the first 90 days on record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelProgress {
    /// Successful days among the first 90 on record
    pub successful_days_90: usize,
    /// Percentage of the 90-day target met, capped at 100
    pub progress_90: f64,
    /// Next level for the current level
    pub next_target: LevelTarget,
    /// Percentage toward the next level
    pub current_progress: f64,
    /// Days targeted for the next level, 0 at master
    pub target_days: usize,
}

fn window_percent(successful: usize, target: usize) -> f64 {
    (successful as f64 / target as f64 * 100.0).min(100.0)
}

/// Tier progress of a user currently at `tier`. `ascending` is oldest first.
pub fn tier_progress(ascending: &[&DailyTracker], ledger: &DayLedger, tier: Tier) -> TierProgress {
    let successful_days_30 = ledger.count_successful(ascending.iter().take(SILVER_WINDOW).copied());
    let successful_days_60 = ledger.count_successful(ascending.iter().take(GOLD_WINDOW).copied());
    let progress_30 = window_percent(successful_days_30, SILVER_WINDOW);
    let progress_60 = window_percent(successful_days_60, GOLD_WINDOW);

    let (next_target, current_progress, target_days) = match tier {
        Tier::Bronze => (TierTarget::Silver, progress_30, SILVER_WINDOW),
        Tier::Silver => (TierTarget::Gold, progress_60, GOLD_WINDOW),
        Tier::Gold => (TierTarget::Max, 100.0, 0),
    };

    TierProgress {
        successful_days_30,
        successful_days_60,
        progress_30,
        progress_60,
        next_target,
        current_progress,
        target_days,
    }
}

/// Accountability-level progress of a user currently at `level`. `ascending`
/// is oldest first.
pub fn level_progress(
    ascending: &[&DailyTracker],
    ledger: &DayLedger,
    level: AccountabilityLevel,
) -> LevelProgress {
    let successful_days_90 = ledger.count_successful(ascending.iter().take(LEVEL_WINDOW).copied());
    let progress_90 = window_percent(successful_days_90, LEVEL_WINDOW);

    let (next_target, current_progress, target_days) = match level {
        AccountabilityLevel::Beginner => (LevelTarget::Intermediate, progress_90, LEVEL_WINDOW),
        AccountabilityLevel::Intermediate => (LevelTarget::Master, progress_90, LEVEL_WINDOW),
        AccountabilityLevel::Master => (LevelTarget::Max, 100.0, 0),
    };

    LevelProgress {
        successful_days_90,
        progress_90,
        next_target,
        current_progress,
        target_days,
    }
}
