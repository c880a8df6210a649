//! Progress report returned by the engine.

use serde::{Deserialize, Serialize};
use transcend_core::{AccountabilityLevel, Tier};
use crate::ladder::{LevelTarget, TierTarget};

/// Everything the dashboard and stats endpoint show about a user's progress.
///
/// Serializes to the camelCase JSON shape of the stats endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    // Core metrics
    /// Completed entries across all of the user's trackers
    pub activities_completed: usize,
    /// All entries across the user's trackers, any status
    pub total_activities_assigned: usize,
    /// Lifetime completion percentage (0-100)
    pub completion_rate: u32,
    /// Consecutive successful days before today
    pub current_streak: u32,
    /// Average completion percentage of the most recent week
    pub weekly_average: u32,

    // Tier progression
    /// Stored tier (bronze when unset)
    pub tier: Tier,
    /// Tier the current streak qualifies for
    pub recommended_tier: Tier,
    /// Successful days among the first 30 on record
    pub successful_days30: usize,
    /// Successful days among the first 60 on record
    pub successful_days60: usize,
    /// Percentage of the 30-day target met
    pub tier_progress30: u32,
    /// Percentage of the 60-day target met
    pub tier_progress60: u32,
    /// Next tier for the stored tier
    pub next_tier_target: TierTarget,
    /// Percentage toward the next tier
    pub tier_current_progress: u32,
    /// Days targeted for the next tier, 0 at gold
    pub tier_target_days: usize,

    // Accountability level progression
    /// Stored accountability level (beginner when unset)
    pub accountability_level: AccountabilityLevel,
    /// Level the current streak qualifies for
    pub recommended_accountability_level: AccountabilityLevel,
    /// Successful days among the first 90 on record
    pub successful_days90: usize,
    /// Percentage of the 90-day target met
    pub accountability_progress90: u32,
    /// Next level for the stored level
    pub next_accountability_target: LevelTarget,
    /// Percentage toward the next level
    pub accountability_current_progress: u32,
    /// Days targeted for the next level, 0 at master
    pub accountability_target_days: usize,

    /// Midpoint of the daily activity quota for the stored level
    pub avg_activities_per_day: u32,
    /// Number of trackers on record
    pub total_days: usize,

    // Display-only milestone fields
    /// Streak past the current band floor, zeroed after too many recent misses
    pub accountability: u32,
    /// Days to the next named milestone
    pub days_to_next_level: u32,
    /// Milestone message
    pub level_up_message: String,
    /// Days to the next tier boundary on the 0-90 scale
    pub accountability_countdown: u32,
    /// Message paired with the countdown
    pub accountability_message: String,
}
