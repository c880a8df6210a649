//! Progression ladders: tier and accountability level.

use serde::{Deserialize, Serialize};
use crate::enums::string_enum;

string_enum! {
    /// Tier progression track driven by streak length.
    pub enum Tier (fallback = Bronze) {
        /// Entry tier
        Bronze => "bronze",
        /// Reached after a month-long streak
        Silver => "silver",
        /// Reached after a two-month streak
        Gold => "gold",
    }
}

string_enum! {
    /// Accountability level, the longer-horizon progression track.
    pub enum AccountabilityLevel (fallback = Beginner) {
        /// Entry level
        Beginner => "beginner",
        /// Reached after a quarter-long streak
        Intermediate => "intermediate",
        /// Reached after a half-year streak
        Master => "master",
    }
}

string_enum! {
    /// Account role.
    pub enum Role (fallback = User) {
        /// Regular member
        User => "user",
        /// Manages the activity catalog and user accounts
        Admin => "admin",
    }
}

impl Tier {
    /// Next tier up the ladder, `None` at gold.
    pub fn next(&self) -> Option<Tier> {
        match self {
            Tier::Bronze => Some(Tier::Silver),
            Tier::Silver => Some(Tier::Gold),
            Tier::Gold => None,
        }
    }

    /// Capitalized name for user-facing messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
        }
    }
}

impl AccountabilityLevel {
    /// Next level up the ladder, `None` at master.
    pub fn next(&self) -> Option<AccountabilityLevel> {
        match self {
            AccountabilityLevel::Beginner => Some(AccountabilityLevel::Intermediate),
            AccountabilityLevel::Intermediate => Some(AccountabilityLevel::Master),
            AccountabilityLevel::Master => None,
        }
    }

    /// Daily activity quota assigned at this level.
    pub fn quota(&self) -> ActivityQuota {
        match self {
            AccountabilityLevel::Beginner => ActivityQuota { min_activities: 6, max_activities: 8 },
            AccountabilityLevel::Intermediate => ActivityQuota { min_activities: 8, max_activities: 10 },
            AccountabilityLevel::Master => ActivityQuota { min_activities: 10, max_activities: 12 },
        }
    }
}

/// How many activities a user is assigned per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityQuota {
    /// Lower bound
    pub min_activities: u32,
    /// Upper bound
    pub max_activities: u32,
}

impl ActivityQuota {
    /// Quota used when a user has no accountability level on record.
    pub const UNASSIGNED_AVERAGE: u32 = 8;

    /// Midpoint of the quota, rounded half up.
    pub fn average(&self) -> u32 {
        (self.min_activities + self.max_activities + 1) / 2
    }
}
