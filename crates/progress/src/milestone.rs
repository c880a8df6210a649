//! Display-only milestone messaging.
//!
//! Inside each tier band the dashboard shows an "accountability" score (days
//! of streak past the band's floor) and how many days remain to the next named
//! milestone. Master-level users get their own milestone names.

use transcend_core::{AccountabilityLevel, Tier};

/// Streak floor of a tier band for display purposes.
pub fn band_floor(tier: Tier) -> u32 {
    match tier {
        Tier::Bronze => 0,
        Tier::Silver => 30,
        Tier::Gold => 60,
    }
}

/// Streak at which master users hit the top milestone.
const MASTER_CEILING: u32 = 90;

/// Days remaining to the next milestone and the message describing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    /// Streak floor of the current band
    pub floor: u32,
    /// Days remaining, never negative
    pub days_to_next_level: u32,
    /// User-facing message
    pub message: String,
}

/// Milestone for a user at `tier` / `level` with the given streak.
pub fn next_milestone(tier: Tier, level: AccountabilityLevel, streak: u32) -> Milestone {
    let floor = band_floor(tier);

    if level == AccountabilityLevel::Master {
        let (ceiling, target) = match tier.next() {
            Some(next) => (band_floor(next), Some(format!("Master/{}", next.display_name()))),
            None => (MASTER_CEILING, None),
        };
        let days = ceiling.saturating_sub(streak);
        let message = match (target, days) {
            (Some(name), 0) => format!("You have reached {}!", name),
            (Some(name), d) => format!("{} more days to {}!", d, name),
            (None, 0) => "You have reached the highest accountability level!".to_string(),
            (None, d) => format!("{} more days to hit the highest level!", d),
        };
        return Milestone { floor, days_to_next_level: days, message };
    }

    match tier.next() {
        Some(next) => {
            let days = band_floor(next).saturating_sub(streak);
            let message = if days > 0 {
                format!("{} more days to {}!", days, next.display_name())
            } else {
                format!("You have reached {}!", next.display_name())
            };
            Milestone { floor, days_to_next_level: days, message }
        }
        None => Milestone {
            floor,
            days_to_next_level: 0,
            message: "You have reached the highest tier!".to_string(),
        },
    }
}

/// Accountability score: streak past the band floor, zeroed when `reset`.
pub fn accountability_score(streak: u32, floor: u32, reset: bool) -> u32 {
    if reset {
        0
    } else {
        streak.saturating_sub(floor)
    }
}
