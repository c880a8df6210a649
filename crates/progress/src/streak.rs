//! Current streak calculation.

use transcend_core::DailyTracker;
use crate::config::ProgressConfig;
use crate::day::DayLedger;

/// Count consecutive successful days, most recent first.
///
/// `past` must hold only days before today, sorted newest first. Unsuccessful
/// days are tolerated until either `max_consecutive_misses` occur in a row or
/// more than `weekly_allowed_misses` occur within the first
/// `weekly_window_days` scanned. At most `streak_window_days` are scanned.
pub fn current_streak(past: &[&DailyTracker], ledger: &DayLedger, config: &ProgressConfig) -> u32 {
    let mut streak = 0;
    let mut missed = 0;
    let mut consecutive_missed = 0;

    for (position, tracker) in past.iter().take(config.streak_window_days).enumerate() {
        if ledger.is_successful(tracker) {
            streak += 1;
            consecutive_missed = 0;
            continue;
        }

        missed += 1;
        consecutive_missed += 1;
        if consecutive_missed >= config.max_consecutive_misses {
            break;
        }
        if position < config.weekly_window_days && missed > config.weekly_allowed_misses {
            break;
        }
    }

    streak
}

/// Whether more than `reset_allowed_misses` of the most recent
/// `reset_window_days` trackers were unsuccessful.
///
/// `recent` is sorted newest first and may include today.
pub fn exceeds_reset_misses(recent: &[&DailyTracker], ledger: &DayLedger, config: &ProgressConfig) -> bool {
    let missed = recent
        .iter()
        .take(config.reset_window_days)
        .filter(|t| !ledger.is_successful(t))
        .count();
    missed > config.reset_allowed_misses as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use transcend_core::{ActivityId, EntryStatus, TimeSlot, TrackerEntry, UserId};

    /// Build one day per flag, newest first, starting yesterday.
    fn history(pattern: &str) -> (Vec<DailyTracker>, DayLedger) {
        let user = UserId::new();
        let yesterday = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let mut trackers = Vec::new();
        let mut entries = Vec::new();
        for (i, flag) in pattern.chars().enumerate() {
            let tracker = DailyTracker::new(user, yesterday - Duration::days(i as i64));
            let mut entry = TrackerEntry::new(tracker.id, ActivityId::new(), TimeSlot::Morning);
            if flag == 'S' {
                entry.set_status(EntryStatus::Completed);
            }
            entries.push(entry);
            trackers.push(tracker);
        }
        let ledger = DayLedger::new(&entries, 80);
        (trackers, ledger)
    }

    fn streak_of(pattern: &str) -> u32 {
        let (trackers, ledger) = history(pattern);
        let past: Vec<&DailyTracker> = trackers.iter().collect();
        current_streak(&past, &ledger, &ProgressConfig::default())
    }

    #[test]
    fn test_all_successful() {
        assert_eq!(streak_of("SSSSS"), 5);
    }

    #[test]
    fn test_three_consecutive_misses_break() {
        assert_eq!(streak_of("SSFFF"), 2);
        assert_eq!(streak_of("SSFFFSSSS"), 2);
    }

    #[test]
    fn test_isolated_miss_is_tolerated() {
        assert_eq!(streak_of("SSFSS"), 4);
        assert_eq!(streak_of("SFFSS"), 3);
    }

    #[test]
    fn test_third_miss_in_week_breaks() {
        assert_eq!(streak_of("FSFSFSS"), 2);
    }

    #[test]
    fn test_weekly_rule_only_applies_to_first_week() {
        // Misses at positions 7, 9 and 11 are spread out past the first week.
        assert_eq!(streak_of("SSSSSSSFSFSFSS"), 11);
    }

    #[test]
    fn test_scan_window_caps_streak() {
        let pattern = "S".repeat(120);
        assert_eq!(streak_of(&pattern), 90);
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(streak_of(""), 0);
    }

    #[test]
    fn test_reset_rule() {
        let (trackers, ledger) = history("SFSFSFSSSSSSSSSSSSSSSSSSSSSSSS");
        let past: Vec<&DailyTracker> = trackers.iter().collect();
        assert!(!exceeds_reset_misses(&past, &ledger, &ProgressConfig::default()));

        let (trackers, ledger) = history("SFSFSFSFSSSSSSSSSSSSSSSSSSSSSS");
        let past: Vec<&DailyTracker> = trackers.iter().collect();
        assert!(exceeds_reset_misses(&past, &ledger, &ProgressConfig::default()));
    }

    #[test]
    fn test_reset_rule_ignores_days_outside_window() {
        let pattern = format!("{}FFFF", "S".repeat(30));
        let (trackers, ledger) = history(&pattern);
        let past: Vec<&DailyTracker> = trackers.iter().collect();
        assert!(!exceeds_reset_misses(&past, &ledger, &ProgressConfig::default()));
    }
}
