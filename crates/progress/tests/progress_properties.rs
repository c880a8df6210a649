//! End-to-end behavior of the progress engine over synthetic histories.

use chrono::{Duration, NaiveDate};
use transcend_core::{
    AccountabilityLevel, ActivityId, DailyTracker, EntryStatus, Tier, TimeSlot, TrackerEntry, User,
};
use transcend_progress::ladder::{accountability_countdown, tier_for_streak, HIGHEST_LEVEL_MESSAGE};
use transcend_progress::{compute_user_progress, ProgressContext, TierTarget};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 20).unwrap()
}

fn ctx() -> ProgressContext {
    ProgressContext::new(today())
}

/// Trackers and entries for one user, built day by day.
struct History {
    user: User,
    trackers: Vec<DailyTracker>,
    entries: Vec<TrackerEntry>,
}

impl History {
    fn new(user: User) -> Self {
        Self { user, trackers: Vec::new(), entries: Vec::new() }
    }

    fn day(&mut self, days_ago: i64, completed: usize, total: usize) -> &mut Self {
        let tracker = DailyTracker::new(self.user.id, today() - Duration::days(days_ago));
        for i in 0..total {
            let mut entry = TrackerEntry::new(tracker.id, ActivityId::new(), TimeSlot::Morning);
            if i < completed {
                entry.set_status(EntryStatus::Completed);
            }
            self.entries.push(entry);
        }
        self.trackers.push(tracker);
        self
    }

    /// One day per flag, newest first, starting yesterday. `S` succeeds, `F` fails.
    fn pattern(&mut self, flags: &str) -> &mut Self {
        for (i, flag) in flags.chars().enumerate() {
            let completed = if flag == 'S' { 4 } else { 1 };
            self.day(i as i64 + 1, completed, 4);
        }
        self
    }

    fn report(&self) -> transcend_progress::ProgressReport {
        compute_user_progress(&self.user, &self.trackers, &self.entries, &ctx())
    }
}

#[test]
fn same_input_same_report() {
    let mut history = History::new(User::new("same@example.com"));
    history.pattern("SSFSSFFS");
    assert_eq!(history.report(), history.report());
}

#[test]
fn input_order_does_not_matter() {
    let mut history = History::new(User::new("order@example.com"));
    history.pattern("SSFSSSFSS");
    let sorted = history.report();
    history.trackers.reverse();
    history.entries.reverse();
    assert_eq!(history.report(), sorted);
}

#[test]
fn today_never_counts_toward_streak() {
    let mut history = History::new(User::new("today@example.com"));
    history.day(0, 4, 4);
    assert_eq!(history.report().current_streak, 0);

    history.day(1, 4, 4);
    assert_eq!(history.report().current_streak, 1);
}

#[test]
fn three_consecutive_misses_end_streak() {
    let mut history = History::new(User::new("miss@example.com"));
    history.pattern("SSFFF");
    assert_eq!(history.report().current_streak, 2);
}

#[test]
fn third_miss_within_week_ends_streak() {
    let mut history = History::new(User::new("week@example.com"));
    history.pattern("FSFSFSS");
    assert_eq!(history.report().current_streak, 2);
}

#[test]
fn weekly_average_of_mixed_days() {
    let mut history = History::new(User::new("avg@example.com"));
    for (days_ago, completed) in [2, 2, 1, 1, 0, 2, 2].into_iter().enumerate() {
        history.day(days_ago as i64 + 1, completed, 2);
    }
    // An older day outside the week must not move the average.
    history.day(30, 0, 2);
    assert_eq!(history.report().weekly_average, 71);
}

#[test]
fn tier_boundaries() {
    assert_eq!(tier_for_streak(30), Tier::Bronze);
    assert_eq!(accountability_countdown(30), 1);
    assert_eq!(tier_for_streak(31), Tier::Silver);
    assert_eq!(accountability_countdown(31), 30);
    assert_eq!(tier_for_streak(61), Tier::Gold);
    assert_eq!(accountability_countdown(61), 29);
    assert_eq!(accountability_countdown(90), 0);
}

#[test]
fn countdown_reaches_zero_at_ninety() {
    let mut history = History::new(User::new("ninety@example.com"));
    history.pattern(&"S".repeat(95));
    let report = history.report();
    assert_eq!(report.current_streak, 90);
    assert_eq!(report.accountability_countdown, 0);
    assert_eq!(report.accountability_message, HIGHEST_LEVEL_MESSAGE);
    assert_eq!(report.recommended_tier, Tier::Gold);
    assert_eq!(report.recommended_accountability_level, AccountabilityLevel::Beginner);
}

#[test]
fn seventy_five_percent_day_is_a_miss() {
    let mut history = History::new(User::new("edge@example.com"));
    history.day(1, 3, 4);
    assert_eq!(history.report().current_streak, 0);

    let mut history = History::new(User::new("edge2@example.com"));
    history.day(1, 4, 4);
    assert_eq!(history.report().current_streak, 1);
}

#[test]
fn day_without_entries_is_a_miss() {
    let mut history = History::new(User::new("blank@example.com"));
    history.day(1, 4, 4).day(2, 0, 0).day(3, 4, 4);
    let report = history.report();
    assert_eq!(report.current_streak, 2);
    assert_eq!(report.total_days, 3);
    assert_eq!(report.successful_days30, 2);
}

#[test]
fn too_many_misses_in_a_month_zero_accountability() {
    // Four isolated misses after the first week keep the streak alive...
    let mut history = History::new(User::new("reset@example.com"));
    history.pattern("SSSSSSSSFSSSSFSSSSFSSSSFSSSSSS");
    let report = history.report();
    assert_eq!(report.current_streak, 26);
    // ...but still zero the displayed score.
    assert_eq!(report.accountability, 0);

    let mut history = History::new(User::new("keep@example.com"));
    history.pattern("SSSSSSSSFSSSSFSSSSFSSSSSSSSSSS");
    let report = history.report();
    assert_eq!(report.current_streak, 27);
    assert_eq!(report.accountability, 27);
}

#[test]
fn missed_today_counts_toward_month_of_misses() {
    // Three past misses alone are tolerated; a failing tracker for today is the fourth.
    let mut history = History::new(User::new("today-miss@example.com"));
    history.pattern("SSSSSSSSFSSSSFSSSSFSSSSSSSSSS");
    let report = history.report();
    assert_eq!(report.current_streak, 26);
    assert_eq!(report.accountability, 26);

    history.day(0, 0, 4);
    let report = history.report();
    assert_eq!(report.current_streak, 26);
    assert_eq!(report.accountability, 0);
}

#[test]
fn thirty_five_day_run_recommends_silver() {
    let mut history = History::new(User::new("run@example.com").with_tier(Tier::Bronze));
    history.pattern(&"S".repeat(35));
    history.day(0, 4, 4);

    let report = history.report();
    assert_eq!(report.current_streak, 35);
    assert_eq!(report.tier, Tier::Bronze);
    assert_eq!(report.recommended_tier, Tier::Silver);
    assert_eq!(report.successful_days30, 30);
    assert_eq!(report.tier_progress30, 100);
    assert_eq!(report.successful_days60, 36);
    assert_eq!(report.tier_progress60, 60);
    assert_eq!(report.next_tier_target, TierTarget::Silver);
    assert_eq!(report.tier_current_progress, 100);
    assert_eq!(report.tier_target_days, 30);
    assert_eq!(report.accountability_countdown, 26);
    assert_eq!(report.days_to_next_level, 0);
    assert_eq!(report.level_up_message, "You have reached Silver!");
    assert_eq!(report.accountability, 35);
    assert_eq!(report.activities_completed, 144);
    assert_eq!(report.completion_rate, 100);
}

#[test]
fn master_users_get_master_milestones() {
    let user = User::new("master@example.com")
        .with_tier(Tier::Silver)
        .with_level(AccountabilityLevel::Master);
    let mut history = History::new(user);
    history.pattern(&"S".repeat(40));

    let report = history.report();
    assert_eq!(report.current_streak, 40);
    assert_eq!(report.days_to_next_level, 20);
    assert_eq!(report.level_up_message, "20 more days to Master/Gold!");
    assert_eq!(report.accountability, 10);
    assert_eq!(report.accountability_target_days, 0);
    assert_eq!(report.accountability_current_progress, 100);
    assert_eq!(report.avg_activities_per_day, 11);
}
