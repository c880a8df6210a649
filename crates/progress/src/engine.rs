//! The progress engine - derives a `ProgressReport` from raw history.

use std::collections::HashSet;
use chrono::NaiveDate;
use tracing::debug;
use transcend_core::{ActivityQuota, DailyTracker, TrackerEntry, TrackerId, User};

use crate::config::ProgressConfig;
use crate::day::{DayLedger, DaySummary};
use crate::ladder::{
    accountability_countdown, countdown_message, level_for_streak, level_progress,
    tier_for_streak, tier_progress,
};
use crate::milestone::{accountability_score, next_milestone};
use crate::report::ProgressReport;
use crate::streak::{current_streak, exceeds_reset_misses};

/// Request-scoped inputs that are not part of the stored history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressContext {
    /// The day in progress; its tracker never counts toward the streak.
    pub today: NaiveDate,
}

impl ProgressContext {
    /// Context for an explicit date.
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Context for the current UTC date.
    pub fn now() -> Self {
        Self::new(chrono::Utc::now().date_naive())
    }
}

/// Computes progress reports. Stateless apart from its rule configuration.
#[derive(Debug, Clone, Default)]
pub struct ProgressEngine {
    config: ProgressConfig,
}

impl ProgressEngine {
    /// Engine with the default rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: ProgressConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &ProgressConfig {
        &self.config
    }

    /// Per-day breakdown of `trackers`, newest first.
    pub fn day_summaries(&self, trackers: &[DailyTracker], entries: &[TrackerEntry]) -> Vec<DaySummary> {
        let ledger = DayLedger::new(entries, self.config.success_threshold_percent);
        let mut days: Vec<DaySummary> = trackers.iter().map(|t| ledger.summary(t)).collect();
        days.sort_by(|a, b| b.date.cmp(&a.date));
        days
    }

    /// Derive the full progress report of `user`.
    ///
    /// `trackers` may be unsorted; `entries` are the entries of those trackers.
    /// Nothing is mutated and empty history yields a zeroed report.
    pub fn compute(
        &self,
        user: &User,
        trackers: &[DailyTracker],
        entries: &[TrackerEntry],
        ctx: &ProgressContext,
    ) -> ProgressReport {
        let ledger = DayLedger::new(entries, self.config.success_threshold_percent);

        let mut ascending: Vec<&DailyTracker> = trackers.iter().collect();
        ascending.sort_by(|a, b| a.date.cmp(&b.date));
        let descending: Vec<&DailyTracker> = ascending.iter().rev().copied().collect();
        let past: Vec<&DailyTracker> = descending
            .iter()
            .copied()
            .filter(|t| t.date < ctx.today)
            .collect();

        // Lifetime counts only include entries of trackers this user owns.
        let owned: HashSet<TrackerId> = trackers
            .iter()
            .filter(|t| t.user_id == user.id)
            .map(|t| t.id)
            .collect();
        let (activities_completed, total_activities_assigned) = entries
            .iter()
            .filter(|e| owned.contains(&e.tracker_id))
            .fold((0usize, 0usize), |(done, all), e| {
                (done + usize::from(e.is_completed()), all + 1)
            });
        let completion_rate = percent(activities_completed as f64, total_activities_assigned as f64);

        let streak = current_streak(&past, &ledger, &self.config);
        let countdown = accountability_countdown(streak);

        let weekly: Vec<f64> = descending
            .iter()
            .take(self.config.weekly_window_days)
            .map(|t| ledger.rate(t))
            .collect();
        let weekly_average = if weekly.is_empty() {
            0
        } else {
            (weekly.iter().sum::<f64>() / weekly.len() as f64 * 100.0).round() as u32
        };

        let tier = user.effective_tier();
        let level = user.effective_level();
        let tiers = tier_progress(&ascending, &ledger, tier);
        let levels = level_progress(&ascending, &ledger, level);

        let avg_activities_per_day = user
            .accountability_level
            .map(|l| l.quota().average())
            .unwrap_or(ActivityQuota::UNASSIGNED_AVERAGE);

        let milestone = next_milestone(tier, level, streak);
        // Unlike the streak, the reset window counts today's tracker.
        let reset = exceeds_reset_misses(&descending, &ledger, &self.config);
        let accountability = accountability_score(streak, milestone.floor, reset);

        let recommended_tier = tier_for_streak(streak);
        let recommended_accountability_level = level_for_streak(streak);

        debug!(
            user = %user.id,
            days = trackers.len(),
            streak,
            %recommended_tier,
            %recommended_accountability_level,
            reset,
            "Computed progress"
        );

        ProgressReport {
            activities_completed,
            total_activities_assigned,
            completion_rate,
            current_streak: streak,
            weekly_average,

            tier,
            recommended_tier,
            successful_days30: tiers.successful_days_30,
            successful_days60: tiers.successful_days_60,
            tier_progress30: tiers.progress_30.round() as u32,
            tier_progress60: tiers.progress_60.round() as u32,
            next_tier_target: tiers.next_target,
            tier_current_progress: tiers.current_progress.round() as u32,
            tier_target_days: tiers.target_days,

            accountability_level: level,
            recommended_accountability_level,
            successful_days90: levels.successful_days_90,
            accountability_progress90: levels.progress_90.round() as u32,
            next_accountability_target: levels.next_target,
            accountability_current_progress: levels.current_progress.round() as u32,
            accountability_target_days: levels.target_days,

            avg_activities_per_day,
            total_days: trackers.len(),

            accountability,
            days_to_next_level: milestone.days_to_next_level,
            level_up_message: milestone.message,
            accountability_countdown: countdown,
            accountability_message: countdown_message(countdown).to_string(),
        }
    }
}

/// Compute a user's progress with the default rules.
pub fn compute_user_progress(
    user: &User,
    trackers: &[DailyTracker],
    entries: &[TrackerEntry],
    ctx: &ProgressContext,
) -> ProgressReport {
    ProgressEngine::new().compute(user, trackers, entries, ctx)
}

fn percent(part: f64, whole: f64) -> u32 {
    if whole == 0.0 {
        0
    } else {
        (part / whole * 100.0).round() as u32
    }
}
