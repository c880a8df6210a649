//! Per-day completion bookkeeping.

use std::collections::HashMap;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use transcend_core::{DailyTracker, TrackerEntry, TrackerId};

/// Completion breakdown of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    /// Tracker date
    pub date: NaiveDate,
    /// Completed entries
    pub completed: usize,
    /// All entries, any status
    pub total: usize,
    /// Rounded completion percentage (0-100)
    pub rate: u8,
    /// Whether the day met the success threshold
    pub successful: bool,
}

/// Completed/total entry counts per tracker, built once per computation.
#[derive(Debug, Clone)]
pub struct DayLedger {
    counts: HashMap<TrackerId, (usize, usize)>,
    threshold_percent: u32,
}

impl DayLedger {
    /// Tally `entries` by tracker.
    pub fn new(entries: &[TrackerEntry], threshold_percent: u32) -> Self {
        let mut counts: HashMap<TrackerId, (usize, usize)> = HashMap::new();
        for entry in entries {
            let slot = counts.entry(entry.tracker_id).or_default();
            if entry.is_completed() {
                slot.0 += 1;
            }
            slot.1 += 1;
        }
        Self { counts, threshold_percent }
    }

    /// Completed and total entry counts of a tracker.
    pub fn counts(&self, tracker: &DailyTracker) -> (usize, usize) {
        self.counts.get(&tracker.id).copied().unwrap_or((0, 0))
    }

    /// Completion rate as a fraction in `0.0..=1.0`. A day without entries is 0.
    pub fn rate(&self, tracker: &DailyTracker) -> f64 {
        match self.counts(tracker) {
            (_, 0) => 0.0,
            (done, total) => done as f64 / total as f64,
        }
    }

    /// Whether the day's completion meets the threshold.
    pub fn is_successful(&self, tracker: &DailyTracker) -> bool {
        let (done, total) = self.counts(tracker);
        // Integer comparison keeps 4/5 exactly at 80%.
        total > 0 && done as u64 * 100 >= self.threshold_percent as u64 * total as u64
    }

    /// Breakdown of one day.
    pub fn summary(&self, tracker: &DailyTracker) -> DaySummary {
        let (completed, total) = self.counts(tracker);
        DaySummary {
            date: tracker.date,
            completed,
            total,
            rate: (self.rate(tracker) * 100.0).round() as u8,
            successful: self.is_successful(tracker),
        }
    }

    /// Number of successful days among `trackers`.
    pub fn count_successful<'a>(&self, trackers: impl IntoIterator<Item = &'a DailyTracker>) -> usize {
        trackers.into_iter().filter(|t| self.is_successful(t)).count()
    }
}
