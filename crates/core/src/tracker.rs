//! Daily trackers and their activity entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::enums::string_enum;
use crate::id::{ActivityId, EntryId, TrackerId, UserId};
use crate::Time;

string_enum! {
    /// Completion status of a tracker entry.
    pub enum EntryStatus (fallback = Pending) {
        /// Assigned, not yet done
        Pending => "pending",
        /// Done
        Completed => "completed",
        /// Deliberately passed over; still counts as assigned
        Skipped => "skipped",
    }
}

string_enum! {
    /// Part of the day an activity is scheduled in.
    pub enum TimeSlot (fallback = Morning) {
        /// Morning slot
        Morning => "morning",
        /// Afternoon slot
        Afternoon => "afternoon",
        /// Evening slot
        Evening => "evening",
        /// Night slot
        Night => "night",
    }
}

string_enum! {
    /// Activity category.
    pub enum Category (fallback = Workout) {
        /// Training sessions
        Workout => "workout",
        /// Meals and hydration
        Nutrition => "nutrition",
        /// Sleep, stretching, rest
        Recovery => "recovery",
        /// Journaling, meditation
        Mindset => "mindset",
    }
}

/// One record per user per calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTracker {
    /// Unique identifier
    pub id: TrackerId,

    /// Owner
    pub user_id: UserId,

    /// Calendar date
    pub date: NaiveDate,

    /// Cached completion rate (0-100). Recomputed from entries when it matters.
    #[serde(default)]
    pub completion_rate: u8,

    /// When created
    pub created_at: Time,
}

impl DailyTracker {
    /// Create an empty tracker for a date.
    pub fn new(user_id: UserId, date: NaiveDate) -> Self {
        Self {
            id: TrackerId::new(),
            user_id,
            date,
            completion_rate: 0,
            created_at: chrono::Utc::now(),
        }
    }

    /// Completion rate (0-100, rounded) of this tracker's entries in `entries`.
    ///
    /// Entries belonging to other trackers are ignored. No entries yields 0.
    pub fn completion_rate_from(&self, entries: &[TrackerEntry]) -> u8 {
        let (completed, total) = entries
            .iter()
            .filter(|e| e.tracker_id == self.id)
            .fold((0usize, 0usize), |(done, all), e| {
                (done + usize::from(e.is_completed()), all + 1)
            });
        if total == 0 {
            return 0;
        }
        ((completed as f64 / total as f64) * 100.0).round() as u8
    }
}

/// One activity assigned to a time slot within a tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerEntry {
    /// Unique identifier
    pub id: EntryId,

    /// Owning tracker
    pub tracker_id: TrackerId,

    /// Assigned activity
    pub activity_id: ActivityId,

    /// Scheduled slot
    pub time_slot: TimeSlot,

    /// Current status
    #[serde(default)]
    pub status: EntryStatus,

    /// When created
    pub created_at: Time,

    /// Last status change
    pub updated_at: Time,
}

impl TrackerEntry {
    /// Assign an activity to a slot; starts as pending.
    pub fn new(tracker_id: TrackerId, activity_id: ActivityId, time_slot: TimeSlot) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: EntryId::new(),
            tracker_id,
            activity_id,
            time_slot,
            status: EntryStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the status, stamping `updated_at`.
    pub fn set_status(&mut self, status: EntryStatus) {
        self.status = status;
        self.updated_at = chrono::Utc::now();
    }

    /// Whether this entry counts as done.
    pub fn is_completed(&self) -> bool {
        self.status == EntryStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tracker: &DailyTracker, status: EntryStatus) -> TrackerEntry {
        let mut e = TrackerEntry::new(tracker.id, ActivityId::new(), TimeSlot::Morning);
        e.set_status(status);
        e
    }

    #[test]
    fn test_completion_rate_from_entries() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let tracker = DailyTracker::new(UserId::new(), date);
        let other = DailyTracker::new(UserId::new(), date);
        let entries = vec![
            entry(&tracker, EntryStatus::Completed),
            entry(&tracker, EntryStatus::Completed),
            entry(&tracker, EntryStatus::Skipped),
            entry(&other, EntryStatus::Completed),
        ];
        assert_eq!(tracker.completion_rate_from(&entries), 67);
        assert_eq!(other.completion_rate_from(&entries), 100);
    }

    #[test]
    fn test_completion_rate_without_entries_is_zero() {
        let tracker = DailyTracker::new(UserId::new(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(tracker.completion_rate_from(&[]), 0);
    }

    #[test]
    fn test_tracker_json_shape() {
        let tracker = DailyTracker::new(UserId::new(), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        let json = serde_json::to_value(&tracker).unwrap();
        assert_eq!(json["date"], "2024-03-09");
        assert_eq!(json["completionRate"], 0);
        assert!(json.get("userId").is_some());
    }

    #[test]
    fn test_unknown_status_reads_as_pending() {
        let tracker = DailyTracker::new(UserId::new(), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        let mut json = serde_json::to_value(entry(&tracker, EntryStatus::Completed)).unwrap();
        json["status"] = serde_json::json!("archived");
        let parsed: TrackerEntry = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.status, EntryStatus::Pending);
        assert!(!parsed.is_completed());
    }
}
