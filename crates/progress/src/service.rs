//! Storage-backed progress service.
//!
//! Loads a user's history through [`Storage`], runs the engine and writes back
//! the few things callers are responsible for: recommended tier/level and the
//! cached per-day completion rate.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;
use transcend_core::{
    AccountabilityLevel, ActivityId, DailyTracker, EntryId, EntryStatus, Role, Tier, TimeSlot,
    TrackerEntry, TrackerId, User, UserId,
};
use transcend_storage::{Storage, StorageError};

use crate::config::ProgressConfig;
use crate::engine::{ProgressContext, ProgressEngine};
use crate::report::ProgressReport;

/// Errors from the progress service.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// Storage backend failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// No such user
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// No such tracker
    #[error("Tracker not found: {0}")]
    TrackerNotFound(TrackerId),

    /// No such entry
    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),

    /// Request rejected before touching storage
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for the progress service.
pub type Result<T> = std::result::Result<T, ProgressError>;

/// One row of the admin user overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsRow {
    /// User ID
    pub id: UserId,
    /// Login email
    pub email: String,
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// Name to greet the user with
    pub preferred_name: Option<String>,
    /// Stored tier
    pub tier: Option<Tier>,
    /// Stored accountability level
    pub accountability_level: Option<AccountabilityLevel>,
    /// Account role
    pub role: Role,
    /// Completed entries across the user's trackers
    pub activities_completed: usize,
    /// Consecutive successful days before today
    pub current_streak: u32,
}

/// Outcome of applying recommendations to a stored user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    /// Promoted user
    pub user_id: UserId,
    /// Tier before
    pub previous_tier: Tier,
    /// Tier after
    pub tier: Tier,
    /// Level before
    pub previous_level: AccountabilityLevel,
    /// Level after
    pub level: AccountabilityLevel,
}

impl Promotion {
    /// Whether anything was written.
    pub fn changed(&self) -> bool {
        self.previous_tier != self.tier || self.previous_level != self.level
    }
}

/// Progress service over a storage backend.
pub struct ProgressService<S: Storage> {
    storage: S,
    engine: ProgressEngine,
}

impl<S: Storage> ProgressService<S> {
    /// Create a service with the default rules.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            engine: ProgressEngine::new(),
        }
    }

    /// Set the engine configuration.
    pub fn with_config(mut self, config: ProgressConfig) -> Self {
        self.engine = self.engine.with_config(config);
        self
    }

    /// Underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Underlying storage, mutably.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Load a user with all trackers and entries.
    pub async fn load_history(&self, user_id: UserId) -> Result<(User, Vec<DailyTracker>, Vec<TrackerEntry>)> {
        let user = self
            .storage
            .load_user(user_id)
            .await?
            .ok_or(ProgressError::UserNotFound(user_id))?;
        let trackers = self.storage.list_trackers(user_id).await?;
        let ids: Vec<TrackerId> = trackers.iter().map(|t| t.id).collect();
        let entries = if ids.is_empty() {
            Vec::new()
        } else {
            self.storage.list_entries(&ids).await?
        };
        Ok((user, trackers, entries))
    }

    /// Progress report of one user.
    pub async fn user_progress(&self, user_id: UserId, ctx: &ProgressContext) -> Result<ProgressReport> {
        let (user, trackers, entries) = self.load_history(user_id).await?;
        Ok(self.engine.compute(&user, &trackers, &entries, ctx))
    }

    /// Overview of every user for the admin console.
    pub async fn all_user_stats(&self, ctx: &ProgressContext) -> Result<Vec<UserStatsRow>> {
        let users = self.storage.list_users().await?;
        let mut rows = Vec::with_capacity(users.len());
        for user in users {
            let (user, trackers, entries) = self.load_history(user.id).await?;
            let report = self.engine.compute(&user, &trackers, &entries, ctx);
            rows.push(UserStatsRow {
                id: user.id,
                email: user.email,
                first_name: user.first_name,
                last_name: user.last_name,
                preferred_name: user.preferred_name,
                tier: user.tier,
                accountability_level: user.accountability_level,
                role: user.role,
                activities_completed: report.activities_completed,
                current_streak: report.current_streak,
            });
        }
        Ok(rows)
    }

    /// Raise the stored tier and level to what the current streak qualifies for.
    ///
    /// Stored values are never lowered.
    pub async fn apply_recommendations(&mut self, user_id: UserId, ctx: &ProgressContext) -> Result<Promotion> {
        let (mut user, trackers, entries) = self.load_history(user_id).await?;
        let report = self.engine.compute(&user, &trackers, &entries, ctx);

        let promotion = Promotion {
            user_id,
            previous_tier: report.tier,
            tier: report.tier.max(report.recommended_tier),
            previous_level: report.accountability_level,
            level: report.accountability_level.max(report.recommended_accountability_level),
        };

        if promotion.changed() {
            user.tier = Some(promotion.tier);
            user.accountability_level = Some(promotion.level);
            user.updated_at = chrono::Utc::now();
            self.storage.save_user(&user).await?;
            info!(
                "Promoted {} to {}/{} (streak {})",
                user.email, promotion.tier, promotion.level, report.current_streak
            );
        }

        Ok(promotion)
    }

    /// Change an entry's status and refresh its tracker's cached completion rate.
    pub async fn set_entry_status(&mut self, entry_id: EntryId, status: EntryStatus) -> Result<DailyTracker> {
        let mut entry = self
            .storage
            .load_entry(entry_id)
            .await?
            .ok_or(ProgressError::EntryNotFound(entry_id))?;
        entry.set_status(status);
        self.storage.save_entry(&entry).await?;
        self.refresh_completion(entry.tracker_id).await
    }

    /// Delete an entry and refresh its tracker's cached completion rate.
    pub async fn delete_entry(&mut self, entry_id: EntryId) -> Result<DailyTracker> {
        let entry = self
            .storage
            .load_entry(entry_id)
            .await?
            .ok_or(ProgressError::EntryNotFound(entry_id))?;
        self.storage.delete_entry(entry_id).await?;
        info!("Deleted entry {} from tracker {}", entry_id, entry.tracker_id);
        self.refresh_completion(entry.tracker_id).await
    }

    /// Recompute and store the cached completion rate of a tracker.
    pub async fn refresh_completion(&mut self, tracker_id: TrackerId) -> Result<DailyTracker> {
        let mut tracker = self
            .storage
            .load_tracker(tracker_id)
            .await?
            .ok_or(ProgressError::TrackerNotFound(tracker_id))?;
        let entries = self.storage.list_entries(&[tracker_id]).await?;
        tracker.completion_rate = tracker.completion_rate_from(&entries);
        self.storage.save_tracker(&tracker).await?;
        Ok(tracker)
    }

    /// Record a day of activity: `total` assignments of which `completed` are done.
    ///
    /// The tracker for `date` is created on first use; entries are appended to it.
    pub async fn record_day(
        &mut self,
        user_id: UserId,
        date: NaiveDate,
        completed: usize,
        total: usize,
    ) -> Result<DailyTracker> {
        if completed > total {
            return Err(ProgressError::InvalidInput(format!(
                "completed ({}) exceeds total ({})",
                completed, total
            )));
        }
        if self.storage.load_user(user_id).await?.is_none() {
            return Err(ProgressError::UserNotFound(user_id));
        }

        let tracker = match self.storage.find_tracker(user_id, date).await? {
            Some(existing) => existing,
            None => {
                let tracker = DailyTracker::new(user_id, date);
                self.storage.save_tracker(&tracker).await?;
                tracker
            }
        };

        for i in 0..total {
            let slot = TimeSlot::ALL[i % TimeSlot::ALL.len()];
            let mut entry = TrackerEntry::new(tracker.id, ActivityId::new(), slot);
            if i < completed {
                entry.set_status(EntryStatus::Completed);
            }
            self.storage.save_entry(&entry).await?;
        }

        self.refresh_completion(tracker.id).await
    }
}
