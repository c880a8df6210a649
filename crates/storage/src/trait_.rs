//! Storage trait abstraction.

use async_trait::async_trait;
use chrono::NaiveDate;
use transcend_core::{DailyTracker, EntryId, TrackerEntry, TrackerId, User, UserId};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness constraint violated
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Storage abstraction for TranscendBody data.
///
/// The progress engine never talks to storage directly; callers load a user's
/// history through this trait and hand it over.
#[async_trait]
pub trait Storage: Send + Sync {
    // === User operations ===

    /// Save a user (create or update).
    async fn save_user(&mut self, user: &User) -> Result<()>;

    /// Load a user by ID.
    async fn load_user(&self, id: UserId) -> Result<Option<User>>;

    /// List all users.
    async fn list_users(&self) -> Result<Vec<User>>;

    // === Tracker operations ===

    /// Save a tracker. Fails with `Conflict` if another tracker already holds
    /// the same (user, date).
    async fn save_tracker(&mut self, tracker: &DailyTracker) -> Result<()>;

    /// Load a tracker by ID.
    async fn load_tracker(&self, id: TrackerId) -> Result<Option<DailyTracker>>;

    /// All trackers of a user, most recent date first.
    async fn list_trackers(&self, user_id: UserId) -> Result<Vec<DailyTracker>>;

    /// The tracker of a user for a given date, if any.
    async fn find_tracker(&self, user_id: UserId, date: NaiveDate) -> Result<Option<DailyTracker>>;

    // === Entry operations ===

    /// Save an entry (create or update).
    async fn save_entry(&mut self, entry: &TrackerEntry) -> Result<()>;

    /// Load an entry by ID.
    async fn load_entry(&self, id: EntryId) -> Result<Option<TrackerEntry>>;

    /// All entries belonging to any of the given trackers.
    async fn list_entries(&self, tracker_ids: &[TrackerId]) -> Result<Vec<TrackerEntry>>;

    /// Delete an entry. Missing entries are not an error.
    async fn delete_entry(&mut self, id: EntryId) -> Result<()>;
}
