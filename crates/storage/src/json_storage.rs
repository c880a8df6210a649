//! JSON file storage implementation.
//!
//! Stores one pretty-printed JSON file per record under `users/`, `trackers/`
//! and `entries/` in the storage root.

use std::path::{Path, PathBuf};
use chrono::NaiveDate;
use tokio::fs;
use tracing::debug;
use transcend_core::{DailyTracker, EntryId, TrackerEntry, TrackerId, User, UserId};
use super::{Storage, StorageError, Result};

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage, creating the record directories under `root` if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("users")).await?;
        fs::create_dir_all(root.join("trackers")).await?;
        fs::create_dir_all(root.join("entries")).await?;

        debug!("Opened JSON storage at {}", root.display());
        Ok(Self { root })
    }

    fn user_path(&self, id: UserId) -> PathBuf {
        self.root.join("users").join(format!("{}.json", id))
    }
    fn tracker_path(&self, id: TrackerId) -> PathBuf {
        self.root.join("trackers").join(format!("{}.json", id))
    }
    fn entry_path(&self, id: EntryId) -> PathBuf {
        self.root.join("entries").join(format!("{}.json", id))
    }

    async fn all_trackers(&self) -> Result<Vec<DailyTracker>> {
        list_dir(&self.root.join("trackers")).await
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn save_user(&mut self, user: &User) -> Result<()> {
        write_json(&self.user_path(user.id), user).await
    }

    async fn load_user(&self, id: UserId) -> Result<Option<User>> {
        read_json(&self.user_path(id)).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let mut users = list_dir(&self.root.join("users")).await?;
        users.sort_by(|a: &User, b| a.created_at.cmp(&b.created_at));
        Ok(users)
    }

    async fn save_tracker(&mut self, tracker: &DailyTracker) -> Result<()> {
        if let Some(existing) = self.find_tracker(tracker.user_id, tracker.date).await? {
            if existing.id != tracker.id {
                return Err(StorageError::Conflict(format!(
                    "user {} already has tracker {} for {}",
                    tracker.user_id, existing.id, tracker.date
                )));
            }
        }
        write_json(&self.tracker_path(tracker.id), tracker).await
    }

    async fn load_tracker(&self, id: TrackerId) -> Result<Option<DailyTracker>> {
        read_json(&self.tracker_path(id)).await
    }

    async fn list_trackers(&self, user_id: UserId) -> Result<Vec<DailyTracker>> {
        let mut trackers: Vec<DailyTracker> = self
            .all_trackers()
            .await?
            .into_iter()
            .filter(|t| t.user_id == user_id)
            .collect();
        trackers.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(trackers)
    }

    async fn find_tracker(&self, user_id: UserId, date: NaiveDate) -> Result<Option<DailyTracker>> {
        Ok(self
            .all_trackers()
            .await?
            .into_iter()
            .find(|t| t.user_id == user_id && t.date == date))
    }

    async fn save_entry(&mut self, entry: &TrackerEntry) -> Result<()> {
        if !fs::try_exists(self.tracker_path(entry.tracker_id)).await? {
            return Err(StorageError::NotFound(format!("tracker {}", entry.tracker_id)));
        }
        write_json(&self.entry_path(entry.id), entry).await
    }

    async fn load_entry(&self, id: EntryId) -> Result<Option<TrackerEntry>> {
        read_json(&self.entry_path(id)).await
    }

    async fn list_entries(&self, tracker_ids: &[TrackerId]) -> Result<Vec<TrackerEntry>> {
        let all = list_dir(&self.root.join("entries")).await?;
        Ok(all
            .into_iter()
            .filter(|e: &TrackerEntry| tracker_ids.contains(&e.tracker_id))
            .collect())
    }

    async fn delete_entry(&mut self, id: EntryId) -> Result<()> {
        fs::remove_file(self.entry_path(id)).await.or_else(|e| {
            if e.kind() == std::io::ErrorKind::NotFound { Ok(()) } else { Err(e) }
        })?;
        Ok(())
    }
}

async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json.as_bytes()).await?;
    Ok(())
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        match read_json(&entry.path()).await {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(e) => tracing::warn!("Skipping unreadable record {}: {}", entry.path().display(), e),
        }
    }
    Ok(items)
}
