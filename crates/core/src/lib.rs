//! TranscendBody core data models.
//!
//! Typed records for users, daily trackers and tracker entries, plus the
//! progression vocabularies (tier, accountability level) they carry.

#![warn(missing_docs)]

mod enums;

mod id;
mod level;
mod tracker;
mod user;

pub use enums::ParseEnumError;
pub use id::{ActivityId, EntryId, TrackerId, UserId};
pub use level::{AccountabilityLevel, ActivityQuota, Role, Tier};
pub use tracker::{Category, DailyTracker, EntryStatus, TimeSlot, TrackerEntry};
pub use user::User;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
