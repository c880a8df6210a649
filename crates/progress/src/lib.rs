//! Progress engine (gamification layer)
//!
//! Streaks, tier and accountability-level progression, weekly averages and
//! milestone messaging, all recomputed from a user's raw tracker history.

#![warn(missing_docs)]

pub mod config;
pub mod day;
pub mod engine;
pub mod ladder;
pub mod milestone;
pub mod report;
pub mod service;
pub mod streak;

pub use config::ProgressConfig;
pub use day::{DayLedger, DaySummary};
pub use engine::{compute_user_progress, ProgressContext, ProgressEngine};
pub use ladder::{LevelTarget, TierTarget};
pub use report::ProgressReport;
pub use service::{ProgressError, ProgressService, Promotion, UserStatsRow};
