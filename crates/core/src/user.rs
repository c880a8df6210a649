//! User profile with progression attributes.

use serde::{Deserialize, Serialize};
use crate::id::UserId;
use crate::level::{AccountabilityLevel, Role, Tier};
use crate::Time;

/// A registered member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier
    pub id: UserId,

    /// Login email
    pub email: String,

    /// Given name
    #[serde(default)]
    pub first_name: Option<String>,

    /// Family name
    #[serde(default)]
    pub last_name: Option<String>,

    /// Name to greet the user with
    #[serde(default)]
    pub preferred_name: Option<String>,

    /// Account role
    #[serde(default)]
    pub role: Role,

    /// Stored tier, unset for legacy rows
    #[serde(default)]
    pub tier: Option<Tier>,

    /// Stored accountability level, unset for legacy rows
    #[serde(default)]
    pub accountability_level: Option<AccountabilityLevel>,

    /// When created
    pub created_at: Time,

    /// Last updated
    pub updated_at: Time,
}

impl User {
    /// Register a user at bronze / beginner.
    pub fn new(email: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: UserId::new(),
            email: email.into(),
            first_name: None,
            last_name: None,
            preferred_name: None,
            role: Role::User,
            tier: Some(Tier::Bronze),
            accountability_level: Some(AccountabilityLevel::Beginner),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the tier.
    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = Some(tier);
        self
    }

    /// Set the accountability level.
    pub fn with_level(mut self, level: AccountabilityLevel) -> Self {
        self.accountability_level = Some(level);
        self
    }

    /// Tier used for threshold lookups; bronze when unset.
    pub fn effective_tier(&self) -> Tier {
        self.tier.unwrap_or_default()
    }

    /// Accountability level used for threshold lookups; beginner when unset.
    pub fn effective_level(&self) -> AccountabilityLevel {
        self.accountability_level.unwrap_or_default()
    }

    /// Whether the user may manage catalog and accounts.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new("a@example.com");
        assert_eq!(user.effective_tier(), Tier::Bronze);
        assert_eq!(user.effective_level(), AccountabilityLevel::Beginner);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_legacy_row_without_progression_fields() {
        let json = serde_json::json!({
            "id": UserId::new().to_string(),
            "email": "legacy@example.com",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
        });
        let user: User = serde_json::from_value(json).unwrap();
        assert_eq!(user.tier, None);
        assert_eq!(user.effective_tier(), Tier::Bronze);
        assert_eq!(user.effective_level(), AccountabilityLevel::Beginner);
        assert_eq!(user.role, Role::User);
    }
}
