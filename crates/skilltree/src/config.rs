//! Registry configuration

use serde::{Deserialize, Serialize};

/// What happens to progress after a level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelUpPolicy {
    /// Keep the excess over 100: 90 + 15 becomes level+1 at 5
    #[default]
    CarryRemainder,
    /// Drop the excess: 90 + 15 becomes level+1 at 0
    ResetToZero,
}

/// What happens to progress once a skill sits at its level cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxLevelPolicy {
    /// Level stays capped, progress keeps wrapping below 100
    #[default]
    Wrap,
    /// Progress is pinned at 0; further activity is only logged
    Freeze,
}

/// How `create` treats a `parent_id` that does not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentPolicy {
    /// Fail with `DanglingParent`
    #[default]
    Reject,
    /// Store the skill as an orphaned, non-root node
    AllowOrphan,
}

/// Policies controlling registry behavior.
///
/// Missing fields fall back to their defaults when deserializing.
///
/// # Example
///
/// ```
/// use skilltree::{LevelUpPolicy, RegistryConfig};
///
/// let config = RegistryConfig::from_json(r#"{"level_up": "reset_to_zero"}"#).unwrap();
/// assert_eq!(config.level_up, LevelUpPolicy::ResetToZero);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Progress handling on level-up
    pub level_up: LevelUpPolicy,

    /// Progress handling at the level cap
    pub max_level: MaxLevelPolicy,

    /// Handling of unresolved parents at creation
    pub parent_policy: ParentPolicy,
}

impl RegistryConfig {
    /// Create a config with default policies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Set the level-up policy.
    pub fn with_level_up(mut self, policy: LevelUpPolicy) -> Self {
        self.level_up = policy;
        self
    }

    /// Set the level-cap policy.
    pub fn with_max_level(mut self, policy: MaxLevelPolicy) -> Self {
        self.max_level = policy;
        self
    }

    /// Set the unresolved-parent policy.
    pub fn with_parent_policy(mut self, policy: ParentPolicy) -> Self {
        self.parent_policy = policy;
        self
    }
}
