//! Skill entities and their creation inputs

mod activity;
mod update;

pub use activity::{ActivityDraft, ActivityId, SkillActivity};
pub use update::SkillUpdate;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

/// Progress value at which a skill levels up.
pub const LEVEL_THRESHOLD: f64 = 100.0;

/// Opaque skill identifier, assigned by the registry.
///
/// Ids are never reused within a registry, even after the skill is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(u64);

impl SkillId {
    /// Wrap a raw id value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skill-{}", self.0)
    }
}

/// Fixed set of skill categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SkillCategory {
    /// Programming, tools, engineering
    #[default]
    Technology,
    /// Sport and training
    Fitness,
    /// Health and wellbeing
    Health,
    /// Natural languages
    Languages,
    /// Music, drawing, crafts
    Arts,
    /// Work-related skills
    Professional,
    /// Everything else
    Personal,
}

impl SkillCategory {
    /// All categories, in display order.
    pub const ALL: [SkillCategory; 7] = [
        SkillCategory::Technology,
        SkillCategory::Fitness,
        SkillCategory::Health,
        SkillCategory::Languages,
        SkillCategory::Arts,
        SkillCategory::Professional,
        SkillCategory::Personal,
    ];

    /// Human-readable name.
    pub fn as_str(self) -> &'static str {
        match self {
            SkillCategory::Technology => "Technology",
            SkillCategory::Fitness => "Fitness",
            SkillCategory::Health => "Health",
            SkillCategory::Languages => "Languages",
            SkillCategory::Arts => "Arts",
            SkillCategory::Professional => "Professional",
            SkillCategory::Personal => "Personal",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node in the skill forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    /// Unique id, immutable
    pub id: SkillId,

    /// Display name, never empty
    pub name: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Category used for filtering
    pub category: SkillCategory,

    /// Current level, `1..=max_level`
    pub current_level: u32,

    /// Level cap
    pub max_level: u32,

    /// Advancement toward the next level, in `[0, 100)`
    pub progress: f64,

    /// Parent level required before this skill unlocks
    pub unlock_level: u32,

    /// Parent skill; `None` for roots
    pub parent_id: Option<SkillId>,

    /// Child ids in insertion order
    pub children: Vec<SkillId>,

    /// Creation timestamp, immutable
    pub created_at: DateTime<Utc>,
}

impl Skill {
    /// Whether this skill has no parent.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether the level cap has been reached.
    pub fn is_max_level(&self) -> bool {
        self.current_level >= self.max_level
    }
}

/// Input for creating a skill.
///
/// Defaults mirror a fresh entry form: `Technology`, level 1 of 10, no
/// progress, unlocked at parent level 1, no parent.
///
/// # Example
///
/// ```
/// use skilltree::{SkillCategory, SkillDraft};
///
/// let draft = SkillDraft::new("Guitar")
///     .with_category(SkillCategory::Arts)
///     .with_levels(1, 10)
///     .with_progress(90.0);
///
/// assert_eq!(draft.name, "Guitar");
/// assert_eq!(draft.parent_id, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillDraft {
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Category
    pub category: SkillCategory,
    /// Starting level
    pub current_level: u32,
    /// Level cap
    pub max_level: u32,
    /// Starting progress
    pub progress: f64,
    /// Parent level required to unlock
    pub unlock_level: u32,
    /// Optional parent
    pub parent_id: Option<SkillId>,
}

impl Default for SkillDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            category: SkillCategory::default(),
            current_level: 1,
            max_level: 10,
            progress: 0.0,
            unlock_level: 1,
            parent_id: None,
        }
    }
}

impl SkillDraft {
    /// Create a draft with the given name and default fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: SkillCategory) -> Self {
        self.category = category;
        self
    }

    /// Set starting and maximum level.
    pub fn with_levels(mut self, current: u32, max: u32) -> Self {
        self.current_level = current;
        self.max_level = max;
        self
    }

    /// Set starting progress.
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }

    /// Set the parent level required to unlock this skill.
    pub fn with_unlock_level(mut self, level: u32) -> Self {
        self.unlock_level = level;
        self
    }

    /// Place the new skill under `parent`.
    pub fn with_parent(mut self, parent: SkillId) -> Self {
        self.parent_id = Some(parent);
        self
    }

    /// Check field-local constraints.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_level_range(self.current_level, self.max_level)?;
        validate_progress(self.progress)?;
        validate_unlock_level(self.unlock_level)
    }
}

pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(RegistryError::EmptyName);
    }
    Ok(())
}

pub(crate) fn validate_level_range(current: u32, max: u32) -> Result<()> {
    if current == 0 || max < current {
        return Err(RegistryError::InvalidLevelRange { current, max });
    }
    Ok(())
}

pub(crate) fn validate_progress(value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..LEVEL_THRESHOLD).contains(&value) {
        return Err(RegistryError::InvalidProgress { value });
    }
    Ok(())
}

pub(crate) fn validate_unlock_level(level: u32) -> Result<()> {
    if level == 0 {
        return Err(RegistryError::InvalidUnlockLevel { level });
    }
    Ok(())
}
