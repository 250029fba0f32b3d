//! Typed field updates

use serde::{Deserialize, Serialize};

use super::{
    validate_name, validate_progress, validate_unlock_level, Skill, SkillCategory,
};
use crate::error::{RegistryError, Result};

/// A single field change on a skill.
///
/// Parent links are not updatable here; moving a subtree goes through
/// `SkillRegistry::reparent` so back-references stay consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "camelCase")]
pub enum SkillUpdate {
    /// Change the name
    Rename(String),
    /// Replace (or clear) the description
    Describe(Option<String>),
    /// Move to another category
    Recategorize(SkillCategory),
    /// Overwrite progress, must stay in `[0, 100)`
    SetProgress(f64),
    /// Overwrite the current level, must stay in `1..=max_level`
    SetLevel(u32),
    /// Change the level cap, must stay `>= current_level`
    SetMaxLevel(u32),
    /// Change the parent level required to unlock
    SetUnlockLevel(u32),
}

impl SkillUpdate {
    /// Apply to `skill`, validating against its current state.
    ///
    /// On error `skill` is left unchanged.
    pub(crate) fn apply(self, skill: &mut Skill) -> Result<()> {
        match self {
            SkillUpdate::Rename(name) => {
                validate_name(&name)?;
                skill.name = name;
            }
            SkillUpdate::Describe(description) => skill.description = description,
            SkillUpdate::Recategorize(category) => skill.category = category,
            SkillUpdate::SetProgress(progress) => {
                validate_progress(progress)?;
                skill.progress = progress;
            }
            SkillUpdate::SetLevel(level) => {
                if level == 0 || level > skill.max_level {
                    return Err(RegistryError::InvalidLevel {
                        level,
                        max: skill.max_level,
                    });
                }
                skill.current_level = level;
            }
            SkillUpdate::SetMaxLevel(max) => {
                if max < skill.current_level {
                    return Err(RegistryError::InvalidLevelRange {
                        current: skill.current_level,
                        max,
                    });
                }
                skill.max_level = max;
            }
            SkillUpdate::SetUnlockLevel(level) => {
                validate_unlock_level(level)?;
                skill.unlock_level = level;
            }
        }
        Ok(())
    }

    /// Short name for logging.
    pub fn op_name(&self) -> &'static str {
        match self {
            SkillUpdate::Rename(_) => "rename",
            SkillUpdate::Describe(_) => "describe",
            SkillUpdate::Recategorize(_) => "recategorize",
            SkillUpdate::SetProgress(_) => "set_progress",
            SkillUpdate::SetLevel(_) => "set_level",
            SkillUpdate::SetMaxLevel(_) => "set_max_level",
            SkillUpdate::SetUnlockLevel(_) => "set_unlock_level",
        }
    }
}
