//! Activity log records

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{validate_name, SkillId};
use crate::error::{RegistryError, Result};

/// Opaque activity identifier, assigned by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(u64);

impl ActivityId {
    /// Wrap a raw id value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "activity-{}", self.0)
    }
}

/// One progress-contributing event.
///
/// Records are immutable once logged and outlive the skill they reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillActivity {
    /// Unique id
    pub id: ActivityId,
    /// The skill the progress was applied to
    pub skill_id: SkillId,
    /// Short label, e.g. "Practiced scales"
    pub name: String,
    /// Optional details
    pub description: Option<String>,
    /// Progress points contributed, always > 0
    pub progress_value: f64,
    /// When the activity was logged
    pub date: DateTime<Utc>,
}

/// Input for logging an activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDraft {
    /// Short label
    pub name: String,
    /// Optional details
    #[serde(default)]
    pub description: Option<String>,
    /// Progress points to apply
    pub progress_value: f64,
}

impl ActivityDraft {
    /// Create a draft with a name and amount.
    pub fn new(name: impl Into<String>, progress_value: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            progress_value,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check the name and amount.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        if !self.progress_value.is_finite() || self.progress_value <= 0.0 {
            return Err(RegistryError::NonPositiveAmount {
                amount: self.progress_value,
            });
        }
        Ok(())
    }

    pub(crate) fn into_activity(
        self,
        id: ActivityId,
        skill_id: SkillId,
        date: DateTime<Utc>,
    ) -> SkillActivity {
        SkillActivity {
            id,
            skill_id,
            name: self.name,
            description: self.description,
            progress_value: self.progress_value,
            date,
        }
    }
}
