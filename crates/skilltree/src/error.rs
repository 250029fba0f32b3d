//! Error types for skill registry operations

use thiserror::Error;

use crate::skill::SkillId;

/// Broad classification of a [`RegistryError`].
///
/// Lets callers decide how to surface a failure without matching on every
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input was rejected before any state changed.
    Validation,

    /// The targeted id does not resolve to a live skill.
    NotFound,

    /// The operation would break (or found broken) parent/child links.
    Integrity,

    /// Optimistic concurrency check failed.
    Conflict,
}

/// Main error type for registry operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// Skill or activity name is empty (or only whitespace)
    #[error("Validation error: name must not be empty")]
    EmptyName,

    /// Level bounds at creation are inconsistent
    #[error("Validation error: invalid level range {current}/{max} (need 1 <= current <= max)")]
    InvalidLevelRange {
        /// Requested current level
        current: u32,
        /// Requested maximum level
        max: u32,
    },

    /// A level update would leave the skill outside its bounds
    #[error("Validation error: level {level} is outside 1..={max}")]
    InvalidLevel {
        /// Requested level
        level: u32,
        /// The skill's maximum level
        max: u32,
    },

    /// Progress outside `[0, 100)` or not a finite number
    #[error("Validation error: progress {value} is outside [0, 100)")]
    InvalidProgress {
        /// Offending value
        value: f64,
    },

    /// Progress amounts must be strictly positive
    #[error("Validation error: progress amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// Offending amount
        amount: f64,
    },

    /// Unlock levels start at 1
    #[error("Validation error: unlock level must be at least 1, got {level}")]
    InvalidUnlockLevel {
        /// Offending level
        level: u32,
    },

    /// No skill with this id
    #[error("Skill not found: {id}")]
    NotFound {
        /// The id that did not resolve
        id: SkillId,
    },

    /// A new skill names a parent that does not exist
    #[error("Integrity violation: parent {parent} does not exist")]
    DanglingParent {
        /// The unresolved parent id
        parent: SkillId,
    },

    /// Linking `id` under `parent` would close a cycle
    #[error("Integrity violation: placing {id} under {parent} would create a cycle")]
    Cycle {
        /// The skill being linked
        id: SkillId,
        /// The would-be parent
        parent: SkillId,
    },

    /// Parent and child links disagree
    #[error("Integrity violation: {0}")]
    BrokenLink(String),

    /// The registry changed since the caller last observed it
    #[error("Conflict: expected revision {expected}, registry is at {actual}")]
    StaleRevision {
        /// Revision the caller based its change on
        expected: u64,
        /// Current revision
        actual: u64,
    },
}

impl RegistryError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::EmptyName
            | RegistryError::InvalidLevelRange { .. }
            | RegistryError::InvalidLevel { .. }
            | RegistryError::InvalidProgress { .. }
            | RegistryError::NonPositiveAmount { .. }
            | RegistryError::InvalidUnlockLevel { .. } => ErrorKind::Validation,
            RegistryError::NotFound { .. } => ErrorKind::NotFound,
            RegistryError::DanglingParent { .. }
            | RegistryError::Cycle { .. }
            | RegistryError::BrokenLink(_) => ErrorKind::Integrity,
            RegistryError::StaleRevision { .. } => ErrorKind::Conflict,
        }
    }
}

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
