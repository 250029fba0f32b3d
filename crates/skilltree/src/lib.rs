//! # Skilltree
//!
//! An in-memory state engine for hierarchical skills.
//!
//! Skills form a forest: each skill may have one parent and any number of
//! ordered children. Each carries a level (capped at a maximum) and progress
//! toward the next level; logged activities convert progress into levels.
//!
//! ## Architecture
//!
//! - **Skill**: entity types, drafts and typed field updates
//! - **Registry**: the single owner of all skills and the activity log,
//!   enforcing back-reference consistency and acyclicity
//! - **Shared**: a lock-guarded handle for use across threads
//! - **Config**: policies for level-up carry, the level cap and unresolved
//!   parents
//!
//! Nothing is persisted; a registry lives for one session.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod registry;
pub mod shared;
pub mod skill;

// Re-export main types
pub use config::{LevelUpPolicy, MaxLevelPolicy, ParentPolicy, RegistryConfig};
pub use error::{ErrorKind, RegistryError, Result};
pub use registry::SkillRegistry;
pub use shared::SharedRegistry;
pub use skill::{
    ActivityDraft, ActivityId, Skill, SkillActivity, SkillCategory, SkillDraft, SkillId,
    SkillUpdate, LEVEL_THRESHOLD,
};

/// Skilltree version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
