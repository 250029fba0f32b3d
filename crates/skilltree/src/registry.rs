//! The skill registry: canonical owner of the skill forest and activity log

mod progress;
mod traverse;

use std::collections::HashSet;

use chrono::Utc;
use indexmap::IndexMap;
use tracing::{debug, info, trace};

use crate::config::{MaxLevelPolicy, ParentPolicy, RegistryConfig};
use crate::error::{RegistryError, Result};
use crate::skill::{
    validate_level_range, validate_progress, validate_unlock_level, ActivityDraft, ActivityId,
    Skill, SkillActivity, SkillCategory, SkillDraft, SkillId, SkillUpdate,
};

/// The skill registry.
///
/// Skills live in an id-indexed map that preserves insertion order; tree
/// structure is expressed only through `parent_id` and `children` ids.
/// Every mutation keeps both directions of those links in agreement.
///
/// Operations on an unknown id fail with [`RegistryError::NotFound`].
///
/// # Example
///
/// ```
/// use skilltree::{ActivityDraft, SkillDraft, SkillRegistry};
///
/// let mut registry = SkillRegistry::new();
///
/// let music = registry.create(SkillDraft::new("Music")).unwrap();
/// let guitar = registry
///     .create(SkillDraft::new("Guitar").with_parent(music.id).with_progress(90.0))
///     .unwrap();
///
/// let guitar = registry
///     .apply_progress(guitar.id, ActivityDraft::new("Scales", 15.0))
///     .unwrap();
/// assert_eq!(guitar.current_level, 2);
/// assert_eq!(guitar.progress, 5.0);
///
/// registry.delete(music.id).unwrap();
/// assert!(registry.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct SkillRegistry {
    /// All skills in insertion order
    skills: IndexMap<SkillId, Skill>,

    /// Activity log, oldest first
    activities: Vec<SkillActivity>,

    config: RegistryConfig,

    next_skill_id: u64,
    next_activity_id: u64,

    /// Bumped on every successful mutation
    revision: u64,
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillRegistry {
    /// Create an empty registry with default policies.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with the given policies.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            skills: IndexMap::new(),
            activities: Vec::new(),
            config,
            next_skill_id: 1,
            next_activity_id: 1,
            revision: 0,
        }
    }

    /// The active policies.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Revision counter, incremented by every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ═══════════════════════════════════════════════════════════════════
    // Creation
    // ═══════════════════════════════════════════════════════════════════

    /// Create a skill from a draft.
    ///
    /// If the draft names a parent, the new id is appended to that parent's
    /// `children`.
    ///
    /// # Errors
    ///
    /// - Validation errors for an empty name, bad level range, progress
    ///   outside `[0, 100)` or a zero unlock level
    /// - `DanglingParent` if the parent does not exist and the config's
    ///   parent policy is `Reject`
    pub fn create(&mut self, draft: SkillDraft) -> Result<Skill> {
        draft.validate()?;

        if let Some(parent) = draft.parent_id {
            if !self.skills.contains_key(&parent) {
                match self.config.parent_policy {
                    ParentPolicy::Reject => return Err(RegistryError::DanglingParent { parent }),
                    ParentPolicy::AllowOrphan => {
                        debug!(%parent, name = %draft.name, "creating orphaned skill");
                    }
                }
            }
        }

        let id = SkillId::new(self.next_skill_id);
        self.next_skill_id += 1;

        let mut skill = Skill {
            id,
            name: draft.name,
            description: draft.description,
            category: draft.category,
            current_level: draft.current_level,
            max_level: draft.max_level,
            progress: draft.progress,
            unlock_level: draft.unlock_level,
            parent_id: draft.parent_id,
            children: Vec::new(),
            created_at: Utc::now(),
        };
        self.pin_progress_at_cap(&mut skill);

        if let Some(parent) = skill.parent_id.and_then(|p| self.skills.get_mut(&p)) {
            parent.children.push(id);
        }
        self.skills.insert(id, skill.clone());
        self.bump();

        debug!(%id, name = %skill.name, parent = ?skill.parent_id, "created skill");
        Ok(skill)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Mutation
    // ═══════════════════════════════════════════════════════════════════

    /// Apply a batch of field updates atomically.
    ///
    /// Updates run in order, each validated against the state left by the
    /// previous one. If any fails, the skill is left exactly as it was.
    /// An empty batch changes nothing and does not bump the revision.
    pub fn update(
        &mut self,
        id: SkillId,
        updates: impl IntoIterator<Item = SkillUpdate>,
    ) -> Result<Skill> {
        let current = self.skills.get(&id).ok_or(RegistryError::NotFound { id })?;

        let mut staged = current.clone();
        let mut applied = 0usize;
        for update in updates {
            let op = update.op_name();
            update.apply(&mut staged).inspect_err(|err| {
                debug!(%id, op, %err, "rejected skill update");
            })?;
            applied += 1;
        }
        if applied == 0 {
            return Ok(staged);
        }
        self.pin_progress_at_cap(&mut staged);

        self.skills.insert(id, staged.clone());
        self.bump();

        debug!(%id, "updated skill");
        Ok(staged)
    }

    /// Log an activity against a skill and convert its progress into levels.
    ///
    /// Level and progress are written together and the activity is appended
    /// in the same call, so no caller can observe one without the other.
    /// Every full 100 points advances one level up to `max_level`; what is
    /// left over is governed by the config's level-up and level-cap policies.
    pub fn apply_progress(&mut self, id: SkillId, draft: ActivityDraft) -> Result<Skill> {
        draft.validate()?;
        let config = self.config;
        let amount = draft.progress_value;

        let skill = self
            .skills
            .get_mut(&id)
            .ok_or(RegistryError::NotFound { id })?;
        let old_level = skill.current_level;
        let next = progress::advance(
            skill.current_level,
            skill.max_level,
            skill.progress,
            amount,
            &config,
        );
        skill.current_level = next.level;
        skill.progress = next.progress;
        let updated = skill.clone();

        let activity = self.log_activity(id, draft);
        self.bump();

        debug!(
            %id,
            activity = %activity.id,
            amount,
            level = updated.current_level,
            progress = updated.progress,
            "applied progress"
        );
        if updated.current_level > old_level {
            let unlocked = self.children_unlocked_between(&updated, old_level);
            info!(
                %id,
                from = old_level,
                to = updated.current_level,
                unlocked = unlocked.len(),
                "skill leveled up"
            );
        }

        Ok(updated)
    }

    /// Append an activity without touching the skill's progress.
    pub fn record_activity(&mut self, skill_id: SkillId, draft: ActivityDraft) -> Result<SkillActivity> {
        draft.validate()?;
        if !self.skills.contains_key(&skill_id) {
            return Err(RegistryError::NotFound { id: skill_id });
        }

        let activity = self.log_activity(skill_id, draft);
        self.bump();

        debug!(skill = %skill_id, activity = %activity.id, "recorded activity");
        Ok(activity)
    }

    /// Move `id` (with its subtree) under `new_parent`, or make it a root.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `id` or `new_parent` does not exist
    /// - `Cycle` if `new_parent` is `id` or one of its descendants
    pub fn reparent(&mut self, id: SkillId, new_parent: Option<SkillId>) -> Result<()> {
        let old_parent = self
            .skills
            .get(&id)
            .ok_or(RegistryError::NotFound { id })?
            .parent_id;

        if let Some(parent) = new_parent {
            if !self.skills.contains_key(&parent) {
                return Err(RegistryError::NotFound { id: parent });
            }
            if traverse::subtree_preorder(&self.skills, id).contains(&parent) {
                return Err(RegistryError::Cycle { id, parent });
            }
        }

        if old_parent == new_parent {
            return Ok(());
        }

        if let Some(old) = old_parent.and_then(|p| self.skills.get_mut(&p)) {
            old.children.retain(|child| *child != id);
        }
        if let Some(new) = new_parent.and_then(|p| self.skills.get_mut(&p)) {
            new.children.push(id);
        }
        if let Some(skill) = self.skills.get_mut(&id) {
            skill.parent_id = new_parent;
        }
        self.bump();

        debug!(%id, from = ?old_parent, to = ?new_parent, "reparented skill");
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Deletion
    // ═══════════════════════════════════════════════════════════════════

    /// Delete a skill and all of its descendants.
    ///
    /// The full subtree is collected before anything is removed; stale child
    /// references are skipped. Returns the removed skills in preorder.
    /// Activities referencing removed skills stay in the log.
    pub fn delete(&mut self, id: SkillId) -> Result<Vec<Skill>> {
        let parent = self
            .skills
            .get(&id)
            .ok_or(RegistryError::NotFound { id })?
            .parent_id;

        let doomed = traverse::subtree_preorder(&self.skills, id);
        let removed: Vec<Skill> = doomed
            .iter()
            .filter_map(|d| self.skills.get(d).cloned())
            .collect();

        let doomed: HashSet<SkillId> = doomed.into_iter().collect();
        self.skills.retain(|sid, _| !doomed.contains(sid));

        if let Some(parent) = parent.and_then(|p| self.skills.get_mut(&p)) {
            parent.children.retain(|child| *child != id);
        }
        self.bump();

        debug!(%id, removed = removed.len(), "deleted skill subtree");
        Ok(removed)
    }

    /// Drop every skill and activity (end of session).
    ///
    /// Id counters are kept, so ids handed out earlier are never reused.
    pub fn clear(&mut self) {
        self.skills.clear();
        self.activities.clear();
        self.bump();
        debug!("cleared registry");
    }

    // ═══════════════════════════════════════════════════════════════════
    // Queries
    // ═══════════════════════════════════════════════════════════════════

    /// Look up a skill by id.
    pub fn get(&self, id: SkillId) -> Option<&Skill> {
        self.skills.get(&id)
    }

    /// Whether a skill with this id exists.
    pub fn contains(&self, id: SkillId) -> bool {
        self.skills.contains_key(&id)
    }

    /// Skills without a parent, in insertion order.
    pub fn root_skills(&self) -> Vec<&Skill> {
        self.skills.values().filter(|s| s.is_root()).collect()
    }

    /// Root skills of one category, in insertion order.
    pub fn root_skills_in(&self, category: SkillCategory) -> Vec<&Skill> {
        self.skills
            .values()
            .filter(|s| s.is_root() && s.category == category)
            .collect()
    }

    /// Skills whose `parent_id` does not resolve.
    pub fn orphans(&self) -> Vec<&Skill> {
        self.skills
            .values()
            .filter(|s| s.parent_id.is_some_and(|p| !self.skills.contains_key(&p)))
            .collect()
    }

    /// Direct children of `id`, in child order.
    pub fn children(&self, id: SkillId) -> Result<Vec<&Skill>> {
        let skill = self.skills.get(&id).ok_or(RegistryError::NotFound { id })?;
        Ok(skill
            .children
            .iter()
            .filter_map(|child| self.skills.get(child))
            .collect())
    }

    /// All descendants of `id` in preorder, excluding `id` itself.
    pub fn descendants(&self, id: SkillId) -> Result<Vec<SkillId>> {
        if !self.skills.contains_key(&id) {
            return Err(RegistryError::NotFound { id });
        }
        let mut order = traverse::subtree_preorder(&self.skills, id);
        order.remove(0);
        Ok(order)
    }

    /// Parent chain of `id`, nearest parent first.
    pub fn ancestors(&self, id: SkillId) -> Result<Vec<SkillId>> {
        if !self.skills.contains_key(&id) {
            return Err(RegistryError::NotFound { id });
        }
        Ok(traverse::ancestor_chain(&self.skills, id))
    }

    /// Whether `id` is unlocked.
    ///
    /// Roots are always unlocked; a child unlocks once its parent is
    /// unlocked and has reached the child's `unlock_level`.
    pub fn is_unlocked(&self, id: SkillId) -> Result<bool> {
        if !self.skills.contains_key(&id) {
            return Err(RegistryError::NotFound { id });
        }
        Ok(traverse::unlocked(&self.skills, id))
    }

    /// All unlocked skills, in insertion order.
    pub fn unlocked_skills(&self) -> Vec<&Skill> {
        self.skills
            .values()
            .filter(|s| traverse::unlocked(&self.skills, s.id))
            .collect()
    }

    /// The full activity log, oldest first.
    pub fn activities(&self) -> &[SkillActivity] {
        &self.activities
    }

    /// Activities logged against one skill, oldest first.
    ///
    /// Works for deleted skills too, since the log outlives them.
    pub fn activities_for(&self, skill_id: SkillId) -> Vec<&SkillActivity> {
        self.activities
            .iter()
            .filter(|a| a.skill_id == skill_id)
            .collect()
    }

    /// Iterate over all skills in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.values()
    }

    /// Number of skills.
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Whether the registry holds no skills.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Integrity
    // ═══════════════════════════════════════════════════════════════════

    /// Verify every structural and field invariant.
    ///
    /// Checks level bounds and progress range on each skill, that every
    /// child link points back at its parent (and vice versa), that no child
    /// is listed twice, and that parent links are acyclic.
    pub fn check_integrity(&self) -> Result<()> {
        for skill in self.skills.values() {
            validate_level_range(skill.current_level, skill.max_level)?;
            validate_progress(skill.progress)?;
            validate_unlock_level(skill.unlock_level)?;

            let mut seen = HashSet::new();
            for child_id in &skill.children {
                if !seen.insert(*child_id) {
                    return Err(RegistryError::BrokenLink(format!(
                        "{child_id} listed twice under {}",
                        skill.id
                    )));
                }
                let child = self.skills.get(child_id).ok_or_else(|| {
                    RegistryError::BrokenLink(format!(
                        "{} lists missing child {child_id}",
                        skill.id
                    ))
                })?;
                if child.parent_id != Some(skill.id) {
                    return Err(RegistryError::BrokenLink(format!(
                        "{child_id} is listed under {} but points at {:?}",
                        skill.id, child.parent_id
                    )));
                }
            }

            if let Some(parent) = skill.parent_id.and_then(|p| self.skills.get(&p)) {
                if !parent.children.contains(&skill.id) {
                    return Err(RegistryError::BrokenLink(format!(
                        "{} points at {} which does not list it",
                        skill.id, parent.id
                    )));
                }
            }

            if traverse::has_cycle_above(&self.skills, skill.id) {
                return Err(RegistryError::Cycle {
                    id: skill.id,
                    parent: skill.parent_id.unwrap_or(skill.id),
                });
            }
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Internals
    // ═══════════════════════════════════════════════════════════════════

    fn log_activity(&mut self, skill_id: SkillId, draft: ActivityDraft) -> SkillActivity {
        let id = ActivityId::new(self.next_activity_id);
        self.next_activity_id += 1;

        let activity = draft.into_activity(id, skill_id, Utc::now());
        self.activities.push(activity.clone());
        activity
    }

    /// Children of `skill` whose unlock level lies in `(from, current]`,
    /// provided `skill` itself is unlocked.
    fn children_unlocked_between(&self, skill: &Skill, from: u32) -> Vec<SkillId> {
        if !traverse::unlocked(&self.skills, skill.id) {
            return Vec::new();
        }
        let unlocked: Vec<SkillId> = skill
            .children
            .iter()
            .filter_map(|c| self.skills.get(c))
            .filter(|c| c.unlock_level > from && c.unlock_level <= skill.current_level)
            .map(|c| c.id)
            .collect();
        for child in &unlocked {
            trace!(parent = %skill.id, %child, "child skill unlocked");
        }
        unlocked
    }

    /// Under `MaxLevelPolicy::Freeze`, a skill at its cap carries no progress.
    fn pin_progress_at_cap(&self, skill: &mut Skill) {
        if self.config.max_level == MaxLevelPolicy::Freeze && skill.is_max_level() {
            skill.progress = 0.0;
        }
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}
