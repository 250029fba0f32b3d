//! Tree walks over the id-indexed skill map

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::trace;

use crate::skill::{Skill, SkillId};

/// Preorder walk of the subtree under `root`, `root` included.
///
/// Child ids that no longer resolve are skipped. A visited set keeps the
/// walk finite even if links were corrupted into a cycle.
pub(crate) fn subtree_preorder(skills: &IndexMap<SkillId, Skill>, root: SkillId) -> Vec<SkillId> {
    let mut order = Vec::new();
    let mut visited = HashSet::new();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        let Some(skill) = skills.get(&id) else {
            trace!(%id, "skipping stale child reference");
            continue;
        };
        if !visited.insert(id) {
            continue;
        }
        order.push(id);
        // Reverse so children pop in insertion order
        stack.extend(skill.children.iter().rev().copied());
    }

    order
}

/// Parent chain of `id`, nearest first, stopping at a root or a dangling
/// parent.
pub(crate) fn ancestor_chain(skills: &IndexMap<SkillId, Skill>, id: SkillId) -> Vec<SkillId> {
    let mut chain = Vec::new();
    let mut seen = HashSet::from([id]);
    let mut current = skills.get(&id).and_then(|s| s.parent_id);

    while let Some(parent) = current {
        if !skills.contains_key(&parent) || !seen.insert(parent) {
            break;
        }
        chain.push(parent);
        current = skills.get(&parent).and_then(|s| s.parent_id);
    }

    chain
}

/// Whether following parent links from `id` ever revisits a node.
pub(crate) fn has_cycle_above(skills: &IndexMap<SkillId, Skill>, id: SkillId) -> bool {
    let mut seen = HashSet::from([id]);
    let mut current = skills.get(&id).and_then(|s| s.parent_id);

    while let Some(parent) = current {
        if !seen.insert(parent) {
            return true;
        }
        current = skills.get(&parent).and_then(|s| s.parent_id);
    }

    false
}

/// Whether `id` is reachable from a root through unlocked links.
///
/// Roots are always unlocked. A child unlocks once its parent is unlocked
/// and has reached the child's `unlock_level`. Orphans have no path to a
/// root and stay locked.
pub(crate) fn unlocked(skills: &IndexMap<SkillId, Skill>, id: SkillId) -> bool {
    let mut seen = HashSet::new();
    let mut current = id;

    loop {
        let Some(skill) = skills.get(&current) else {
            return false;
        };
        if !seen.insert(current) {
            return false;
        }
        let Some(parent_id) = skill.parent_id else {
            return true;
        };
        let Some(parent) = skills.get(&parent_id) else {
            return false;
        };
        if parent.current_level < skill.unlock_level {
            return false;
        }
        current = parent_id;
    }
}
