//! Progress and level-up tests across policies

use pretty_assertions::assert_eq;
use skilltree::*;

fn guitar(registry: &mut SkillRegistry, level: u32, max: u32, progress: f64) -> SkillId {
    registry
        .create(
            SkillDraft::new("Guitar")
                .with_category(SkillCategory::Arts)
                .with_levels(level, max)
                .with_progress(progress),
        )
        .unwrap()
        .id
}

// ═══════════════════════════════════════════════════════════════════════
// Default Policy (carry remainder, wrap at cap)
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_guitar_level_up_carries_remainder() {
    let mut registry = SkillRegistry::new();
    let id = guitar(&mut registry, 1, 10, 90.0);

    let skill = registry
        .apply_progress(id, ActivityDraft::new("Scales", 15.0))
        .unwrap();

    assert_eq!(skill.current_level, 2);
    assert_eq!(skill.progress, 5.0);
    assert_eq!(registry.get(id), Some(&skill));

    let log = registry.activities();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].skill_id, id);
    assert_eq!(log[0].name, "Scales");
    assert_eq!(log[0].progress_value, 15.0);
}

#[test]
fn test_progress_below_threshold_accumulates() {
    let mut registry = SkillRegistry::new();
    let id = guitar(&mut registry, 3, 10, 10.0);

    registry.apply_progress(id, ActivityDraft::new("a", 20.0)).unwrap();
    let skill = registry.apply_progress(id, ActivityDraft::new("b", 30.5)).unwrap();

    assert_eq!(skill.current_level, 3);
    assert_eq!(skill.progress, 60.5);
}

#[test]
fn test_max_level_stays_capped_and_progress_wraps() {
    let mut registry = SkillRegistry::new();
    let id = guitar(&mut registry, 10, 10, 95.0);

    let skill = registry
        .apply_progress(id, ActivityDraft::new("Concert", 10.0))
        .unwrap();

    assert_eq!(skill.current_level, 10);
    assert_eq!(skill.progress, 5.0);
}

#[test]
fn test_reaching_cap_mid_activity() {
    let mut registry = SkillRegistry::new();
    let id = guitar(&mut registry, 9, 10, 80.0);

    let skill = registry
        .apply_progress(id, ActivityDraft::new("Marathon session", 150.0))
        .unwrap();

    assert_eq!(skill.current_level, 10);
    assert_eq!(skill.progress, 30.0);
}

#[test]
fn test_apply_progress_rejects_bad_input_without_logging() {
    let mut registry = SkillRegistry::new();
    let id = guitar(&mut registry, 1, 10, 0.0);

    assert_eq!(
        registry
            .apply_progress(id, ActivityDraft::new("Nothing", -1.0))
            .unwrap_err(),
        RegistryError::NonPositiveAmount { amount: -1.0 }
    );
    assert_eq!(
        registry
            .apply_progress(id, ActivityDraft::new(" ", 5.0))
            .unwrap_err(),
        RegistryError::EmptyName
    );
    let missing = SkillId::new(100);
    assert_eq!(
        registry
            .apply_progress(missing, ActivityDraft::new("Ghost", 5.0))
            .unwrap_err(),
        RegistryError::NotFound { id: missing }
    );
    assert!(registry.activities().is_empty());
    assert_eq!(registry.get(id).unwrap().progress, 0.0);
}

#[test]
fn test_level_never_decreases_nor_exceeds_cap() {
    let mut registry = SkillRegistry::new();
    let id = guitar(&mut registry, 1, 6, 0.0);
    let amounts = [
        3.0, 97.0, 45.5, 54.5, 12.25, 250.0, 0.5, 99.9, 100.0, 7.0, 333.0, 1.0,
    ];

    let mut last_level = 1;
    for (i, amount) in amounts.into_iter().enumerate() {
        let skill = registry
            .apply_progress(id, ActivityDraft::new(format!("step {i}"), amount))
            .unwrap();
        assert!(skill.current_level >= last_level);
        assert!(skill.current_level <= skill.max_level);
        assert!((0.0..100.0).contains(&skill.progress));
        last_level = skill.current_level;
    }

    assert_eq!(last_level, 6);
    assert_eq!(registry.activities().len(), amounts.len());
    registry.check_integrity().unwrap();
}

// ═══════════════════════════════════════════════════════════════════════
// Alternative Policies
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_reset_to_zero_policy() {
    let config = RegistryConfig::new().with_level_up(LevelUpPolicy::ResetToZero);
    let mut registry = SkillRegistry::with_config(config);
    let id = guitar(&mut registry, 1, 10, 90.0);

    let skill = registry
        .apply_progress(id, ActivityDraft::new("Scales", 15.0))
        .unwrap();

    assert_eq!(skill.current_level, 2);
    assert_eq!(skill.progress, 0.0);
}

#[test]
fn test_freeze_policy_pins_progress_at_cap() {
    let config = RegistryConfig::new().with_max_level(MaxLevelPolicy::Freeze);
    let mut registry = SkillRegistry::with_config(config);
    let id = guitar(&mut registry, 9, 10, 90.0);

    let skill = registry
        .apply_progress(id, ActivityDraft::new("Final push", 15.0))
        .unwrap();
    assert_eq!(skill.current_level, 10);
    assert_eq!(skill.progress, 0.0);

    let skill = registry
        .apply_progress(id, ActivityDraft::new("Encore", 40.0))
        .unwrap();
    assert_eq!(skill.current_level, 10);
    assert_eq!(skill.progress, 0.0);

    // Still logged even though nothing moved
    assert_eq!(registry.activities().len(), 2);
}

#[test]
fn test_reset_to_zero_at_cap_discards_excess() {
    let config = RegistryConfig::new().with_level_up(LevelUpPolicy::ResetToZero);
    let mut registry = SkillRegistry::with_config(config);
    let id = guitar(&mut registry, 10, 10, 95.0);

    let skill = registry
        .apply_progress(id, ActivityDraft::new("Concert", 10.0))
        .unwrap();

    assert_eq!(skill.current_level, 10);
    assert_eq!(skill.progress, 0.0);
}

#[test]
fn test_freeze_policy_pins_skill_created_at_cap() {
    let config = RegistryConfig::new().with_max_level(MaxLevelPolicy::Freeze);
    let mut registry = SkillRegistry::with_config(config);
    let id = guitar(&mut registry, 5, 5, 50.0);
    assert_eq!(registry.get(id).unwrap().progress, 0.0);

    let skill = registry
        .apply_progress(id, ActivityDraft::new("Practice", 1.0))
        .unwrap();
    assert_eq!(skill.current_level, 5);
    assert_eq!(skill.progress, 0.0);
}

#[test]
fn test_freeze_policy_pins_updates_at_cap() {
    let config = RegistryConfig::new().with_max_level(MaxLevelPolicy::Freeze);
    let mut registry = SkillRegistry::with_config(config);
    let at_cap = guitar(&mut registry, 5, 5, 0.0);
    let below = guitar(&mut registry, 3, 5, 20.0);

    let skill = registry.update(at_cap, [SkillUpdate::SetProgress(70.0)]).unwrap();
    assert_eq!(skill.progress, 0.0);

    // Reaching the cap through an update pins progress as well
    let skill = registry
        .update(below, [SkillUpdate::SetProgress(40.0), SkillUpdate::SetLevel(5)])
        .unwrap();
    assert_eq!(skill.current_level, 5);
    assert_eq!(skill.progress, 0.0);

    // Raising the cap frees progress again
    let skill = registry
        .update(below, [SkillUpdate::SetMaxLevel(8), SkillUpdate::SetProgress(40.0)])
        .unwrap();
    assert_eq!(skill.progress, 40.0);
    assert_eq!(registry.get(below), Some(&skill));
}

#[test]
fn test_wrap_policy_keeps_progress_at_cap() {
    let mut registry = SkillRegistry::new();
    let id = guitar(&mut registry, 5, 5, 50.0);

    let skill = registry.update(id, [SkillUpdate::SetProgress(70.0)]).unwrap();

    assert_eq!(skill.progress, 70.0);
}

#[test]
fn test_freeze_policy_below_cap_behaves_like_default() {
    let config = RegistryConfig::new().with_max_level(MaxLevelPolicy::Freeze);
    let mut registry = SkillRegistry::with_config(config);
    let id = guitar(&mut registry, 1, 10, 90.0);

    let skill = registry
        .apply_progress(id, ActivityDraft::new("Scales", 15.0))
        .unwrap();

    assert_eq!(skill.current_level, 2);
    assert_eq!(skill.progress, 5.0);
}

#[test]
fn test_config_loaded_from_json_drives_registry() -> anyhow::Result<()> {
    let config = RegistryConfig::from_json(r#"{"level_up": "reset_to_zero"}"#)?;
    let mut registry = SkillRegistry::with_config(config);
    let id = guitar(&mut registry, 1, 10, 50.0);

    let skill = registry.apply_progress(id, ActivityDraft::new("Jam", 75.0))?;

    assert_eq!(skill.current_level, 2);
    assert_eq!(skill.progress, 0.0);
    assert_eq!(registry.config().level_up, LevelUpPolicy::ResetToZero);
    Ok(())
}
