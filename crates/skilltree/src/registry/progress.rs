//! Progress-to-level conversion

use crate::config::{LevelUpPolicy, MaxLevelPolicy, RegistryConfig};
use crate::skill::LEVEL_THRESHOLD;

/// Level and progress after applying an amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Advance {
    pub level: u32,
    pub progress: f64,
}

/// Add `amount` to `progress` and convert every full 100 into a level.
///
/// Levels stop at `max_level`; the remaining progress is shaped by the
/// config's policies. The result always has progress in `[0, 100)`.
pub(crate) fn advance(
    level: u32,
    max_level: u32,
    progress: f64,
    amount: f64,
    config: &RegistryConfig,
) -> Advance {
    let total = progress + amount;
    // `as` saturates for huge totals
    let crossings = (total / LEVEL_THRESHOLD).floor() as u32;
    let mut progress = total.rem_euclid(LEVEL_THRESHOLD);
    let new_level = level
        .saturating_add(crossings)
        .min(max_level.max(level));

    // Any crossing discards the excess, even when the cap stops the level
    if crossings > 0 && config.level_up == LevelUpPolicy::ResetToZero {
        progress = 0.0;
    }
    if new_level >= max_level && config.max_level == MaxLevelPolicy::Freeze {
        progress = 0.0;
    }

    Advance {
        level: new_level,
        progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carry() -> RegistryConfig {
        RegistryConfig::default()
    }

    #[test]
    fn test_below_threshold_keeps_level() {
        let a = advance(1, 10, 40.0, 25.0, &carry());
        assert_eq!(a, Advance { level: 1, progress: 65.0 });
    }

    #[test]
    fn test_carry_remainder() {
        let a = advance(1, 10, 90.0, 15.0, &carry());
        assert_eq!(a, Advance { level: 2, progress: 5.0 });
    }

    #[test]
    fn test_exactly_one_hundred_levels_up() {
        let a = advance(4, 10, 60.0, 40.0, &carry());
        assert_eq!(a, Advance { level: 5, progress: 0.0 });
    }

    #[test]
    fn test_reset_to_zero() {
        let config = RegistryConfig::default().with_level_up(LevelUpPolicy::ResetToZero);
        let a = advance(1, 10, 90.0, 15.0, &config);
        assert_eq!(a, Advance { level: 2, progress: 0.0 });
    }

    #[test]
    fn test_reset_to_zero_at_max_level() {
        let config = RegistryConfig::default().with_level_up(LevelUpPolicy::ResetToZero);
        assert_eq!(
            advance(10, 10, 95.0, 10.0, &config),
            Advance { level: 10, progress: 0.0 }
        );
        assert_eq!(
            advance(10, 10, 40.0, 10.0, &config),
            Advance { level: 10, progress: 50.0 }
        );
    }

    #[test]
    fn test_large_amount_crosses_several_levels() {
        let a = advance(1, 10, 50.0, 260.0, &carry());
        assert_eq!(a, Advance { level: 4, progress: 10.0 });
    }

    #[test]
    fn test_wrap_at_max_level() {
        let a = advance(10, 10, 95.0, 10.0, &carry());
        assert_eq!(a, Advance { level: 10, progress: 5.0 });
    }

    #[test]
    fn test_level_capped_when_crossing_into_max() {
        let a = advance(9, 10, 90.0, 350.0, &carry());
        assert_eq!(a.level, 10);
        assert_eq!(a.progress, 40.0);
    }

    #[test]
    fn test_freeze_at_max_level() {
        let config = RegistryConfig::default().with_max_level(MaxLevelPolicy::Freeze);
        assert_eq!(
            advance(9, 10, 90.0, 15.0, &config),
            Advance { level: 10, progress: 0.0 }
        );
        assert_eq!(
            advance(10, 10, 0.0, 30.0, &config),
            Advance { level: 10, progress: 0.0 }
        );
    }

    #[test]
    fn test_huge_amount_saturates() {
        let a = advance(1, 10, 0.0, 1e300, &carry());
        assert_eq!(a.level, 10);
        assert!((0.0..100.0).contains(&a.progress));
    }
}
