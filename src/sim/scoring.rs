//! Score, combo and level arithmetic

use crate::consts::*;
use crate::settings::LevelUpRule;

/// floor(combo / 5) + 1
#[inline]
pub fn combo_multiplier(combo: u32) -> u32 {
    combo / COMBO_STEP + 1
}

/// Add a signed delta, clamping at zero
#[inline]
pub fn apply_delta(score: u64, delta: i64) -> u64 {
    if delta >= 0 {
        score.saturating_add(delta as u64)
    } else {
        score.saturating_sub(delta.unsigned_abs())
    }
}

/// Score a level must exceed to advance
#[inline]
pub fn level_threshold(level: u32) -> u64 {
    u64::from(level) * POINTS_PER_LEVEL
}

/// Level after reaching `score`. Returns the new level.
pub fn level_after(level: u32, score: u64, rule: LevelUpRule) -> u32 {
    match rule {
        LevelUpRule::SinglePerPop => {
            if score > level_threshold(level) {
                level + 1
            } else {
                level
            }
        }
        LevelUpRule::Cascade => {
            let mut level = level;
            while score > level_threshold(level) {
                level += 1;
            }
            level
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_multiplier_steps() {
        for combo in 1..=4 {
            assert_eq!(combo_multiplier(combo), 1);
        }
        for combo in 5..=9 {
            assert_eq!(combo_multiplier(combo), 2);
        }
        assert_eq!(combo_multiplier(10), 3);
        assert_eq!(combo_multiplier(14), 3);
        assert_eq!(combo_multiplier(15), 4);
    }

    #[test]
    fn test_apply_delta_clamps() {
        assert_eq!(apply_delta(10, -20), 0);
        assert_eq!(apply_delta(30, -20), 10);
        assert_eq!(apply_delta(0, 50), 50);
        assert_eq!(apply_delta(u64::MAX, 1), u64::MAX);
    }

    #[test]
    fn test_level_threshold_is_strict() {
        assert_eq!(level_after(1, 500, LevelUpRule::SinglePerPop), 1);
        assert_eq!(level_after(1, 501, LevelUpRule::SinglePerPop), 2);
    }

    #[test]
    fn test_single_step_skips_on_overshoot() {
        // 1600 is past the level 1, 2 and 3 thresholds; only one level awarded
        assert_eq!(level_after(1, 1600, LevelUpRule::SinglePerPop), 2);
        assert_eq!(level_after(1, 1600, LevelUpRule::Cascade), 4);
    }

    proptest! {
        #[test]
        fn prop_score_never_negative(
            start in 0u64..10_000,
            deltas in prop::collection::vec(-500i64..500, 0..64)
        ) {
            let mut score = start;
            for delta in deltas {
                let next = apply_delta(score, delta);
                prop_assert!(next == 0 || next as i64 == score as i64 + delta);
                score = next;
            }
        }

        #[test]
        fn prop_multiplier_formula(combo in 0u32..10_000) {
            prop_assert_eq!(combo_multiplier(combo), combo / 5 + 1);
            prop_assert!(combo_multiplier(combo + 1) >= combo_multiplier(combo));
        }

        #[test]
        fn prop_single_step_advances_at_most_one(level in 1u32..50, score in 0u64..100_000) {
            let next = level_after(level, score, LevelUpRule::SinglePerPop);
            prop_assert!(next == level || next == level + 1);
            let cascaded = level_after(level, score, LevelUpRule::Cascade);
            prop_assert!(cascaded >= next);
        }
    }
}
