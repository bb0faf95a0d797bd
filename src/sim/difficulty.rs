//! Level and speed progression
//!
//! Both are pure functions of score so they can be recomputed every tick.

use crate::tuning::Tuning;

/// `floor(score / score_per_level) + 1`
pub fn level_for_score(score: u64, tuning: &Tuning) -> u32 {
    let tier = score / tuning.score_per_level;
    u32::try_from(tier).unwrap_or(u32::MAX - 1) + 1
}

/// Base speed plus a fixed step for every level above 1
pub fn speed_for_level(level: u32, tuning: &Tuning) -> f32 {
    tuning.base_speed + level.saturating_sub(1) as f32 * tuning.speed_per_level
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_level_boundaries() {
        let tuning = Tuning::default();
        assert_eq!(level_for_score(0, &tuning), 1);
        assert_eq!(level_for_score(499, &tuning), 1);
        assert_eq!(level_for_score(500, &tuning), 2);
        assert_eq!(level_for_score(999, &tuning), 2);
        assert_eq!(level_for_score(1000, &tuning), 3);
    }

    #[test]
    fn test_speed_steps() {
        let tuning = Tuning::default();
        assert_eq!(speed_for_level(1, &tuning), 5.0);
        assert_eq!(speed_for_level(2, &tuning), 5.5);
        assert_eq!(speed_for_level(5, &tuning), 7.0);
    }

    proptest! {
        #[test]
        fn prop_progression_is_monotonic(a in 0u64..1_000_000, b in 0u64..1_000_000) {
            let tuning = Tuning::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let (level_lo, level_hi) = (level_for_score(lo, &tuning), level_for_score(hi, &tuning));
            prop_assert!(level_lo <= level_hi);
            prop_assert!(speed_for_level(level_lo, &tuning) <= speed_for_level(level_hi, &tuning));
        }

        #[test]
        fn prop_level_formula(score in 0u64..10_000_000) {
            let tuning = Tuning::default();
            prop_assert_eq!(level_for_score(score, &tuning) as u64, score / 500 + 1);
        }
    }
}
