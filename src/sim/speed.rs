//! Fall speed as a function of difficulty and score

use super::difficulty::Difficulty;
use crate::consts::SPEED_CAP;

/// Score-driven speed bonus. Harder levels ramp up more steeply.
pub fn score_bonus(score: u32, difficulty: Difficulty) -> f32 {
    let score = score as f32;
    match difficulty {
        Difficulty::Easy => (score / 50.0) * 35.0,
        Difficulty::Medium => (score / 75.0) * 65.0,
        Difficulty::Hard => (score / 100.0) * 80.0,
    }
}

/// Current fall speed in px/s, capped at `SPEED_CAP`
pub fn fall_speed(score: u32, difficulty: Difficulty) -> f32 {
    let base = difficulty.settings().tile_speed;
    (base + score_bonus(score, difficulty)).min(SPEED_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_easy_at_zero_is_base() {
        assert_eq!(fall_speed(0, Difficulty::Easy), 150.0);
    }

    #[test]
    fn test_bonus_values() {
        // 100 points on easy: 100/50 * 35 = 70
        assert!((fall_speed(100, Difficulty::Easy) - 220.0).abs() < 1e-3);
        // 150 points on medium: 150/75 * 65 = 130
        assert!((fall_speed(150, Difficulty::Medium) - 380.0).abs() < 1e-3);
    }

    #[test]
    fn test_cap_reached() {
        assert_eq!(fall_speed(10_000, Difficulty::Hard), SPEED_CAP);
        assert_eq!(fall_speed(10_000, Difficulty::Easy), SPEED_CAP);
    }

    fn any_difficulty() -> impl Strategy<Value = Difficulty> {
        prop::sample::select(Difficulty::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_speed_monotonic(a in 0u32..100_000, b in 0u32..100_000, d in any_difficulty()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(fall_speed(hi, d) >= fall_speed(lo, d));
        }

        #[test]
        fn prop_speed_within_bounds(score in 0u32..1_000_000, d in any_difficulty()) {
            let speed = fall_speed(score, d);
            prop_assert!(speed <= SPEED_CAP);
            prop_assert!(speed >= d.settings().tile_speed);
        }
    }
}
