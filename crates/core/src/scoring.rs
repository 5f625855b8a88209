//! Scoring module - line-clear points and level/speed progression.
//!
//! One table drives scoring: 0/1/2/3/4 rows cleared in a single lock event
//! are worth 0/100/300/500/800 points, multiplied by the level in effect
//! before the event. Every 10 cumulative lines raises the level by one, and
//! each level shaves 75 ms off the gravity interval down to a 100 ms floor.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_PER_LEVEL_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Points for clearing `lines` rows in one lock event at the given level.
///
/// `level` is the level before this event is applied. A single piece can
/// clear at most 4 rows; larger counts score nothing.
pub fn score_for_clear(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines] * level
}

/// Level for a cumulative line total (levels start at 1)
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level, clamped at the minimum
pub fn drop_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub(level.saturating_sub(1).saturating_mul(DROP_STEP_PER_LEVEL_MS))
        .max(DROP_INTERVAL_MIN_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        assert_eq!(score_for_clear(0, 1), 0);
        assert_eq!(score_for_clear(1, 1), 100);
        assert_eq!(score_for_clear(2, 1), 300);
        assert_eq!(score_for_clear(3, 1), 500);
        assert_eq!(score_for_clear(4, 1), 800);
    }

    #[test]
    fn test_score_scales_with_level() {
        assert_eq!(score_for_clear(2, 3), 900);
        assert_eq!(score_for_clear(4, 5), 4000);
    }

    #[test]
    fn test_unproducible_counts_score_nothing() {
        assert_eq!(score_for_clear(5, 1), 0);
        assert_eq!(score_for_clear(100, 3), 0);
    }

    #[test]
    fn test_level_progression() {
        assert_eq!(level_for_lines(0), 1);
        assert_eq!(level_for_lines(9), 1);
        assert_eq!(level_for_lines(10), 2);
        assert_eq!(level_for_lines(25), 3);
        assert_eq!(level_for_lines(120), 13);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(drop_interval_ms(1), 1000);
        assert_eq!(drop_interval_ms(2), 925);
        assert_eq!(drop_interval_ms(5), 700);
        assert_eq!(drop_interval_ms(13), 100);
    }

    #[test]
    fn test_drop_interval_clamps_at_floor() {
        assert_eq!(drop_interval_ms(14), 100);
        assert_eq!(drop_interval_ms(1000), 100);
    }

    #[test]
    fn test_drop_interval_monotonically_non_increasing() {
        let mut prev = drop_interval_ms(1);
        for level in 2..40 {
            let cur = drop_interval_ms(level);
            assert!(cur <= prev);
            prev = cur;
        }
    }
}
