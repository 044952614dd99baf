//! The fortress level: how many months of living costs the reserve covers.

use serde::{Deserialize, Serialize};

/// Calculates the fortress level, the number of months `effective_reserve`
/// would cover at `monthly_living_cost` per month.
///
/// Returns 0 when `monthly_living_cost` is not positive. Fractional levels
/// are meaningful and there is no upper bound.
pub fn fortress_level(effective_reserve: f64, monthly_living_cost: f64) -> f64 {
    if monthly_living_cost > 0.0 {
        effective_reserve / monthly_living_cost
    } else {
        0.0
    }
}

/// A fortress level split into a whole level and the progress towards the
/// next one, e.g. 5.6 is level 5 and 60% of the way to level 6.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// The level reached, rounded down.
    pub level: u32,
    /// The next whole level.
    pub next_level: u32,
    /// How far along the way to `next_level` as a percentage, from 0 up to
    /// (not including) 100.
    pub progress: f64,
}

impl LevelProgress {
    /// Split `level` into whole and fractional parts.
    ///
    /// Negative, NaN and infinite levels count as level 0.
    pub fn from_level(level: f64) -> Self {
        if !level.is_finite() || level <= 0.0 {
            return Self {
                level: 0,
                next_level: 1,
                progress: 0.0,
            };
        }

        let whole = level.floor();
        // `as` saturates, so absurdly large levels stop at u32::MAX.
        let whole_level = whole as u32;

        Self {
            level: whole_level,
            next_level: whole_level.saturating_add(1),
            progress: (level - whole) * 100.0,
        }
    }
}

#[cfg(test)]
mod fortress_level_tests {
    use super::fortress_level;

    #[test]
    fn divides_reserve_by_living_cost() {
        assert_eq!(fortress_level(1500.0, 300.0), 5.0);
    }

    #[test]
    fn keeps_fractional_levels() {
        assert_eq!(fortress_level(1000.0, 400.0), 2.5);
    }

    #[test]
    fn zero_living_cost_gives_zero() {
        for reserve in [0.0, 1.0, -1.0, 1e12] {
            assert_eq!(fortress_level(reserve, 0.0), 0.0);
        }
    }

    #[test]
    fn negative_living_cost_gives_zero() {
        assert_eq!(fortress_level(1000.0, -100.0), 0.0);
    }

    #[test]
    fn level_can_exceed_twelve() {
        assert_eq!(fortress_level(60_000.0, 2_000.0), 30.0);
    }
}
