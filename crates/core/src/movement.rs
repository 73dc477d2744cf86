//! Rank movement classification and sticky trend colors.
//!
//! Movement compares a collection's current rank against a reference rank
//! from an earlier cycle. Collections absent from the reference resolve to
//! the sentinel rank just below the tracked range, so a debut always
//! classifies as a climb. Trend colors damp the raw signal: a collection
//! hovering near a rank boundary flips between up/down/same every cycle,
//! while its color changes only on an actual direction change and holds
//! through any number of flat cycles.

use serde::{Deserialize, Serialize};

/// Sentinel reference rank for collections absent from the reference
/// state, one below the lowest tracked rank.
pub const UNSEEN_RANK: u32 = 101;

/// Direction of a collection's rank change since the reference point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Movement {
    /// Current rank is better (numerically lower) than the reference.
    Up,
    /// Current rank is worse than the reference.
    Down,
    /// Rank is unchanged.
    Same,
}

impl Movement {
    /// Classifies the change from `reference_rank` to `current_rank`.
    ///
    /// An absent reference is treated as [`UNSEEN_RANK`], so any tracked
    /// rank classifies as [`Movement::Up`].
    #[must_use]
    pub fn classify(current_rank: u32, reference_rank: Option<u32>) -> Self {
        let reference = reference_rank.unwrap_or(UNSEEN_RANK);
        match current_rank.cmp(&reference) {
            std::cmp::Ordering::Less => Self::Up,
            std::cmp::Ordering::Greater => Self::Down,
            std::cmp::Ordering::Equal => Self::Same,
        }
    }

    /// Returns the lowercase wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Same => "same",
        }
    }
}

/// Display color attached to a collection's badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendColor {
    /// Last direction change was upward.
    Green,
    /// Last direction change was downward, or no trend recorded yet.
    Red,
}

impl TrendColor {
    /// Resolves the sticky color for a cycle.
    ///
    /// Up turns green, down turns red, and a flat cycle keeps the
    /// previously recorded color (red when none was recorded).
    #[must_use]
    pub fn resolve(movement: Movement, previous: Option<Self>) -> Self {
        match movement {
            Movement::Up => Self::Green,
            Movement::Down => Self::Red,
            Movement::Same => previous.unwrap_or(Self::Red),
        }
    }

    /// Returns the lowercase wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Red => "red",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== Movement Classification Tests ==========

    #[test]
    fn test_classify_total_over_valid_range() {
        for current in 1..=101u32 {
            for reference in 1..=101u32 {
                let movement = Movement::classify(current, Some(reference));
                match current.cmp(&reference) {
                    std::cmp::Ordering::Less => assert_eq!(movement, Movement::Up),
                    std::cmp::Ordering::Greater => assert_eq!(movement, Movement::Down),
                    std::cmp::Ordering::Equal => assert_eq!(movement, Movement::Same),
                }
            }
        }
    }

    #[test]
    fn test_classify_climb() {
        assert_eq!(Movement::classify(5, Some(12)), Movement::Up);
        assert_eq!(Movement::classify(1, Some(2)), Movement::Up);
    }

    #[test]
    fn test_classify_drop() {
        assert_eq!(Movement::classify(12, Some(5)), Movement::Down);
        assert_eq!(Movement::classify(100, Some(99)), Movement::Down);
    }

    #[test]
    fn test_classify_unchanged() {
        assert_eq!(Movement::classify(7, Some(7)), Movement::Same);
    }

    #[test]
    fn test_unseen_collection_always_classifies_up() {
        for current in 1..=100u32 {
            assert_eq!(Movement::classify(current, None), Movement::Up);
        }
    }

    #[test]
    fn test_unseen_sentinel_value() {
        // The sentinel sits one below the lowest tracked rank.
        assert_eq!(UNSEEN_RANK, 101);
        assert_eq!(Movement::classify(UNSEEN_RANK, None), Movement::Same);
    }

    // ========== Sticky Color Tests ==========

    #[test]
    fn test_color_follows_direction_changes() {
        assert_eq!(TrendColor::resolve(Movement::Up, None), TrendColor::Green);
        assert_eq!(TrendColor::resolve(Movement::Down, None), TrendColor::Red);
        assert_eq!(
            TrendColor::resolve(Movement::Up, Some(TrendColor::Red)),
            TrendColor::Green
        );
        assert_eq!(
            TrendColor::resolve(Movement::Down, Some(TrendColor::Green)),
            TrendColor::Red
        );
    }

    #[test]
    fn test_color_holds_through_flat_cycles() {
        assert_eq!(
            TrendColor::resolve(Movement::Same, Some(TrendColor::Green)),
            TrendColor::Green
        );
        assert_eq!(
            TrendColor::resolve(Movement::Same, Some(TrendColor::Red)),
            TrendColor::Red
        );
    }

    #[test]
    fn test_color_defaults_red_with_no_history() {
        assert_eq!(TrendColor::resolve(Movement::Same, None), TrendColor::Red);
    }

    #[test]
    fn test_color_sequence_up_same_same_down_same() {
        let movements = [
            Movement::Up,
            Movement::Same,
            Movement::Same,
            Movement::Down,
            Movement::Same,
        ];
        let expected = [
            TrendColor::Green,
            TrendColor::Green,
            TrendColor::Green,
            TrendColor::Red,
            TrendColor::Red,
        ];

        let mut previous = None;
        for (movement, want) in movements.into_iter().zip(expected) {
            let color = TrendColor::resolve(movement, previous);
            assert_eq!(color, want);
            previous = Some(color);
        }
    }

    // ========== Serde Wire Format ==========

    #[test]
    fn test_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&Movement::Up).unwrap(), "\"up\"");
        assert_eq!(
            serde_json::to_string(&TrendColor::Green).unwrap(),
            "\"green\""
        );
        let color: TrendColor = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(color, TrendColor::Red);
    }
}
