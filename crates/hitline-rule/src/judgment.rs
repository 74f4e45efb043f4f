use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of judgment tiers: PERFECT, GREAT, GOOD, MISS.
pub const JUDGE_COUNT: usize = 4;

/// Accuracy classification of a single judged event.
///
/// Ordered from best to worst; the discriminant doubles as the index into
/// per-tier tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Judgment {
    Perfect = 0,
    Great = 1,
    Good = 2,
    Miss = 3,
}

impl Judgment {
    pub const ALL: [Judgment; JUDGE_COUNT] = [
        Judgment::Perfect,
        Judgment::Great,
        Judgment::Good,
        Judgment::Miss,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether this tier is a successful hit (keeps the combo going).
    pub fn is_hit(self) -> bool {
        self != Judgment::Miss
    }

    /// Display label shown by the presentation layer.
    pub fn label(self) -> &'static str {
        match self {
            Judgment::Perfect => "PERFECT",
            Judgment::Great => "GREAT",
            Judgment::Good => "GOOD",
            Judgment::Miss => "MISS",
        }
    }
}

impl fmt::Display for Judgment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip() {
        for judgment in Judgment::ALL {
            assert_eq!(Judgment::from_index(judgment.index()), Some(judgment));
        }
        assert_eq!(Judgment::from_index(JUDGE_COUNT), None);
    }

    #[test]
    fn only_miss_breaks_combo() {
        assert!(Judgment::Perfect.is_hit());
        assert!(Judgment::Great.is_hit());
        assert!(Judgment::Good.is_hit());
        assert!(!Judgment::Miss.is_hit());
    }

    #[test]
    fn labels() {
        assert_eq!(Judgment::Perfect.to_string(), "PERFECT");
        assert_eq!(Judgment::Miss.label(), "MISS");
    }

    #[test]
    fn ordered_best_first() {
        assert!(Judgment::Perfect < Judgment::Great);
        assert!(Judgment::Good < Judgment::Miss);
    }
}
