use std::fmt;

use serde::{Deserialize, Serialize};

/// Final letter rank, ordered from lowest (D) to highest (S).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Rank {
    #[default]
    D,
    C,
    B,
    A,
    S,
}

/// Inclusive lower bounds on the PERFECT rate, best rank first.
const RANK_BORDERS: [(f64, Rank); 4] = [
    (0.95, Rank::S),
    (0.85, Rank::A),
    (0.70, Rank::B),
    (0.50, Rank::C),
];

impl Rank {
    pub fn from_perfect_rate(rate: f64) -> Self {
        RANK_BORDERS
            .iter()
            .find(|(border, _)| rate >= *border)
            .map_or(Rank::D, |(_, rank)| *rank)
    }

    pub fn letter(self) -> char {
        match self {
            Rank::S => 'S',
            Rank::A => 'A',
            Rank::B => 'B',
            Rank::C => 'C',
            Rank::D => 'D',
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}
