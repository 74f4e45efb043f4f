use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of input lanes.
pub const LANE_COUNT: usize = 3;

/// One of the input lanes a note belongs to (0-indexed).
///
/// Serialized as its plain index so chart files can write `"lane": 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Lane(u8);

impl Lane {
    pub const ALL: [Lane; LANE_COUNT] = [Lane(0), Lane(1), Lane(2)];

    /// Returns `None` when `index` is not a valid lane.
    pub fn new(index: usize) -> Option<Self> {
        (index < LANE_COUNT).then_some(Self(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for Lane {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Lane::new(value as usize).ok_or_else(|| format!("lane {value} out of range 0..{LANE_COUNT}"))
    }
}

impl From<Lane> for u8 {
    fn from(lane: Lane) -> Self {
        lane.0
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
