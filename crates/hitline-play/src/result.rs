use std::path::Path;

use anyhow::{Context, Result};
use hitline_rule::{Rank, ScoreData};
use serde::{Deserialize, Serialize};

/// Final outcome of a session, frozen when it ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayResult {
    pub perfect: u32,
    pub great: u32,
    pub good: u32,
    pub miss: u32,
    pub fast: u32,
    pub slow: u32,
    /// Truncated score as displayed
    pub score: u64,
    pub max_combo: u32,
    pub total_notes: u32,
    pub perfect_rate: f64,
    pub rank: Rank,
}

impl PlayResult {
    pub fn new(score: &ScoreData) -> Self {
        Self {
            perfect: score.perfect,
            great: score.great,
            good: score.good,
            miss: score.miss,
            fast: score.fast,
            slow: score.slow,
            score: score.display_score(),
            max_combo: score.max_combo,
            total_notes: score.notes,
            perfect_rate: score.perfect_rate(),
            rank: score.rank(),
        }
    }

    pub fn total_judged(&self) -> u32 {
        self.perfect + self.great + self.good + self.miss
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write result {}", path.display()))?;
        Ok(())
    }
}
