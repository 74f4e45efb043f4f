use serde::{Deserialize, Serialize};

use crate::judgment::Judgment;
use crate::rank::Rank;
use crate::score_rule::ScoreRule;

/// Running tallies for a single play session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreData {
    /// PERFECT count
    pub perfect: u32,
    /// GREAT count
    pub great: u32,
    /// GOOD count
    pub good: u32,
    /// MISS count (expired notes and failed presses)
    pub miss: u32,
    /// Hits pressed at or before the note time
    pub fast: u32,
    /// Hits pressed after the note time
    pub slow: u32,
    /// Accumulated score, combo bonus included
    pub score: f64,
    /// Current combo
    pub combo: u32,
    /// Maximum combo achieved
    pub max_combo: u32,
    /// Total notes in the chart
    pub notes: u32,
}

impl ScoreData {
    pub fn new(total_notes: usize) -> Self {
        Self {
            notes: u32::try_from(total_notes).unwrap_or(u32::MAX),
            ..Default::default()
        }
    }

    pub fn judge_count(&self, judgment: Judgment) -> u32 {
        match judgment {
            Judgment::Perfect => self.perfect,
            Judgment::Great => self.great,
            Judgment::Good => self.good,
            Judgment::Miss => self.miss,
        }
    }

    fn judge_count_mut(&mut self, judgment: Judgment) -> &mut u32 {
        match judgment {
            Judgment::Perfect => &mut self.perfect,
            Judgment::Great => &mut self.great,
            Judgment::Good => &mut self.good,
            Judgment::Miss => &mut self.miss,
        }
    }

    /// Record a successful hit.
    ///
    /// The award uses the combo *before* this hit; the combo is bumped
    /// afterwards. `dmtime` = note_time - press_time. Returns the points added.
    pub fn record_hit(&mut self, judgment: Judgment, dmtime: i64, rule: &ScoreRule) -> f64 {
        if !judgment.is_hit() {
            self.record_miss();
            return 0.0;
        }
        let points = rule.award(judgment, self.combo);
        self.score += points;
        *self.judge_count_mut(judgment) += 1;
        if dmtime >= 0 {
            self.fast += 1;
        } else {
            self.slow += 1;
        }
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        points
    }

    /// Record a miss: counts it and breaks the combo.
    pub fn record_miss(&mut self) {
        self.miss += 1;
        self.combo = 0;
    }

    /// Number of judged events (hits and misses).
    pub fn total_judged(&self) -> u32 {
        Judgment::ALL.iter().map(|j| self.judge_count(*j)).sum()
    }

    /// PERFECT count over all judged events; 0 when nothing was judged.
    pub fn perfect_rate(&self) -> f64 {
        let total = self.total_judged();
        if total == 0 {
            0.0
        } else {
            self.perfect as f64 / total as f64
        }
    }

    pub fn rank(&self) -> Rank {
        Rank::from_perfect_rate(self.perfect_rate())
    }

    /// Score as shown to the player (fractional bonus points truncated).
    pub fn display_score(&self) -> u64 {
        self.score.floor() as u64
    }
}
