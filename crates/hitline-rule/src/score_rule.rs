use serde::{Deserialize, Serialize};

use crate::judgment::Judgment;

/// Per-tier base scores and the combo bonus multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRule {
    pub perfect: f64,
    pub great: f64,
    pub good: f64,
    pub miss: f64,
    /// Extra fraction of the base score per point of combo.
    pub combo_bonus_rate: f64,
}

impl Default for ScoreRule {
    fn default() -> Self {
        Self {
            perfect: 100.0,
            great: 50.0,
            good: 20.0,
            miss: 0.0,
            combo_bonus_rate: 0.05,
        }
    }
}

impl ScoreRule {
    /// Clamp every value to a finite, non-negative number so awards can never
    /// lower the score.
    pub fn validate(&mut self) {
        for v in [
            &mut self.perfect,
            &mut self.great,
            &mut self.good,
            &mut self.miss,
            &mut self.combo_bonus_rate,
        ] {
            *v = if v.is_finite() { v.max(0.0) } else { 0.0 };
        }
    }

    pub fn base_score(&self, judgment: Judgment) -> f64 {
        match judgment {
            Judgment::Perfect => self.perfect,
            Judgment::Great => self.great,
            Judgment::Good => self.good,
            Judgment::Miss => self.miss,
        }
    }

    /// Points for a judgment made while `combo` consecutive hits precede it.
    pub fn award(&self, judgment: Judgment, combo: u32) -> f64 {
        self.base_score(judgment) * (1.0 + combo as f64 * self.combo_bonus_rate)
    }
}
