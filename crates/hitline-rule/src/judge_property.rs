use hitline_model::seconds_to_us;
use serde::{Deserialize, Serialize};

use crate::judgment::Judgment;

/// A judge window pair: [late_limit, early_limit] in microseconds, measured
/// as `note_time - press_time`. late_limit is negative, early_limit positive.
pub type JudgeWindow = [i64; 2];

/// Judge window table: PERFECT, GREAT, GOOD in order.
pub type JudgeWindowTable = [JudgeWindow; 3];

const DEFAULT_PERFECT: f64 = 0.15;
const DEFAULT_GREAT: f64 = 0.25;
const DEFAULT_GOOD: f64 = 0.40;

/// Tolerance thresholds on |Δt| in seconds, nested perfect ⊆ great ⊆ good.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeProperty {
    pub perfect: f64,
    pub great: f64,
    pub good: f64,
}

impl Default for JudgeProperty {
    fn default() -> Self {
        Self {
            perfect: DEFAULT_PERFECT,
            great: DEFAULT_GREAT,
            good: DEFAULT_GOOD,
        }
    }
}

impl JudgeProperty {
    /// Clamp thresholds to non-negative values and widen outer windows so
    /// they always contain the inner ones.
    pub fn validate(&mut self) {
        let sanitize = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        self.perfect = sanitize(self.perfect);
        self.great = sanitize(self.great).max(self.perfect);
        self.good = sanitize(self.good).max(self.great);
    }

    /// Symmetric judge windows in microseconds.
    pub fn judge_windows(&self) -> JudgeWindowTable {
        [self.perfect, self.great, self.good].map(|secs| {
            let us = seconds_to_us(secs);
            [-us, us]
        })
    }
}

/// Find the tier a timing offset falls into.
///
/// `dmtime` = note_time - press_time. Windows are inclusive on both ends and
/// checked innermost first. Returns `None` outside the GOOD window.
pub fn find_judge_window(dmtime: i64, table: &JudgeWindowTable) -> Option<Judgment> {
    table
        .iter()
        .position(|w| dmtime >= w[0] && dmtime <= w[1])
        .and_then(Judgment::from_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_windows() {
        let table = JudgeProperty::default().judge_windows();
        assert_eq!(
            table,
            [[-150_000, 150_000], [-250_000, 250_000], [-400_000, 400_000]]
        );
    }

    #[test]
    fn boundaries_are_inclusive() {
        let table = JudgeProperty::default().judge_windows();
        assert_eq!(find_judge_window(0, &table), Some(Judgment::Perfect));
        assert_eq!(find_judge_window(150_000, &table), Some(Judgment::Perfect));
        assert_eq!(find_judge_window(-150_000, &table), Some(Judgment::Perfect));
        assert_eq!(find_judge_window(150_001, &table), Some(Judgment::Great));
        assert_eq!(find_judge_window(-250_000, &table), Some(Judgment::Great));
        assert_eq!(find_judge_window(250_001, &table), Some(Judgment::Good));
        assert_eq!(find_judge_window(-400_000, &table), Some(Judgment::Good));
        assert_eq!(find_judge_window(400_001, &table), None);
        assert_eq!(find_judge_window(-400_001, &table), None);
    }

    #[test]
    fn validate_restores_nesting() {
        let mut prop = JudgeProperty {
            perfect: 0.3,
            great: 0.2,
            good: 0.1,
        };
        prop.validate();
        assert_eq!(prop.perfect, 0.3);
        assert_eq!(prop.great, 0.3);
        assert_eq!(prop.good, 0.3);
    }

    #[test]
    fn validate_clamps_negative_and_nan() {
        let mut prop = JudgeProperty {
            perfect: -1.0,
            great: f64::NAN,
            good: 0.4,
        };
        prop.validate();
        assert_eq!(prop.perfect, 0.0);
        assert_eq!(prop.great, 0.0);
        assert_eq!(prop.good, 0.4);
    }

    #[test]
    fn validate_keeps_defaults() {
        let mut prop = JudgeProperty::default();
        prop.validate();
        assert_eq!(prop, JudgeProperty::default());
    }

    #[test]
    fn serde_fills_missing_fields_with_defaults() {
        let prop: JudgeProperty = serde_json::from_str(r#"{"perfect": 0.1}"#).unwrap();
        assert_eq!(prop.perfect, 0.1);
        assert_eq!(prop.great, DEFAULT_GREAT);
        assert_eq!(prop.good, DEFAULT_GOOD);
    }
}
