// Presentation notifications emitted by a play session.
//
// Events never feed back into gameplay state; a presentation layer may drop
// them without affecting scoring.

use hitline_model::Lane;
use hitline_rule::Judgment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayEvent {
    /// A note expired, a note was hit, or a press found nothing to hit.
    Judge {
        lane: Lane,
        judgment: Judgment,
        /// Index of the retired note; `None` for a press that matched nothing
        note_index: Option<usize>,
        /// note_time - press_time in microseconds (positive = early)
        duration: Option<i64>,
        time_us: i64,
    },
    /// A successful hit in this lane, for hit effects.
    LaneAction { lane: Lane, time_us: i64 },
    /// The session finished.
    SessionEnd { time_us: i64 },
}

/// The latest judgment label and how long it stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeDisplay {
    pub judgment: Judgment,
    /// When the judgment happened (microseconds on the track timeline)
    pub time_us: i64,
    /// First instant at which the label is no longer shown
    pub expires_us: i64,
}

impl JudgeDisplay {
    pub fn new(judgment: Judgment, time_us: i64, duration_us: i64) -> Self {
        Self {
            judgment,
            time_us,
            expires_us: time_us.saturating_add(duration_us),
        }
    }

    pub fn is_visible(&self, now_us: i64) -> bool {
        now_us < self.expires_us
    }

    pub fn label(&self) -> &'static str {
        self.judgment.label()
    }
}
