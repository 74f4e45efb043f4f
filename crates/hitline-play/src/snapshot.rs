// Read-only view of a session for a renderer.

use hitline_model::{LANE_COUNT, Lane};
use hitline_rule::Judgment;
use serde::Serialize;

/// A live note positioned relative to the hit line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NoteView {
    pub index: usize,
    pub lane: Lane,
    /// Distance above the hit line in pixels; negative once it has passed
    pub offset_px: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaySnapshot {
    /// Track time in seconds
    pub time: f64,
    pub notes: Vec<NoteView>,
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    /// Latest judgment while it is still on screen
    pub judgment: Option<Judgment>,
    pub lane_flash: [bool; LANE_COUNT],
    pub speed_multiplier: f64,
    pub running: bool,
}
