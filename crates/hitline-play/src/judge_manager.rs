//! Judge manager for a play session.
//!
//! Owns the per-note lifecycle of a chart. `update` expires notes that fell
//! past the hit line (the automatic miss path); `key_press` judges a lane
//! press against the nearest live note in that lane. Both feed the same
//! `ScoreData`.

use hitline_model::{Chart, LANE_COUNT, Lane, Note};
use hitline_rule::{
    JudgeProperty, JudgeWindowTable, Judgment, ScoreData, ScoreRule, find_judge_window,
    select_nearest,
};

use crate::event::PlayEvent;

/// Lifecycle of a single note. Leaves `Alive` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteState {
    Alive,
    /// Retired by a successful press
    Hit(Judgment),
    /// Expired without being hit
    Missed,
}

impl NoteState {
    pub fn is_alive(self) -> bool {
        self == NoteState::Alive
    }
}

/// Outcome of a single key press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JudgeResult {
    pub judgment: Judgment,
    /// Index of the retired note; `None` when the press matched nothing
    pub note_index: Option<usize>,
    /// note_time - press_time in microseconds (positive = early)
    pub duration: Option<i64>,
    /// Points added to the score
    pub points: f64,
}

/// Configuration for initializing the JudgeManager.
pub struct JudgeConfig<'a> {
    pub chart: &'a Chart,
    pub judge_property: &'a JudgeProperty,
    pub score_rule: &'a ScoreRule,
    /// Time past a note's scheduled time after which it expires as a miss
    pub miss_threshold_us: i64,
}

pub struct JudgeManager {
    windows: JudgeWindowTable,
    score_rule: ScoreRule,
    miss_threshold_us: i64,

    notes: Vec<Note>,
    note_states: Vec<NoteState>,
    // lane index -> note indices in time order
    lane_notes: Vec<Vec<usize>>,
    // per lane: position in lane_notes before which every note is retired
    lane_cursors: [usize; LANE_COUNT],
    // notes before this index have passed the miss threshold
    pass_cursor: usize,
    alive_count: usize,

    score: ScoreData,
}

impl JudgeManager {
    pub fn new(config: &JudgeConfig<'_>) -> Self {
        let notes = config.chart.notes().to_vec();

        let mut lane_notes: Vec<Vec<usize>> = vec![Vec::new(); LANE_COUNT];
        for (i, note) in notes.iter().enumerate() {
            lane_notes[note.lane.index()].push(i);
        }

        Self {
            windows: config.judge_property.judge_windows(),
            score_rule: *config.score_rule,
            miss_threshold_us: config.miss_threshold_us,
            note_states: vec![NoteState::Alive; notes.len()],
            alive_count: notes.len(),
            score: ScoreData::new(notes.len()),
            lane_notes,
            lane_cursors: [0; LANE_COUNT],
            pass_cursor: 0,
            notes,
        }
    }

    /// Per-tick lifecycle pass.
    ///
    /// Every live note whose scheduled time is more than the miss threshold
    /// behind `time_us` is retired as a MISS and breaks the combo.
    pub fn update(&mut self, time_us: i64) -> Vec<PlayEvent> {
        let mut events = Vec::new();
        while let Some(&note) = self.notes.get(self.pass_cursor) {
            if time_us.saturating_sub(note.time_us) <= self.miss_threshold_us {
                break;
            }
            let index = self.pass_cursor;
            self.pass_cursor += 1;
            if !self.note_states[index].is_alive() {
                continue;
            }
            self.retire(index, NoteState::Missed);
            self.score.record_miss();
            events.push(PlayEvent::Judge {
                lane: note.lane,
                judgment: Judgment::Miss,
                note_index: Some(index),
                duration: None,
                time_us,
            });
        }
        events
    }

    /// Judge a press in `lane` at `time_us`.
    ///
    /// The nearest live note in the lane is retired when it lies inside the
    /// GOOD window. Otherwise the press counts as a MISS and no note is
    /// retired.
    pub fn key_press(
        &mut self,
        lane: Lane,
        time_us: i64,
        events: &mut Vec<PlayEvent>,
    ) -> JudgeResult {
        let lane_index = lane.index();
        self.advance_lane_cursor(lane_index);

        let start = self.lane_cursors[lane_index];
        let candidates = self.lane_notes[lane_index][start..]
            .iter()
            .filter(|&&i| self.note_states[i].is_alive())
            .map(|&i| (i, self.notes[i].time_us));
        let selected = select_nearest(candidates, time_us).and_then(|(index, dmtime)| {
            find_judge_window(dmtime, &self.windows).map(|judgment| (index, dmtime, judgment))
        });

        let Some((index, dmtime, judgment)) = selected else {
            self.score.record_miss();
            events.push(PlayEvent::Judge {
                lane,
                judgment: Judgment::Miss,
                note_index: None,
                duration: None,
                time_us,
            });
            return JudgeResult {
                judgment: Judgment::Miss,
                note_index: None,
                duration: None,
                points: 0.0,
            };
        };

        let points = self.score.record_hit(judgment, dmtime, &self.score_rule);
        self.retire(index, NoteState::Hit(judgment));
        events.push(PlayEvent::Judge {
            lane,
            judgment,
            note_index: Some(index),
            duration: Some(dmtime),
            time_us,
        });
        events.push(PlayEvent::LaneAction { lane, time_us });

        JudgeResult {
            judgment,
            note_index: Some(index),
            duration: Some(dmtime),
            points,
        }
    }

    fn advance_lane_cursor(&mut self, lane_index: usize) {
        let lane = &self.lane_notes[lane_index];
        let cursor = &mut self.lane_cursors[lane_index];
        while *cursor < lane.len() && !self.note_states[lane[*cursor]].is_alive() {
            *cursor += 1;
        }
    }

    fn retire(&mut self, index: usize, state: NoteState) {
        debug_assert!(self.note_states[index].is_alive());
        debug_assert!(!state.is_alive());
        self.note_states[index] = state;
        self.alive_count -= 1;
    }

    // --- Getters ---

    pub fn score(&self) -> &ScoreData {
        &self.score
    }

    pub fn combo(&self) -> u32 {
        self.score.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.score.max_combo
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note_state(&self, index: usize) -> Option<NoteState> {
        self.note_states.get(index).copied()
    }

    pub fn alive_count(&self) -> usize {
        self.alive_count
    }

    /// True once no note is alive.
    pub fn all_resolved(&self) -> bool {
        self.alive_count == 0
    }

    /// Live notes with their chart index, in time order.
    pub fn alive_notes(&self) -> impl Iterator<Item = (usize, &Note)> {
        self.notes
            .iter()
            .enumerate()
            .skip(self.pass_cursor)
            .filter(|(i, _)| self.note_states[*i].is_alive())
    }

    pub fn miss_threshold_us(&self) -> i64 {
        self.miss_threshold_us
    }
}
