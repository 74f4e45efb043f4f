//! Play session: ties a chart, a time source and the judge manager together.
//!
//! The session is advanced by its owner. Each frame the owner feeds key
//! presses through [`PlaySession::hit`] or [`PlaySession::key_down`] and then
//! calls [`PlaySession::update`], which expires overdue notes and checks
//! whether the session is over. All times are read from the time source, so
//! judgment follows the track position rather than frame timing.

use hitline_model::{Chart, LANE_COUNT, Lane, seconds_to_us, us_to_seconds};
use hitline_rule::{Judgment, ScoreData};
use log::{debug, info, warn};

use crate::clock::{TimeSource, WallClock};
use crate::config::{DifficultyPreset, PlayConfig};
use crate::event::{JudgeDisplay, PlayEvent};
use crate::judge_manager::{JudgeConfig, JudgeManager, JudgeResult};
use crate::result::PlayResult;
use crate::snapshot::{NoteView, PlaySnapshot};

pub struct PlaySession<C: TimeSource> {
    clock: C,
    // Replaces `clock` when the track fails to start
    fallback_clock: Option<WallClock>,
    config: PlayConfig,
    preset: DifficultyPreset,
    chart: Chart,
    judge: JudgeManager,
    last_note_time_us: i64,
    end_grace_us: i64,
    running: bool,

    last_judge: Option<JudgeDisplay>,
    lane_flash_until: [i64; LANE_COUNT],
    events: Vec<PlayEvent>,
    result: Option<PlayResult>,
}

impl<C: TimeSource> PlaySession<C> {
    /// Start a session: validate the config, build the judge state and start
    /// the track.
    ///
    /// A track that fails to start does not abort the session. Timing then
    /// comes from a wall clock lasting `no_audio_duration`, extended so the
    /// last note can still be reached.
    pub fn start(mut config: PlayConfig, chart: Chart, mut clock: C) -> Self {
        config.validate();
        let preset = config.difficulty.preset();
        let judge = JudgeManager::new(&JudgeConfig {
            chart: &chart,
            judge_property: &config.judge,
            score_rule: &config.score,
            miss_threshold_us: config.miss_threshold_us(),
        });
        let last_note_time_us = chart.last_note_time_us();
        let end_grace_us = seconds_to_us(config.end_grace);

        let fallback_clock = match clock.start() {
            Ok(()) => None,
            Err(e) => {
                let duration = config
                    .no_audio_duration
                    .max(us_to_seconds(last_note_time_us) + config.end_grace);
                warn!("Track failed to start: {e:#}, timing from a {duration:.1}s wall clock");
                Some(WallClock::start_now(duration))
            }
        };

        info!(
            "Session started: {} notes, difficulty {}, miss after {}us",
            chart.len(),
            config.difficulty,
            judge.miss_threshold_us()
        );
        for lane in Lane::ALL {
            let keys: Vec<&str> = config.key_map.keys_for_lane(lane).collect();
            debug!("Lane {lane}: {} notes, keys {keys:?}", chart.lane_note_count(lane));
        }

        Self {
            clock,
            fallback_clock,
            config,
            preset,
            chart,
            judge,
            last_note_time_us,
            end_grace_us,
            running: true,
            last_judge: None,
            lane_flash_until: [i64::MIN; LANE_COUNT],
            events: Vec::new(),
            result: None,
        }
    }

    /// Start a fresh session on the same chart and config.
    pub fn retry(self, clock: C) -> Self {
        info!("Retrying session");
        Self::start(self.config, self.chart, clock)
    }

    /// Current track time in seconds.
    pub fn now(&self) -> f64 {
        match &self.fallback_clock {
            Some(clock) => clock.now(),
            None => self.clock.now(),
        }
    }

    pub fn now_us(&self) -> i64 {
        seconds_to_us(self.now())
    }

    fn track_ended(&self) -> bool {
        match &self.fallback_clock {
            Some(clock) => clock.is_ended(),
            None => self.clock.is_ended(),
        }
    }

    /// Per-frame step: expire overdue notes, then check for the end.
    ///
    /// Does nothing once the session has ended.
    pub fn update(&mut self) {
        if !self.running {
            return;
        }
        let now_us = self.now_us();
        let expired = self.judge.update(now_us);
        self.record_events(expired);

        if self.is_over(now_us) {
            self.finish(now_us);
        }
    }

    /// The session is over when the track ended, or when every note is
    /// resolved and the grace period after the last note has passed.
    fn is_over(&self, now_us: i64) -> bool {
        self.track_ended()
            || (self.judge.all_resolved()
                && now_us > self.last_note_time_us.saturating_add(self.end_grace_us))
    }

    fn finish(&mut self, now_us: i64) {
        self.running = false;
        self.clock.pause();
        if let Some(clock) = &mut self.fallback_clock {
            clock.pause();
        }
        let result = PlayResult::new(self.judge.score());
        info!(
            "Session ended at {:.3}s: score {}, rank {}, max combo {}",
            us_to_seconds(now_us),
            result.score,
            result.rank,
            result.max_combo
        );
        self.events.push(PlayEvent::SessionEnd { time_us: now_us });
        self.result = Some(result);
    }

    /// Press `lane` at the current track time.
    ///
    /// Returns `None` when the session has already ended.
    pub fn hit(&mut self, lane: Lane) -> Option<JudgeResult> {
        if !self.running {
            return None;
        }
        let now_us = self.now_us();
        let mut events = Vec::new();
        let result = self.judge.key_press(lane, now_us, &mut events);
        self.record_events(events);
        Some(result)
    }

    /// Press a keyboard key. Unmapped keys are ignored.
    pub fn key_down(&mut self, key: &str) -> Option<JudgeResult> {
        let lane = self.config.key_map.lane_for_key(key)?;
        self.hit(lane)
    }

    fn record_events(&mut self, events: Vec<PlayEvent>) {
        for event in &events {
            match *event {
                PlayEvent::Judge {
                    judgment, time_us, ..
                } => {
                    let duration_us = seconds_to_us(self.config.judge_display_duration);
                    self.last_judge = Some(JudgeDisplay::new(judgment, time_us, duration_us));
                }
                PlayEvent::LaneAction { lane, time_us } => {
                    let duration_us = seconds_to_us(self.config.lane_flash_duration);
                    self.lane_flash_until[lane.index()] = time_us.saturating_add(duration_us);
                }
                PlayEvent::SessionEnd { .. } => {}
            }
        }
        self.events.extend(events);
    }

    /// Take the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<PlayEvent> {
        std::mem::take(&mut self.events)
    }

    /// Latest judgment if it is still on screen.
    pub fn visible_judgment(&self) -> Option<Judgment> {
        let now_us = self.now_us();
        self.last_judge
            .filter(|display| display.is_visible(now_us))
            .map(|display| display.judgment)
    }

    pub fn is_lane_flashing(&self, lane: Lane) -> bool {
        self.now_us() < self.lane_flash_until[lane.index()]
    }

    pub fn snapshot(&self) -> PlaySnapshot {
        let now_us = self.now_us();
        let pps = self.preset.pixels_per_second;
        let notes = self
            .judge
            .alive_notes()
            .map(|(index, note)| NoteView {
                index,
                lane: note.lane,
                offset_px: us_to_seconds(note.time_us.saturating_sub(now_us)) * pps,
            })
            .collect();
        PlaySnapshot {
            time: self.now(),
            notes,
            score: self.judge.score().display_score(),
            combo: self.judge.combo(),
            max_combo: self.judge.max_combo(),
            judgment: self.visible_judgment(),
            lane_flash: Lane::ALL.map(|lane| self.is_lane_flashing(lane)),
            speed_multiplier: self.preset.speed_multiplier,
            running: self.running,
        }
    }

    // --- Getters ---

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn score(&self) -> &ScoreData {
        self.judge.score()
    }

    /// Frozen result, available once the session has ended.
    pub fn result(&self) -> Option<&PlayResult> {
        self.result.as_ref()
    }

    pub fn judge_manager(&self) -> &JudgeManager {
        &self.judge
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn config(&self) -> &PlayConfig {
        &self.config
    }

    pub fn preset(&self) -> DifficultyPreset {
        self.preset
    }

    pub fn last_note_time_us(&self) -> i64 {
        self.last_note_time_us
    }

    /// True when the track failed to start and a wall clock drives timing.
    pub fn uses_fallback_clock(&self) -> bool {
        self.fallback_clock.is_some()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}
