// Time sources driving a play session.
//
// The playing track is the single time authority. Sessions read it through
// `TimeSource`, which lets tests and the headless runner inject a clock that
// is moved by hand.

use std::time::Instant;

use anyhow::Result;

/// Playback position provider for a session.
pub trait TimeSource {
    /// Current playback position in seconds.
    fn now(&self) -> f64;

    /// Whether the track has finished playing.
    fn is_ended(&self) -> bool;

    /// Start playback. An error means the track could not play.
    fn start(&mut self) -> Result<()> {
        Ok(())
    }

    /// Pause playback. Called once when the session ends.
    fn pause(&mut self) {}
}

/// Clock whose position is set explicitly.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    position: f64,
    duration: Option<f64>,
    paused: bool,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock that reports ended once its position reaches `duration` seconds.
    pub fn with_duration(duration: f64) -> Self {
        Self {
            duration: Some(duration),
            ..Self::default()
        }
    }

    pub fn set(&mut self, position: f64) {
        self.position = position;
    }

    pub fn advance(&mut self, delta: f64) {
        self.position += delta;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> f64 {
        self.position
    }

    fn is_ended(&self) -> bool {
        self.duration.is_some_and(|d| self.position >= d)
    }

    fn pause(&mut self) {
        self.paused = true;
    }
}

/// Wall-clock timeline of a fixed length.
///
/// Stands in for the track when audio cannot start, so a session without
/// sound still advances and ends.
#[derive(Debug, Clone)]
pub struct WallClock {
    start_instant: Instant,
    duration: f64,
    paused_at: Option<f64>,
}

impl WallClock {
    /// Start a timeline at 0 that ends after `duration` seconds.
    pub fn start_now(duration: f64) -> Self {
        Self {
            start_instant: Instant::now(),
            duration,
            paused_at: None,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }
}

impl TimeSource for WallClock {
    fn now(&self) -> f64 {
        self.paused_at
            .unwrap_or_else(|| self.start_instant.elapsed().as_secs_f64())
    }

    fn is_ended(&self) -> bool {
        self.now() >= self.duration
    }

    fn pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(self.now());
        }
    }
}
