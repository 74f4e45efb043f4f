// Procedural chart generator used when no chart can be loaded

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::chart::Chart;
use crate::lane::{LANE_COUNT, Lane};
use crate::note::{Note, seconds_to_us};

/// Default length of a generated chart in seconds.
pub const DEFAULT_DURATION_SECS: f64 = 42.0;

const DEFAULT_START_US: i64 = 2_000_000;
const DEFAULT_STEP_US: i64 = 500_000;
const DEFAULT_DENSITY: f64 = 0.5;

/// Walks a fixed grid from `start_us` up to (excluding) `duration_us` and
/// places a note in a random lane on each step with probability `density`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallbackGenerator {
    pub start_us: i64,
    pub duration_us: i64,
    pub step_us: i64,
    pub density: f64,
}

impl Default for FallbackGenerator {
    fn default() -> Self {
        Self::with_duration(DEFAULT_DURATION_SECS)
    }
}

impl FallbackGenerator {
    pub fn with_duration(duration_secs: f64) -> Self {
        Self {
            start_us: DEFAULT_START_US,
            duration_us: seconds_to_us(duration_secs),
            step_us: DEFAULT_STEP_US,
            density: DEFAULT_DENSITY,
        }
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Chart {
        if self.step_us <= 0 {
            return Chart::default();
        }
        let density = if self.density.is_nan() {
            0.0
        } else {
            self.density.clamp(0.0, 1.0)
        };

        let mut notes = Vec::new();
        let mut time_us = self.start_us;
        while time_us < self.duration_us {
            if rng.gen_bool(density) {
                let lane = Lane::ALL[rng.gen_range(0..LANE_COUNT)];
                notes.push(Note::new(lane, time_us));
            }
            time_us += self.step_us;
        }
        Chart::new(notes)
    }

    /// Same seed, same chart.
    pub fn generate_seeded(&self, seed: u64) -> Chart {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(&mut rng)
    }
}
