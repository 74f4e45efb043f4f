use std::fmt;
use std::path::Path;

use anyhow::Result;
use hitline_model::seconds_to_us;
use hitline_rule::{JudgeProperty, ScoreRule};
use log::info;
use serde::{Deserialize, Serialize};

use crate::input::KeyMap;

/// Fall speed parameters of a difficulty preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyPreset {
    pub speed_multiplier: f64,
    /// Note fall speed in pixels per second
    pub pixels_per_second: f64,
}

/// Named difficulty presets.
///
/// Parsed leniently: an unknown name selects `Easy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "normal" => Difficulty::Normal,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn preset(self) -> DifficultyPreset {
        let (speed_multiplier, pixels_per_second) = match self {
            Difficulty::Easy => (0.9, 420.0),
            Difficulty::Normal => (1.0, 520.0),
            Difficulty::Hard => (1.2, 600.0),
        };
        DifficultyPreset {
            speed_multiplier,
            pixels_per_second,
        }
    }
}

impl From<String> for Difficulty {
    fn from(name: String) -> Self {
        Difficulty::from_name(&name)
    }
}

impl From<Difficulty> for String {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.name().to_string()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Play session configuration. Durations are in seconds, distances in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    pub difficulty: Difficulty,
    pub judge: JudgeProperty,
    pub score: ScoreRule,
    /// Time after the last note before a fully resolved chart ends the session
    pub end_grace: f64,
    /// Length of the generated chart when no chart can be loaded
    pub fallback_chart_duration: f64,
    /// Minimum session length when the track cannot play
    pub no_audio_duration: f64,
    /// Distance a note travels from spawn to the hit line
    pub hit_line_offset_px: f64,
    /// Distance past the hit line after which an untouched note is missed
    pub miss_overshoot_px: f64,
    /// How long a judgment label stays visible
    pub judge_display_duration: f64,
    /// How long a lane flashes after a hit
    pub lane_flash_duration: f64,
    pub key_map: KeyMap,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            judge: JudgeProperty::default(),
            score: ScoreRule::default(),
            end_grace: 1.5,
            fallback_chart_duration: 42.0,
            no_audio_duration: 42.0,
            hit_line_offset_px: 500.0,
            miss_overshoot_px: 160.0,
            judge_display_duration: 0.6,
            lane_flash_duration: 0.3,
            key_map: KeyMap::default(),
        }
    }
}

/// Upper bound for a generated fallback chart, in seconds.
const MAX_FALLBACK_CHART_SECS: f64 = 3_600.0;

fn non_negative(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { fallback }
}

impl PlayConfig {
    /// Clamp values into a usable range.
    pub fn validate(&mut self) {
        let defaults = Self::default();
        self.judge.validate();
        self.score.validate();
        self.end_grace = non_negative(self.end_grace, defaults.end_grace);
        self.fallback_chart_duration =
            non_negative(self.fallback_chart_duration, defaults.fallback_chart_duration)
                .min(MAX_FALLBACK_CHART_SECS);
        self.no_audio_duration = non_negative(self.no_audio_duration, defaults.no_audio_duration);
        self.hit_line_offset_px =
            non_negative(self.hit_line_offset_px, defaults.hit_line_offset_px);
        self.miss_overshoot_px = non_negative(self.miss_overshoot_px, defaults.miss_overshoot_px);
        self.judge_display_duration =
            non_negative(self.judge_display_duration, defaults.judge_display_duration);
        self.lane_flash_duration =
            non_negative(self.lane_flash_duration, defaults.lane_flash_duration);
    }

    /// Time past a note's scheduled time after which an untouched note is
    /// missed, in microseconds.
    pub fn miss_threshold_us(&self) -> i64 {
        let pps = self.difficulty.preset().pixels_per_second;
        seconds_to_us((self.hit_line_offset_px + self.miss_overshoot_px) / pps)
    }

    /// Read config from a JSON file.
    pub fn read(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let mut config: PlayConfig = serde_json::from_str(&data)?;
        config.validate();
        Ok(config)
    }

    /// Read config, returning defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let config = Self::read(path)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write config to a JSON file.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
