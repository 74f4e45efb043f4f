// Keyboard mapping and recorded lane input

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use hitline_model::{Lane, seconds_to_us};
use serde::{Deserialize, Serialize};

/// Keyboard key → lane mapping.
///
/// Keys are matched case-insensitively against the key's text, so `"A"` and
/// `"a"` press the same lane and `" "` is the space bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyMap {
    keys: BTreeMap<String, Lane>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut keys = BTreeMap::new();
        for (key, lane) in [("a", Lane::ALL[0]), ("s", Lane::ALL[1]), (" ", Lane::ALL[2])] {
            keys.insert(key.to_string(), lane);
        }
        Self { keys }
    }
}

impl KeyMap {
    pub fn empty() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    /// Bind a key to a lane, replacing any previous binding of that key.
    pub fn bind(&mut self, key: &str, lane: Lane) {
        self.keys.insert(key.to_lowercase(), lane);
    }

    /// Lane bound to `key`, or `None` for unmapped keys.
    pub fn lane_for_key(&self, key: &str) -> Option<Lane> {
        self.keys.get(&key.to_lowercase()).copied()
    }

    pub fn keys_for_lane(&self, lane: Lane) -> impl Iterator<Item = &str> {
        self.keys
            .iter()
            .filter(move |(_, l)| **l == lane)
            .map(|(k, _)| k.as_str())
    }
}

/// A single recorded lane press.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyInputLog {
    /// Press time in seconds on the track timeline
    pub time: f64,
    pub lane: Lane,
}

impl KeyInputLog {
    pub fn new(time: f64, lane: Lane) -> Self {
        Self { time, lane }
    }

    pub fn time_us(&self) -> i64 {
        seconds_to_us(self.time)
    }
}

/// Read a JSON array of presses, sorted by time.
pub fn read_input_log(path: &Path) -> Result<Vec<KeyInputLog>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input log {}", path.display()))?;
    let mut log: Vec<KeyInputLog> = serde_json::from_str(&data)
        .with_context(|| format!("invalid input log {}", path.display()))?;
    log.retain(|input| input.time.is_finite());
    log.sort_by_key(KeyInputLog::time_us);
    Ok(log)
}
