// Chart container, JSON chart decoder and chart sources

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use rand::Rng;
use serde_json::Value;

use crate::fallback::FallbackGenerator;
use crate::lane::Lane;
use crate::note::{MAX_TIME_US, Note, checked_seconds_to_us, us_to_seconds};

/// Ordered note list for one play-through.
///
/// Notes are kept sorted by scheduled time. The sort is stable, so notes
/// sharing a time keep their source order. Notes further than
/// `MAX_TIME_US` from zero are discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chart {
    notes: Vec<Note>,
}

impl Chart {
    pub fn new(mut notes: Vec<Note>) -> Self {
        notes.retain(|n| n.time_us.unsigned_abs() <= MAX_TIME_US as u64);
        notes.sort_by_key(|n| n.time_us);
        Self { notes }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Time of the last scheduled note in microseconds, never below zero.
    pub fn last_note_time_us(&self) -> i64 {
        self.notes.iter().map(|n| n.time_us).max().unwrap_or(0).max(0)
    }

    /// Number of notes in the given lane.
    pub fn lane_note_count(&self, lane: Lane) -> usize {
        self.notes.iter().filter(|n| n.lane == lane).count()
    }
}

/// Decoder for the JSON chart format: an array of `{ "time": seconds, "lane": 0|1|2 }`.
pub struct ChartDecoder;

impl ChartDecoder {
    pub fn decode(path: &Path) -> Result<Chart> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read chart {}", path.display()))?;
        Self::decode_str(&data).with_context(|| format!("invalid chart {}", path.display()))
    }

    /// Decode a chart from JSON text.
    ///
    /// Fails when the text is not JSON or not an array. Entries that are not
    /// valid notes are dropped individually.
    pub fn decode_str(data: &str) -> Result<Chart> {
        let value: Value = serde_json::from_str(data)?;
        let Value::Array(entries) = value else {
            bail!("chart root must be an array of notes");
        };

        let notes: Vec<Note> = entries.iter().filter_map(decode_entry).collect();
        let dropped = entries.len() - notes.len();
        if dropped > 0 {
            debug!("dropped {dropped} invalid chart entries");
        }
        Ok(Chart::new(notes))
    }

    /// Encode a chart back to the JSON chart format.
    pub fn encode(chart: &Chart) -> Result<String> {
        let entries: Vec<Value> = chart
            .notes()
            .iter()
            .map(|n| serde_json::json!({ "time": us_to_seconds(n.time_us), "lane": n.lane }))
            .collect();
        Ok(serde_json::to_string_pretty(&entries)?)
    }
}

/// Validate a single chart entry.
///
/// `time` must be a non-negative number of seconds that fits the microsecond
/// timeline; `lane` must be a number with an integral value in the lane range.
fn decode_entry(entry: &Value) -> Option<Note> {
    let time = entry.get("time")?.as_f64()?;
    if time < 0.0 {
        return None;
    }
    let time_us = checked_seconds_to_us(time)?;
    let lane = entry.get("lane")?.as_f64()?;
    if lane.fract() != 0.0 || lane < 0.0 {
        return None;
    }
    let lane = Lane::new(lane as usize)?;
    Some(Note::new(lane, time_us))
}

/// Anything that can supply a chart at session start.
pub trait ChartSource {
    /// Short human-readable origin, used in log output.
    fn describe(&self) -> String;

    fn load(&self) -> Result<Chart>;
}

/// Chart backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonChartFile {
    path: PathBuf,
}

impl JsonChartFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChartSource for JsonChartFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Chart> {
        ChartDecoder::decode(&self.path)
    }
}

/// An already built chart.
impl ChartSource for Chart {
    fn describe(&self) -> String {
        format!("in-memory chart ({} notes)", self.len())
    }

    fn load(&self) -> Result<Chart> {
        Ok(self.clone())
    }
}

/// Load a chart, generating a fallback chart when the source fails or has no
/// valid notes. Never fails: a session can always start.
pub fn load_or_generate<R: Rng + ?Sized>(
    source: &dyn ChartSource,
    fallback: &FallbackGenerator,
    rng: &mut R,
) -> Chart {
    match source.load() {
        Ok(chart) if !chart.is_empty() => {
            info!("Loaded {} notes from {}", chart.len(), source.describe());
            return chart;
        }
        Ok(_) => warn!(
            "{} contains no valid notes, generating fallback chart",
            source.describe()
        ),
        Err(e) => warn!("Chart load failed: {e:#}, generating fallback chart"),
    }
    let chart = fallback.generate(rng);
    info!("Generated fallback chart with {} notes", chart.len());
    chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Write;

    fn lane(i: usize) -> Lane {
        Lane::new(i).unwrap()
    }

    #[test]
    fn decode_valid_chart() {
        let chart = ChartDecoder::decode_str(
            r#"[{"time": 2.0, "lane": 0}, {"time": 2.5, "lane": 2}, {"time": 3.0, "lane": 1}]"#,
        )
        .unwrap();
        assert_eq!(
            chart.notes(),
            &[
                Note::new(lane(0), 2_000_000),
                Note::new(lane(2), 2_500_000),
                Note::new(lane(1), 3_000_000),
            ]
        );
    }

    #[test]
    fn decode_sorts_by_time_keeping_source_order_for_ties() {
        let chart = ChartDecoder::decode_str(
            r#"[{"time": 4.0, "lane": 0}, {"time": 1.0, "lane": 2}, {"time": 1.0, "lane": 1}]"#,
        )
        .unwrap();
        let lanes: Vec<usize> = chart.notes().iter().map(|n| n.lane.index()).collect();
        assert_eq!(lanes, vec![2, 1, 0]);
    }

    #[test]
    fn decode_drops_invalid_entries() {
        let chart = ChartDecoder::decode_str(
            r#"[
                {"time": 1.0, "lane": 0},
                {"time": "2.0", "lane": 0},
                {"time": 2.0, "lane": 3},
                {"time": 2.0, "lane": -1},
                {"time": 2.0, "lane": 1.5},
                {"time": 2.0, "lane": "1"},
                {"time": -1.0, "lane": 1},
                {"lane": 1},
                {"time": 3.0},
                42,
                {"time": 5.0, "lane": 2.0}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            chart.notes(),
            &[Note::new(lane(0), 1_000_000), Note::new(lane(2), 5_000_000)]
        );
    }

    #[test]
    fn decode_drops_times_beyond_the_timeline() {
        let chart = ChartDecoder::decode_str(
            r#"[{"time": 1e13, "lane": 0}, {"time": 1.0, "lane": 1}]"#,
        )
        .unwrap();
        assert_eq!(chart.notes(), &[Note::new(lane(1), 1_000_000)]);
        assert_eq!(chart.last_note_time_us(), 1_000_000);
    }

    #[test]
    fn new_discards_notes_off_the_timeline() {
        let chart = Chart::new(vec![
            Note::new(lane(0), i64::MAX),
            Note::new(lane(1), i64::MIN),
            Note::new(lane(2), MAX_TIME_US),
        ]);
        assert_eq!(chart.notes(), &[Note::new(lane(2), MAX_TIME_US)]);
    }

    #[test]
    fn decode_rejects_non_array_root() {
        assert!(ChartDecoder::decode_str(r#"{"time": 1.0, "lane": 0}"#).is_err());
        assert!(ChartDecoder::decode_str("not json").is_err());
    }

    #[test]
    fn encode_then_decode_preserves_notes() {
        let chart = Chart::new(vec![
            Note::new(lane(1), 2_000_000),
            Note::new(lane(0), 2_500_000),
        ]);
        let json = ChartDecoder::encode(&chart).unwrap();
        assert_eq!(ChartDecoder::decode_str(&json).unwrap(), chart);
    }

    #[test]
    fn last_note_time_clamps_to_zero() {
        assert_eq!(Chart::default().last_note_time_us(), 0);
        let chart = Chart::new(vec![
            Note::new(lane(0), 7_000_000),
            Note::new(lane(1), 3_000_000),
        ]);
        assert_eq!(chart.last_note_time_us(), 7_000_000);
        assert_eq!(chart.lane_note_count(lane(1)), 1);
    }

    #[test]
    fn json_file_source_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"time": 5.0, "lane": 1}}]"#).unwrap();
        let source = JsonChartFile::new(file.path());
        let chart = source.load().unwrap();
        assert_eq!(chart.notes(), &[Note::new(lane(1), 5_000_000)]);
    }

    #[test]
    fn missing_file_falls_back_to_generated_chart() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonChartFile::new(dir.path().join("notes.json"));
        assert!(source.load().is_err());

        let mut rng = StdRng::seed_from_u64(7);
        let chart = load_or_generate(&source, &FallbackGenerator::default(), &mut rng);
        assert!(!chart.is_empty());
    }

    #[test]
    fn empty_chart_falls_back_to_generated_chart() {
        let mut rng = StdRng::seed_from_u64(7);
        let chart = load_or_generate(&Chart::default(), &FallbackGenerator::default(), &mut rng);
        assert!(!chart.is_empty());
        assert!(chart.notes().iter().all(|n| n.time_us >= 2_000_000));
    }

    #[test]
    fn valid_source_is_used_as_is() {
        let source = Chart::new(vec![Note::new(lane(2), 9_000_000)]);
        let mut rng = StdRng::seed_from_u64(7);
        let chart = load_or_generate(&source, &FallbackGenerator::default(), &mut rng);
        assert_eq!(chart, source);
    }
}
