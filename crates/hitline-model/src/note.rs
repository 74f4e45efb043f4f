use serde::{Deserialize, Serialize};

use crate::lane::Lane;

/// Convert seconds to microseconds, rounding to the nearest microsecond.
pub fn seconds_to_us(secs: f64) -> i64 {
    (secs * 1_000_000.0).round() as i64
}

/// Largest magnitude a note time may have, in microseconds. Leaves headroom
/// so differences between note and track times cannot overflow.
pub const MAX_TIME_US: i64 = i64::MAX / 2;

/// Convert seconds to microseconds, or `None` when the value is not finite
/// or lies outside `±MAX_TIME_US`.
pub fn checked_seconds_to_us(secs: f64) -> Option<i64> {
    let us = (secs * 1_000_000.0).round();
    (us.is_finite() && us.abs() <= MAX_TIME_US as f64).then_some(us as i64)
}

/// Convert microseconds to seconds.
pub fn us_to_seconds(us: i64) -> f64 {
    us as f64 / 1_000_000.0
}

/// A single note in the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    /// Lane the note falls in
    pub lane: Lane,
    /// Scheduled time in microseconds
    pub time_us: i64,
}

impl Note {
    pub fn new(lane: Lane, time_us: i64) -> Self {
        Self { lane, time_us }
    }

    pub fn from_seconds(lane: Lane, secs: f64) -> Self {
        Self::new(lane, seconds_to_us(secs))
    }

    /// Scheduled time in seconds.
    pub fn time_secs(&self) -> f64 {
        us_to_seconds(self.time_us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_round_trip_to_the_microsecond() {
        assert_eq!(seconds_to_us(5.05), 5_050_000);
        assert_eq!(seconds_to_us(0.15), 150_000);
        assert_eq!(seconds_to_us(0.0), 0);
        assert!((us_to_seconds(5_350_000) - 5.35).abs() < 1e-12);
    }

    #[test]
    fn checked_conversion_rejects_unrepresentable_times() {
        assert_eq!(checked_seconds_to_us(5.05), Some(5_050_000));
        assert_eq!(checked_seconds_to_us(-1.0), Some(-1_000_000));
        assert_eq!(checked_seconds_to_us(1e13), None);
        assert_eq!(checked_seconds_to_us(f64::INFINITY), None);
        assert_eq!(checked_seconds_to_us(f64::NAN), None);
        assert_eq!(checked_seconds_to_us(1e12), Some(1_000_000_000_000_000_000));
    }

    #[test]
    fn from_seconds_rounds_float_noise() {
        // 5.15 - 5.0 is not exactly 0.15 in binary; the microsecond grid absorbs it
        let a = Note::from_seconds(Lane::ALL[0], 5.0);
        let b = Note::from_seconds(Lane::ALL[0], 5.15);
        assert_eq!(b.time_us - a.time_us, 150_000);
    }
}
