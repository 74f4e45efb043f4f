/// Autoplay log generation.
///
/// Produces one press per note at the note's exact time, in chart order, so
/// replaying the log through a session judges every note PERFECT.
use hitline_model::Chart;

use crate::input::KeyInputLog;

pub fn create_autoplay_log(chart: &Chart) -> Vec<KeyInputLog> {
    chart
        .notes()
        .iter()
        .map(|note| KeyInputLog::new(note.time_secs(), note.lane))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hitline_model::{Lane, Note};

    #[test]
    fn one_press_per_note() {
        let chart = Chart::new(vec![
            Note::new(Lane::ALL[2], 2_500_000),
            Note::new(Lane::ALL[0], 1_000_000),
        ]);
        let log = create_autoplay_log(&chart);
        assert_eq!(
            log,
            vec![
                KeyInputLog::new(1.0, Lane::ALL[0]),
                KeyInputLog::new(2.5, Lane::ALL[2]),
            ]
        );
    }

    #[test]
    fn empty_chart_gives_empty_log() {
        assert!(create_autoplay_log(&Chart::default()).is_empty());
    }
}
