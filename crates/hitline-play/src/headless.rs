//! Headless session runner.
//!
//! Steps a [`PlaySession`] on a [`ManualClock`] at a fixed frame rate,
//! replaying recorded presses at their exact times. Used by the CLI, the
//! benches and scenario tests.

use hitline_model::us_to_seconds;
use log::debug;

use crate::clock::{ManualClock, TimeSource};
use crate::input::KeyInputLog;
use crate::result::PlayResult;
use crate::session::PlaySession;

/// Frame length in microseconds for `fps` frames per second.
pub fn frame_step_us(fps: u32) -> i64 {
    1_000_000 / i64::from(fps.max(1))
}

/// Run `session` until it ends.
///
/// Within each frame the presses due up to the frame boundary are applied
/// first, each at its own time, then the frame's update runs at the
/// boundary. `inputs` must be sorted by time; presses earlier than the
/// current clock are applied at the current clock.
pub fn run_headless(
    session: &mut PlaySession<ManualClock>,
    inputs: &[KeyInputLog],
    fps: u32,
) -> PlayResult {
    let step_us = frame_step_us(fps);
    let mut frame_us = session.now_us();
    let mut pending = inputs.iter().peekable();
    let mut frames: u64 = 0;

    while session.is_running() {
        frame_us += step_us;
        while let Some(input) = pending.next_if(|input| input.time_us() <= frame_us) {
            let time = input.time.max(session.clock().now());
            session.clock_mut().set(time);
            session.hit(input.lane);
        }
        session.clock_mut().set(us_to_seconds(frame_us));
        session.update();
        frames += 1;
    }

    debug!(
        "Headless run finished after {frames} frames, {} presses unused",
        pending.count()
    );
    session
        .result()
        .cloned()
        .unwrap_or_else(|| PlayResult::new(session.score()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoplay::create_autoplay_log;
    use crate::config::PlayConfig;
    use hitline_model::{Chart, Lane, Note};
    use hitline_rule::Rank;

    fn chart() -> Chart {
        Chart::new(vec![
            Note::from_seconds(Lane::ALL[0], 2.0),
            Note::from_seconds(Lane::ALL[1], 2.5),
            Note::from_seconds(Lane::ALL[2], 3.0),
            Note::from_seconds(Lane::ALL[0], 3.0),
        ])
    }

    #[test]
    fn frame_step() {
        assert_eq!(frame_step_us(60), 16_666);
        assert_eq!(frame_step_us(0), 1_000_000);
    }

    #[test]
    fn autoplay_is_all_perfect() {
        let chart = chart();
        let log = create_autoplay_log(&chart);
        let mut session = PlaySession::start(PlayConfig::default(), chart, ManualClock::new());
        let result = run_headless(&mut session, &log, 60);
        assert_eq!(result.perfect, 4);
        assert_eq!(result.max_combo, 4);
        assert_eq!(result.rank, Rank::S);
        assert!((session.score().score - 430.0).abs() < 1e-9);
        assert_eq!(result.score, session.score().display_score());
        // Ends on the first frame past last note + grace
        assert!(session.now() > 4.5 && session.now() <= 4.5 + 1.0 / 60.0);
    }

    #[test]
    fn no_input_misses_everything() {
        let mut session = PlaySession::start(PlayConfig::default(), chart(), ManualClock::new());
        let result = run_headless(&mut session, &[], 60);
        assert_eq!(result.miss, 4);
        assert_eq!(result.max_combo, 0);
        assert_eq!(result.rank, Rank::D);
    }

    #[test]
    fn presses_before_clock_are_clamped() {
        let chart = Chart::new(vec![Note::from_seconds(Lane::ALL[0], 0.0)]);
        let mut session = PlaySession::start(PlayConfig::default(), chart, ManualClock::new());
        let inputs = [KeyInputLog::new(-0.1, Lane::ALL[0])];
        let result = run_headless(&mut session, &inputs, 60);
        assert_eq!(result.perfect, 1);
    }
}
