/// Select the candidate note closest in time to a key press.
///
/// `candidates` yields `(note_index, note_time_us)` pairs in chart order
/// (ascending time). Returns the winning `(note_index, dmtime)` where
/// `dmtime = note_time - press_time` (positive = early press).
///
/// Ties on distance keep the first candidate seen. Because candidates are
/// time-ordered, the scan stops at the first note past the press time that
/// is no closer than the current best.
pub fn select_nearest<I>(candidates: I, press_time: i64) -> Option<(usize, i64)>
where
    I: IntoIterator<Item = (usize, i64)>,
{
    let mut best: Option<(usize, i64)> = None;
    for (index, note_time) in candidates {
        let dmtime = note_time.saturating_sub(press_time);
        match best {
            Some((_, best_dmtime)) if dmtime.unsigned_abs() >= best_dmtime.unsigned_abs() => {
                if dmtime >= 0 {
                    break;
                }
            }
            _ => best = Some((index, dmtime)),
        }
    }
    best
}
