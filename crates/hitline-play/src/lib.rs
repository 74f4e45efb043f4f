// Play session runtime: time sources, judgment, session lifecycle and results

pub mod autoplay;
pub mod clock;
pub mod config;
pub mod event;
pub mod headless;
pub mod input;
pub mod judge_manager;
pub mod result;
pub mod session;
pub mod snapshot;

pub use autoplay::create_autoplay_log;
pub use clock::{ManualClock, TimeSource, WallClock};
pub use config::{Difficulty, DifficultyPreset, PlayConfig};
pub use event::{JudgeDisplay, PlayEvent};
pub use headless::{frame_step_us, run_headless};
pub use input::{KeyInputLog, KeyMap, read_input_log};
pub use judge_manager::{JudgeConfig, JudgeManager, JudgeResult, NoteState};
pub use result::PlayResult;
pub use session::PlaySession;
pub use snapshot::{NoteView, PlaySnapshot};
