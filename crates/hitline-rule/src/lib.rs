// Judgment tiers, tolerance windows, scoring and rank

mod judge_algorithm;
mod judge_property;
mod judgment;
mod rank;
mod score_data;
mod score_rule;

pub use judge_algorithm::select_nearest;
pub use judge_property::{JudgeProperty, JudgeWindow, JudgeWindowTable, find_judge_window};
pub use judgment::{JUDGE_COUNT, Judgment};
pub use rank::Rank;
pub use score_data::ScoreData;
pub use score_rule::ScoreRule;
