// Chart data model: lanes, notes, chart decoding and fallback generation

mod chart;
mod fallback;
mod lane;
mod note;

pub use chart::{Chart, ChartDecoder, ChartSource, JsonChartFile, load_or_generate};
pub use fallback::FallbackGenerator;
pub use lane::{LANE_COUNT, Lane};
pub use note::{MAX_TIME_US, Note, checked_seconds_to_us, seconds_to_us, us_to_seconds};
