// hitline: headless runner for the three-lane timing engine.
//
// Loads a chart (or generates one), replays autoplay or recorded presses
// through a play session and prints the result as JSON.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use hitline_model::{Chart, ChartDecoder, FallbackGenerator, JsonChartFile, load_or_generate};
use hitline_play::{
    Difficulty, KeyInputLog, ManualClock, PlayConfig, PlaySession, create_autoplay_log,
    read_input_log, run_headless,
};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Parser, Debug)]
#[command(name = "hitline", about = "Three-lane rhythm timing engine (headless)")]
struct Args {
    /// Path to the chart JSON file.
    #[arg(long, default_value = "notes.json")]
    chart: PathBuf,

    /// Path to the play config JSON file.
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Difficulty preset, overrides the config (easy, normal, hard).
    #[arg(long)]
    difficulty: Option<String>,

    /// Seed for the fallback chart generator.
    #[arg(long, env = "HITLINE_SEED", default_value_t = 0)]
    seed: u64,

    /// Press every note on time.
    #[arg(long, conflicts_with = "inputs")]
    autoplay: bool,

    /// Recorded presses to replay (JSON array of {time, lane}).
    #[arg(long)]
    inputs: Option<PathBuf>,

    /// Simulation frame rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Track length in seconds; the session ends when it is reached.
    #[arg(long)]
    track_length: Option<f64>,

    /// Write the result JSON here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Also write the chart that was played (loaded or generated) here.
    #[arg(long)]
    dump_chart: Option<PathBuf>,
}

fn dump_chart(chart: &Chart, path: &Path) -> Result<()> {
    let json = ChartDecoder::encode(chart)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write chart {}", path.display()))?;
    info!("Chart written to {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    info!("hitline starting");

    let mut config = PlayConfig::load_or_default(&args.config)?;
    if let Some(name) = &args.difficulty {
        config.difficulty = Difficulty::from_name(name);
    }

    let mut rng = StdRng::seed_from_u64(args.seed);
    let fallback = FallbackGenerator::with_duration(config.fallback_chart_duration);
    let chart = load_or_generate(&JsonChartFile::new(&args.chart), &fallback, &mut rng);
    if let Some(path) = &args.dump_chart {
        dump_chart(&chart, path)?;
    }

    let inputs: Vec<KeyInputLog> = match (&args.inputs, args.autoplay) {
        (Some(path), _) => read_input_log(path)?,
        (None, true) => create_autoplay_log(&chart),
        (None, false) => {
            warn!("No inputs given, every note will be missed");
            Vec::new()
        }
    };

    let clock = match args.track_length {
        Some(length) => ManualClock::with_duration(length),
        None => ManualClock::new(),
    };
    let mut session = PlaySession::start(config, chart, clock);
    let result = run_headless(&mut session, &inputs, args.fps);

    match &args.output {
        Some(path) => {
            result.write(path)?;
            info!("Result written to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(())
}
