use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hitline_model::{Chart, FallbackGenerator};
use hitline_play::{
    JudgeConfig, JudgeManager, ManualClock, PlayConfig, PlaySession, create_autoplay_log,
    run_headless,
};
use hitline_rule::{JudgeProperty, ScoreRule, select_nearest};

fn bench_chart() -> Chart {
    let generator = FallbackGenerator {
        step_us: 100_000,
        density: 0.8,
        ..FallbackGenerator::with_duration(300.0)
    };
    generator.generate_seeded(42)
}

fn bench_judge_manager_new(c: &mut Criterion) {
    let chart = bench_chart();
    let jp = JudgeProperty::default();
    let rule = ScoreRule::default();
    let config = JudgeConfig {
        chart: &chart,
        judge_property: &jp,
        score_rule: &rule,
        miss_threshold_us: PlayConfig::default().miss_threshold_us(),
    };

    c.bench_function("judge_manager_new", |b| {
        b.iter(|| JudgeManager::new(&config));
    });
}

fn bench_lifecycle_only(c: &mut Criterion) {
    let chart = bench_chart();
    let jp = JudgeProperty::default();
    let rule = ScoreRule::default();

    c.bench_function("lifecycle_only", |b| {
        b.iter(|| {
            let config = JudgeConfig {
                chart: &chart,
                judge_property: &jp,
                score_rule: &rule,
                miss_threshold_us: 1_000_000,
            };
            let mut jm = JudgeManager::new(&config);

            // Simulate time progression through the chart without input
            let end_time = chart.last_note_time_us() + 1_000_001;
            let step = 16_666; // ~60fps
            let mut time = 0i64;
            while time <= end_time {
                black_box(jm.update(time));
                time += step;
            }
        });
    });
}

fn bench_autoplay_simulation(c: &mut Criterion) {
    let chart = bench_chart();
    let log = create_autoplay_log(&chart);

    c.bench_function("autoplay_simulation", |b| {
        b.iter(|| {
            let mut session =
                PlaySession::start(PlayConfig::default(), chart.clone(), ManualClock::new());
            black_box(run_headless(&mut session, &log, 60));
        });
    });
}

fn bench_select_nearest(c: &mut Criterion) {
    let candidates: Vec<(usize, i64)> = (0..64).map(|i| (i, i as i64 * 250_000)).collect();

    c.bench_function("select_nearest", |b| {
        b.iter(|| select_nearest(candidates.iter().copied(), black_box(8_100_000)));
    });
}

criterion_group!(
    benches,
    bench_judge_manager_new,
    bench_lifecycle_only,
    bench_autoplay_simulation,
    bench_select_nearest
);
criterion_main!(benches);
