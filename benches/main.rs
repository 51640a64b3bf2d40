use criterion::{black_box, criterion_group, criterion_main, Criterion};
use micro_rig::fx::{Chain, CleanAmp, FxConfig, FxRack};
use micro_rig::params::ParameterStore;
use micro_rig::tuner::Detector;

const SAMPLE_RATE: f32 = 44100.0;

fn test_block(block_size: usize) -> Vec<f32> {
    (0..block_size)
        .map(|i| {
            let phase = 2.0 * std::f32::consts::PI * 110.0 * (i as f32) / SAMPLE_RATE;
            0.5 * phase.sin()
        })
        .collect()
}

fn run_chain_benchmark<C: Chain>(
    id: &str,
    c: &mut Criterion,
    mut chain: C,
    params: ParameterStore,
    block_size: usize,
) {
    let input_buffer = test_block(block_size);
    let mut output_buffer = vec![0.0; block_size];
    c.bench_function(id, |b| {
        b.iter(|| {
            chain.process(black_box(&input_buffer[..]), &mut output_buffer[..], &params);
        })
    });
}

fn chain_benchmarks(c: &mut Criterion) {
    for block_size in [256, 1024].iter() {
        run_chain_benchmark(
            &format!("Clean amp, block {}", block_size),
            c,
            CleanAmp::default(),
            ParameterStore::clean_amp(),
            *block_size,
        );
        run_chain_benchmark(
            &format!("Effects rack, block {}", block_size),
            c,
            FxRack::new(SAMPLE_RATE, FxConfig::default()),
            ParameterStore::fx_rack(),
            *block_size,
        );
    }
}

fn run_detector_benchmark(id: &str, c: &mut Criterion, window_size: usize) {
    let mut detector = Detector::new(SAMPLE_RATE, window_size);
    // One full window per iteration, so every iteration runs one analysis.
    let input_buffer = test_block(window_size);

    c.bench_function(id, |b| {
        b.iter(|| {
            detector.process(black_box(&input_buffer[..]), |_| {})
        })
    });
}

fn detector_benchmarks(c: &mut Criterion) {
    run_detector_benchmark("Tuner window 512", c, 512);
    run_detector_benchmark("Tuner window 1024", c, 1024);
    run_detector_benchmark("Tuner window 2048", c, 2048);
    run_detector_benchmark("Tuner window 4096", c, 4096);
}

criterion_group!(benches, chain_benchmarks, detector_benchmarks);
criterion_main!(benches);
