//! Criterion benchmarks for impulse synthesis and engine setup.
//!
//! - **Impulse** - decaying-noise generation at common sample rates
//! - **Init** - full node chain build on the offline host, impulse included
//!
//! Run with: `cargo bench -p estudio-core`
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use estudio_core::{AudioEngine, EngineConfig, ImpulseResponse, MediaElement, OfflineGraph, Preset};
use rand::SeedableRng;
use rand::rngs::StdRng;

const SAMPLE_RATES: &[f32] = &[22050.0, 44100.0, 48000.0, 96000.0];

fn bench_impulse(c: &mut Criterion) {
    let mut group = c.benchmark_group("impulse/synthesize");

    for &sr in SAMPLE_RATES {
        group.bench_with_input(BenchmarkId::from_parameter(sr as u32), &sr, |b, &sr| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| {
                black_box(ImpulseResponse::synthesize(
                    black_box(sr),
                    2.0,
                    2.0,
                    &mut rng,
                ))
            });
        });
    }

    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");

    group.bench_function("init_and_route", |b| {
        b.iter(|| {
            let mut engine = AudioEngine::with_config(
                OfflineGraph::new(48000.0),
                EngineConfig::default().with_seed(1).with_impulse(0.1, 2.0),
            );
            engine
                .connect_to_element(&MediaElement::new("bench"))
                .unwrap();
            black_box(engine.source())
        });
    });

    let preset = Preset::new("bench")
        .with_preamp(3.0)
        .with_panner(0.1)
        .with_reverb_mix(0.4)
        .with_eq([1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0, 1.0, 0.0]);
    let mut engine = AudioEngine::with_config(
        OfflineGraph::new(48000.0),
        EngineConfig::default().with_seed(1).with_impulse(0.1, 2.0),
    );
    engine.init().unwrap();

    group.bench_function("apply_preset", |b| {
        b.iter(|| engine.apply_preset(black_box(Some(&preset))));
    });

    group.finish();
}

criterion_group!(benches, bench_impulse, bench_engine);
criterion_main!(benches);
