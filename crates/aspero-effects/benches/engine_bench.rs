//! Throughput benchmarks for the effect chain.
//!
//! Run with: `cargo bench -p aspero-effects`

use aspero_core::AudioBuffer;
use aspero_effects::params::id;
use aspero_effects::CrusherEngine;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const FRAMES: usize = 512;
const CHANNELS: usize = 2;

fn sine_block() -> AudioBuffer {
    let mut audio = AudioBuffer::new(CHANNELS, FRAMES);
    for ch in 0..CHANNELS {
        for (i, v) in audio.channel_mut(ch).iter_mut().enumerate() {
            *v = libm::sinf(i as f32 * 0.13);
        }
    }
    audio
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    group.throughput(Throughput::Elements((FRAMES * CHANNELS) as u64));

    group.bench_function("transparent", |b| {
        let mut engine = CrusherEngine::new();
        engine.prepare_to_play(44100.0, FRAMES);
        engine.set_parameter(id::DRY_WET_DS, 0.0);
        engine.set_parameter(id::DRY_WET_BC, 100.0);
        let mut audio = sine_block();
        b.iter(|| {
            engine.process_block(black_box(&mut audio));
        });
    });

    group.bench_function("full_modulation", |b| {
        let mut engine = CrusherEngine::new();
        engine.prepare_to_play(44100.0, FRAMES);
        engine.set_parameter(id::DOWN_SAMPLE, 2000.0);
        engine.set_parameter(id::BIT_CRUSH, 4.0);
        engine.set_parameter(id::LFO_AMOUNT_DS, 8000.0);
        engine.set_parameter(id::LFO_AMOUNT_BC, 12.0);
        engine.set_parameter(id::LFO_FREQ_DS, 7.0);
        engine.set_parameter(id::LFO_FREQ_BC, 3.0);
        engine.set_parameter(id::DRY_WET_DS, 100.0);
        engine.set_parameter(id::DRY_WET_BC, 100.0);
        let mut audio = sine_block();
        b.iter(|| {
            engine.process_block(black_box(&mut audio));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
