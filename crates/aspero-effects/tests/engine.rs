//! End-to-end tests of the assembled effect chain.

use aspero_core::AudioBuffer;
use aspero_effects::params::id;
use aspero_effects::{BitCrush, CrusherEngine};

fn sine_block(channels: usize, frames: usize, step: f32) -> AudioBuffer {
    let mut audio = AudioBuffer::new(channels, frames);
    for ch in 0..channels {
        for (i, v) in audio.channel_mut(ch).iter_mut().enumerate() {
            *v = libm::sinf(i as f32 * step);
        }
    }
    audio
}

#[test]
fn transparent_settings_pass_impulse_through() {
    for rate in [8000.0, 44100.0, 192_000.0] {
        let mut engine = CrusherEngine::new();
        engine.prepare_to_play(rate, 64);
        engine.set_parameter(id::DRY_WET_DS, 0.0);
        engine.set_parameter(id::DRY_WET_BC, 100.0);

        let mut audio = AudioBuffer::new(2, 64);
        audio.channel_mut(0)[0] = 1.0;
        audio.channel_mut(1)[0] = 1.0;
        engine.process_block(&mut audio);

        for ch in 0..2 {
            assert!(
                (audio.channel(ch)[0] - 1.0).abs() < 1e-5,
                "rate {rate}: impulse not preserved"
            );
            for &v in &audio.channel(ch)[1..] {
                assert!(v.abs() < 1e-6, "rate {rate}: spurious output {v}");
            }
        }
    }
}

#[test]
fn chunked_processing_matches_one_shot() {
    // Hold/latch state, LFO phase and gain ramps all persist across calls,
    // so splitting a block in two must be sample-exact against processing
    // it whole.
    let configure = |engine: &mut CrusherEngine| {
        engine.prepare_to_play(44100.0, 128);
        engine.set_parameter(id::DOWN_SAMPLE, 4000.0);
        engine.set_parameter(id::BIT_CRUSH, 5.0);
        engine.set_parameter(id::LFO_AMOUNT_BC, 8.0);
        engine.set_parameter(id::LFO_FREQ_BC, 5.0);
        engine.set_parameter(id::DRY_WET_DS, 70.0);
        engine.set_parameter(id::DRY_WET_BC, 80.0);
        engine.set_parameter(id::GAIN_IN, 3.0);
    };

    let mut whole_engine = CrusherEngine::new();
    configure(&mut whole_engine);
    let mut whole = sine_block(2, 128, 0.21);
    whole_engine.process_block(&mut whole);

    let mut split_engine = CrusherEngine::new();
    configure(&mut split_engine);
    let source = sine_block(2, 128, 0.21);
    let mut first = AudioBuffer::new(2, 64);
    let mut second = AudioBuffer::new(2, 64);
    for ch in 0..2 {
        first.channel_mut(ch).copy_from_slice(&source.channel(ch)[..64]);
        second.channel_mut(ch).copy_from_slice(&source.channel(ch)[64..]);
    }
    split_engine.process_block(&mut first);
    split_engine.process_block(&mut second);

    for ch in 0..2 {
        for i in 0..64 {
            assert_eq!(whole.channel(ch)[i], first.channel(ch)[i], "ch {ch} frame {i}");
            assert_eq!(
                whole.channel(ch)[64 + i],
                second.channel(ch)[i],
                "ch {ch} frame {}",
                64 + i
            );
        }
    }
}

#[test]
fn square_lfo_selects_the_high_bit_depth_first() {
    // Square modulation at +1 pushes the bit depth to base + amount; the
    // whole first half cycle of a 1 Hz LFO covers this short block, so every
    // sample is crushed at 12 bits.
    let mut engine = CrusherEngine::new();
    engine.prepare_to_play(44100.0, 64);
    engine.set_parameter(id::DRY_WET_DS, 0.0);
    engine.set_parameter(id::DRY_WET_BC, 100.0);
    engine.set_parameter(id::BIT_CRUSH, 2.0);
    engine.set_parameter(id::LFO_AMOUNT_BC, 10.0);
    engine.set_parameter(id::LFO_WAVEFORM_BC, 4.0); // square

    let mut audio = AudioBuffer::new(1, 64);
    audio.channel_mut(0).fill(0.5);
    engine.process_block(&mut audio);

    let expected = BitCrush::crush(0.5, 12.0);
    for &v in audio.channel(0) {
        assert!((v - expected).abs() < 1e-6, "expected {expected}, got {v}");
    }
}

#[test]
fn identical_channels_stay_identical() {
    let mut engine = CrusherEngine::new();
    engine.prepare_to_play(44100.0, 128);
    engine.set_parameter(id::DOWN_SAMPLE, 3000.0);
    engine.set_parameter(id::BIT_CRUSH, 4.0);
    engine.set_parameter(id::DRY_WET_DS, 100.0);
    engine.set_parameter(id::DRY_WET_BC, 100.0);

    let mut audio = sine_block(2, 128, 0.17);
    engine.process_block(&mut audio);
    assert_eq!(audio.channel(0), audio.channel(1));
}

#[test]
fn heavy_settings_deform_but_keep_the_signal_bounded() {
    let mut engine = CrusherEngine::new();
    engine.prepare_to_play(44100.0, 256);
    engine.set_parameter(id::DOWN_SAMPLE, 100.0);
    engine.set_parameter(id::BIT_CRUSH, 1.0);
    engine.set_parameter(id::LFO_AMOUNT_DS, 22050.0);
    engine.set_parameter(id::LFO_AMOUNT_BC, 23.0);
    engine.set_parameter(id::LFO_FREQ_DS, 20.0);
    engine.set_parameter(id::LFO_FREQ_BC, 20.0);
    engine.set_parameter(id::LFO_WAVEFORM_DS, 5.0);
    engine.set_parameter(id::LFO_WAVEFORM_BC, 5.0);
    engine.set_parameter(id::DRY_WET_DS, 100.0);
    engine.set_parameter(id::DRY_WET_BC, 100.0);

    let mut changed = false;
    for block in 0..16 {
        let mut audio = sine_block(2, 256, 0.1 + block as f32 * 0.01);
        let input: Vec<f32> = audio.channel(0).to_vec();
        engine.process_block(&mut audio);
        for &v in audio.channel(0) {
            assert!(v.is_finite());
            // Additive hold doubles at most; unity gains on top.
            assert!(v.abs() <= 2.0 + 1e-4, "sample {v} beyond the additive bound");
        }
        if audio.channel(0) != input.as_slice() {
            changed = true;
        }
    }
    assert!(changed, "extreme settings should audibly alter the signal");
}

#[test]
fn zero_channel_buffer_is_a_noop() {
    let mut engine = CrusherEngine::new();
    engine.prepare_to_play(44100.0, 64);
    let mut audio = AudioBuffer::empty();
    engine.process_block(&mut audio);
    assert!(audio.is_empty());
}
