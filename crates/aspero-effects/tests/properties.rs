//! Property tests for the effect stages and the assembled engine.

use aspero_core::{AudioBuffer, ModulationBuffer};
use aspero_effects::params::{self, id};
use aspero_effects::{BitCrush, CrusherEngine, DownSample};
use libm::pow;
use proptest::prelude::*;

proptest! {
    /// Quantization error never exceeds one step, at any bit depth.
    #[test]
    fn crush_error_bounded_by_step(
        x in -2.0f32..2.0,
        bits in 1.0f64..24.0,
    ) {
        let ql = 2.0 / (pow(2.0, bits) - 1.0);
        let y = f64::from(BitCrush::crush(x, bits));
        prop_assert!((y - f64::from(x)).abs() <= ql + 1e-6);
    }

    /// Truncation toward zero never grows a sample's magnitude.
    #[test]
    fn crush_never_increases_magnitude(
        x in -2.0f32..2.0,
        bits in 1.0f64..24.0,
    ) {
        let y = BitCrush::crush(x, bits);
        prop_assert!(y.abs() <= x.abs() + 1e-6);
        // And it never flips the sign.
        prop_assert!(y == 0.0 || (y > 0.0) == (x > 0.0));
    }

    /// The crushed value sits on the quantization grid.
    #[test]
    fn crush_output_on_grid(
        x in -1.0f32..1.0,
        bits in 1.0f64..16.0,
    ) {
        let ql = 2.0 / (pow(2.0, bits) - 1.0);
        let steps = f64::from(BitCrush::crush(x, bits)) / ql;
        prop_assert!((steps - steps.round()).abs() < 1e-4);
    }

    /// The hold staircase changes no more often than the decimation ratio
    /// allows, for any constant target rate.
    #[test]
    fn hold_rate_respects_ratio(
        target in 1000.0f64..44100.0,
        seed in 0u64..1000,
    ) {
        let frames = 256;
        let mut ds = DownSample::new();
        ds.prepare_to_play(44100.0, 1);

        let mut audio = AudioBuffer::new(1, frames);
        let mut state = seed.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
        for v in audio.channel_mut(0).iter_mut() {
            state = state.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
            *v = ((state >> 40) as f32) / 16777216.0 - 0.5;
        }
        let input: Vec<f32> = audio.channel(0).to_vec();

        let mut modulation = ModulationBuffer::new(1, frames);
        modulation.channel_mut(0).fill(target);
        ds.process_block(&mut audio, &modulation);

        let ratio = (44100.0 / target).max(1.0);
        let staircase: Vec<f32> = audio
            .channel(0)
            .iter()
            .zip(input.iter())
            .map(|(&out, &inp)| out - inp)
            .collect();
        let transitions = staircase.windows(2).filter(|w| w[0] != w[1]).count();
        let allowed = (frames as f64 / ratio).ceil() as usize + 1;
        prop_assert!(
            transitions <= allowed,
            "{transitions} transitions, ratio {ratio} allows {allowed}"
        );
    }

    /// The assembled engine stays finite and bounded under arbitrary
    /// in-range parameter settings and full-scale input.
    #[test]
    fn engine_output_stays_finite(
        values in proptest::collection::vec(0.0f32..1.0, params::PARAMS.len()),
        phase_step in 0.01f32..0.5,
    ) {
        let mut engine = CrusherEngine::new();
        engine.prepare_to_play(44100.0, 128);
        for (p, t) in params::PARAMS.iter().zip(values.iter()) {
            engine.set_parameter(p.id, p.min + t * (p.max - p.min));
        }

        // Several blocks of fresh full-scale input so ramps and LFO phase
        // move through their state.
        let mut audio = AudioBuffer::new(2, 128);
        for block in 0..8 {
            for ch in 0..2 {
                for (i, v) in audio.channel_mut(ch).iter_mut().enumerate() {
                    *v = libm::sinf((block * 128 + i) as f32 * phase_step);
                }
            }
            engine.process_block(&mut audio);
        }
        // Worst case: two +20 dB gains and the additive hold, ~400x.
        for ch in 0..2 {
            for &v in audio.channel(ch) {
                prop_assert!(v.is_finite());
                prop_assert!(v.abs() < 1000.0, "runaway sample {v}");
            }
        }
    }

    /// Every parameter reads back exactly what was set, after clamping.
    #[test]
    fn parameters_read_back_clamped(
        raw in proptest::collection::vec(-100.0f32..50000.0, params::PARAMS.len()),
    ) {
        let mut engine = CrusherEngine::new();
        engine.prepare_to_play(48000.0, 64);
        for (p, &v) in params::PARAMS.iter().zip(raw.iter()) {
            engine.set_parameter(p.id, v);
            let mut expected = p.clamp(v);
            if p.id == id::LFO_WAVEFORM_DS || p.id == id::LFO_WAVEFORM_BC {
                expected = libm::roundf(expected);
            }
            let got = engine.parameter(p.id).unwrap();
            prop_assert!(
                (got - expected).abs() < 0.01,
                "{}: set {v}, expected {expected}, got {got}",
                p.id
            );
        }
    }
}
