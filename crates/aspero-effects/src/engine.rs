//! Per-block orchestration of the full effect chain.
//!
//! One [`CrusherEngine`] owns every stage of the signal path and drives them
//! in a fixed order each block:
//!
//! 1. both LFOs fill their modulation rows,
//! 2. each row is rescaled into its target's range and clamped,
//! 3. input gain,
//! 4. dry/wet snapshot -> down-sample -> mix (DS stage),
//! 5. dry/wet snapshot -> bit-crush -> mix (BC stage),
//! 6. output gain.
//!
//! The order is load-bearing: down-sampling first lets the bit crusher
//! quantize the aliasing staircase the rate reducer introduced. Running the
//! stages the other way round sounds different and is not equivalent.
//!
//! Parameters arrive through [`set_parameter`](CrusherEngine::set_parameter)
//! keyed by the stable identifiers in [`params::id`](crate::params::id).
//! Setters only overwrite single published values (ramp targets, mapper
//! bases); the per-sample smoothing inside the stages absorbs the jumps.

use aspero_core::{
    db_to_linear, linear_to_db, AudioBuffer, Lfo, ModulationBuffer, ModulationMapper,
    SmoothedParam, Waveform,
};

use crate::bit_crush::{BitCrush, MAX_BITS, MIN_BITS};
use crate::down_sample::DownSample;
use crate::dry_wet::DryWet;
use crate::params::{self, id, RATE_CEILING_HZ, RATE_FLOOR_HZ};

/// Channel count the engine prepares its internal state for.
const CHANNELS: usize = 2;

/// Smoothing window for the gain stages, in milliseconds.
const GAIN_SMOOTHING_MS: f32 = 10.0;

/// The complete modulated bit-crush / down-sample chain.
///
/// Constructed once per plugin instance with the descriptor defaults, so it
/// produces sensible output before any host state is restored. All
/// allocation is confined to [`prepare_to_play`](Self::prepare_to_play) and
/// [`release_resources`](Self::release_resources);
/// [`process_block`](Self::process_block) never allocates, locks or blocks.
#[derive(Debug, Clone)]
pub struct CrusherEngine {
    lfo_ds: Lfo,
    lfo_bc: Lfo,
    map_ds: ModulationMapper,
    map_bc: ModulationMapper,
    /// Single-row modulation buffer feeding the down-sample stage.
    mod_ds: ModulationBuffer,
    /// Single-row modulation buffer feeding the bit-crush stage.
    mod_bc: ModulationBuffer,
    down_sample: DownSample,
    bit_crush: BitCrush,
    dry_wet_ds: DryWet,
    dry_wet_bc: DryWet,
    gain_in: SmoothedParam,
    gain_out: SmoothedParam,
}

fn default_of(param_id: &str) -> f32 {
    params::spec(param_id).map_or(0.0, |s| s.default)
}

impl CrusherEngine {
    /// Create an engine with every parameter at its descriptor default.
    pub fn new() -> Self {
        let lfo_freq = f64::from(default_of(id::LFO_FREQ_DS));
        let waveform = Waveform::from_index(default_of(id::LFO_WAVEFORM_DS) as i32);
        Self {
            lfo_ds: Lfo::new(lfo_freq, waveform),
            lfo_bc: Lfo::new(lfo_freq, waveform),
            map_ds: ModulationMapper::new(
                f64::from(default_of(id::DOWN_SAMPLE)),
                f64::from(default_of(id::LFO_AMOUNT_DS)),
                f64::from(RATE_FLOOR_HZ),
                f64::from(RATE_CEILING_HZ),
            ),
            map_bc: ModulationMapper::new(
                f64::from(default_of(id::BIT_CRUSH)),
                f64::from(default_of(id::LFO_AMOUNT_BC)),
                MIN_BITS,
                MAX_BITS,
            ),
            mod_ds: ModulationBuffer::empty(),
            mod_bc: ModulationBuffer::empty(),
            down_sample: DownSample::new(),
            bit_crush: BitCrush::new(),
            dry_wet_ds: DryWet::new(default_of(id::DRY_WET_DS)),
            dry_wet_bc: DryWet::new(default_of(id::DRY_WET_BC)),
            gain_in: SmoothedParam::with_config(1.0, 44100.0, GAIN_SMOOTHING_MS),
            gain_out: SmoothedParam::with_config(1.0, 44100.0, GAIN_SMOOTHING_MS),
        }
    }

    /// Allocate all block-sized state for the given sample rate and maximum
    /// block length. Must be called while audio is suspended.
    pub fn prepare_to_play(&mut self, sample_rate: f64, max_block: usize) {
        self.lfo_ds.prepare_to_play(sample_rate);
        self.lfo_bc.prepare_to_play(sample_rate);
        self.mod_ds.resize(1, max_block);
        self.mod_bc.resize(1, max_block);
        self.down_sample.prepare_to_play(sample_rate, CHANNELS);
        self.dry_wet_ds.prepare_to_play(max_block, CHANNELS);
        self.dry_wet_bc.prepare_to_play(max_block, CHANNELS);
        self.gain_in.set_sample_rate(sample_rate as f32);
        self.gain_out.set_sample_rate(sample_rate as f32);
    }

    /// Free all block-sized state. Safe to call repeatedly; a subsequent
    /// [`process_block`](Self::process_block) is a no-op until the next
    /// [`prepare_to_play`](Self::prepare_to_play).
    pub fn release_resources(&mut self) {
        self.mod_ds.release();
        self.mod_bc.release();
        self.down_sample.release_resources();
        self.dry_wet_ds.release_resources();
        self.dry_wet_bc.release_resources();
    }

    /// Run one block through the whole chain, mutating `audio` in place.
    ///
    /// Frames beyond the prepared maximum block length are left untouched;
    /// calling before `prepare_to_play` is a safe no-op.
    pub fn process_block(&mut self, audio: &mut AudioBuffer) {
        if audio.channels() == 0 || self.mod_ds.frames() == 0 {
            return;
        }
        let frames = audio.frames().min(self.mod_ds.frames());
        if frames == 0 {
            return;
        }

        self.lfo_ds.process_block(&mut self.mod_ds.channel_mut(0)[..frames]);
        self.lfo_bc.process_block(&mut self.mod_bc.channel_mut(0)[..frames]);
        self.map_ds.process_block(&mut self.mod_ds.channel_mut(0)[..frames]);
        self.map_bc.process_block(&mut self.mod_bc.channel_mut(0)[..frames]);

        Self::apply_gain(audio, &mut self.gain_in, frames);

        self.dry_wet_ds.copy_dry_signal(audio);
        self.down_sample.process_block(audio, &self.mod_ds);
        self.dry_wet_ds.mix_dry_signal(audio);

        self.dry_wet_bc.copy_dry_signal(audio);
        self.bit_crush.process_block(audio, &self.mod_bc);
        self.dry_wet_bc.mix_dry_signal(audio);

        Self::apply_gain(audio, &mut self.gain_out, frames);
    }

    /// Apply a named parameter change. Unknown identifiers are ignored and
    /// out-of-range values clamp to the descriptor range; a parameter change
    /// can never fail while audio is flowing.
    pub fn set_parameter(&mut self, param_id: &str, value: f32) {
        let Some(spec) = params::spec(param_id) else {
            return;
        };
        let value = spec.clamp(value);
        match param_id {
            id::GAIN_IN => self.gain_in.set_target(db_to_linear(value)),
            id::GAIN_OUT => self.gain_out.set_target(db_to_linear(value)),
            id::DRY_WET_DS => self.dry_wet_ds.set_ratio(value),
            id::DRY_WET_BC => self.dry_wet_bc.set_ratio(value),
            id::DOWN_SAMPLE => self.map_ds.set_base(f64::from(value)),
            id::LFO_AMOUNT_DS => self.map_ds.set_depth(f64::from(value)),
            id::LFO_FREQ_DS => self.lfo_ds.set_frequency(f64::from(value)),
            id::LFO_WAVEFORM_DS => {
                self.lfo_ds.set_waveform(Waveform::from_index(libm::roundf(value) as i32));
            }
            id::BIT_CRUSH => self.map_bc.set_base(f64::from(value)),
            id::LFO_AMOUNT_BC => self.map_bc.set_depth(f64::from(value)),
            id::LFO_FREQ_BC => self.lfo_bc.set_frequency(f64::from(value)),
            id::LFO_WAVEFORM_BC => {
                self.lfo_bc.set_waveform(Waveform::from_index(libm::roundf(value) as i32));
            }
            _ => {}
        }
    }

    /// Read back the current target value of a named parameter, in the same
    /// unit `set_parameter` accepts. `None` for unknown identifiers.
    pub fn parameter(&self, param_id: &str) -> Option<f32> {
        match param_id {
            id::GAIN_IN => Some(linear_to_db(self.gain_in.target())),
            id::GAIN_OUT => Some(linear_to_db(self.gain_out.target())),
            id::DRY_WET_DS => Some(self.dry_wet_ds.ratio()),
            id::DRY_WET_BC => Some(self.dry_wet_bc.ratio()),
            id::DOWN_SAMPLE => Some(self.map_ds.base() as f32),
            id::LFO_AMOUNT_DS => Some(self.map_ds.depth() as f32),
            id::LFO_FREQ_DS => Some(self.lfo_ds.frequency() as f32),
            id::LFO_WAVEFORM_DS => Some(self.lfo_ds.waveform().to_index() as f32),
            id::BIT_CRUSH => Some(self.map_bc.base() as f32),
            id::LFO_AMOUNT_BC => Some(self.map_bc.depth() as f32),
            id::LFO_FREQ_BC => Some(self.lfo_bc.frequency() as f32),
            id::LFO_WAVEFORM_BC => Some(self.lfo_bc.waveform().to_index() as f32),
            _ => None,
        }
    }

    fn apply_gain(audio: &mut AudioBuffer, gain: &mut SmoothedParam, frames: usize) {
        for smp in 0..frames {
            let g = gain.advance();
            for ch in 0..audio.channels() {
                audio.channel_mut(ch)[smp] *= g;
            }
        }
    }
}

impl Default for CrusherEngine {
    fn default() -> Self {
        Self::new()
    }
}
