//! Sample-rate reduction by decimation hold ("sample-and-hold" aliasing).
//!
//! # Theory
//!
//! Instead of actually resampling, the stage emulates a lower playback rate
//! by latching the input once every `ratio = native_rate / target_rate`
//! frames and reusing the latched value in between. The held staircase is
//! then *added* to the original signal rather than replacing it: the
//! doubled-up aliasing bed is the intended lo-fi character of the effect,
//! not a mistake.
//!
//! The target rate is read from the modulation buffer per sample and per
//! channel, so an LFO can sweep the effective rate while audio flows. The
//! decimation counter and the held sample survive across blocks; resetting
//! them per block would retrigger the latch at every block boundary and
//! click audibly.
//!
//! Each channel owns an independent counter. Channels can therefore request
//! different target rates (the modulation row is channel-clamped, but a
//! multi-row buffer is allowed) without one channel's reset point governing
//! the others.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use aspero_core::{AudioBuffer, ModulationBuffer};

/// Lowest target rate the modulation signal can request, in Hz. Keeps the
/// decimation ratio finite.
pub const MIN_TARGET_RATE_HZ: f64 = 1.0;

/// Decimation-hold sample rate reducer.
///
/// Allocation happens only in [`prepare_to_play`](Self::prepare_to_play);
/// processing before `prepare_to_play` (or after
/// [`release_resources`](Self::release_resources)) is a safe no-op.
#[derive(Debug, Clone)]
pub struct DownSample {
    native_rate: f64,
    /// Latched sample per channel; persists across blocks.
    held: Vec<f32>,
    /// Decimation counter per channel; persists across blocks.
    counters: Vec<f64>,
}

impl DownSample {
    /// Create an unprepared reducer.
    pub fn new() -> Self {
        Self {
            native_rate: 44100.0,
            held: Vec::new(),
            counters: Vec::new(),
        }
    }

    /// Record the native sample rate and allocate the per-channel hold
    /// state. Clears any previously held samples.
    pub fn prepare_to_play(&mut self, sample_rate: f64, channels: usize) {
        self.native_rate = sample_rate.max(MIN_TARGET_RATE_HZ);
        self.held.clear();
        self.held.resize(channels, 0.0);
        self.counters.clear();
        self.counters.resize(channels, 0.0);
    }

    /// Free the hold state. Safe to call repeatedly or before
    /// [`prepare_to_play`](Self::prepare_to_play).
    pub fn release_resources(&mut self) {
        self.held = Vec::new();
        self.counters = Vec::new();
    }

    /// Native sample rate recorded at prepare time.
    pub fn native_rate(&self) -> f64 {
        self.native_rate
    }

    /// Apply the decimation hold, adding the held staircase onto the input.
    ///
    /// For every frame and channel: read the channel-clamped target rate,
    /// clamp it so `ratio >= 1` (down-sampling only, never up-sampling),
    /// latch the input when the channel's counter is at zero, and add the
    /// held value to the sample. The counter wraps when it reaches `ratio`.
    pub fn process_block(&mut self, audio: &mut AudioBuffer, modulation: &ModulationBuffer) {
        if self.held.is_empty() || modulation.channels() == 0 {
            return;
        }
        let frames = audio.frames().min(modulation.frames());
        let channels = audio.channels().min(self.held.len());

        for ch in 0..channels {
            let rate_row: &[f64] = modulation.clamped_channel(ch);
            let samples = audio.channel_mut(ch);
            let held = &mut self.held[ch];
            let counter = &mut self.counters[ch];

            for smp in 0..frames {
                let target = rate_row[smp].clamp(MIN_TARGET_RATE_HZ, self.native_rate);
                let ratio = (self.native_rate / target).max(1.0);

                if *counter == 0.0 {
                    *held = samples[smp];
                }
                samples[smp] += *held;

                *counter += 1.0;
                if *counter >= ratio {
                    *counter = 0.0;
                }
            }
        }
    }
}

impl Default for DownSample {
    fn default() -> Self {
        Self::new()
    }
}
