//! Bit depth reduction driven by a per-sample modulation signal.
//!
//! # Theory
//!
//! With `b` bits the amplitude axis of a full-scale signal splits into
//! `2^b - 1` steps of size `QL = 2 / (2^b - 1)`. Each sample is snapped to
//! the staircase by
//!
//! ```text
//! crushed = QL * trunc(x / QL)
//! ```
//!
//! The division truncates toward zero, not toward negative infinity. That
//! asymmetry near zero is part of the characteristic sound: positive and
//! negative half-waves quantize mirror-symmetrically and a small signal
//! collapses onto the zero level from both sides.
//!
//! The bit depth is read from the modulation buffer *per sample and per
//! channel*, so an LFO can sweep the resolution continuously while audio
//! flows. Quantization itself is stateless; all state lives in the
//! modulation path.
//!
//! Reference: Zolzer, "DAFX: Digital Audio Effects" 2nd ed., Chapter 7
//! (Quantization).

use aspero_core::{AudioBuffer, ModulationBuffer};
use libm::{pow, trunc};

/// Lowest usable bit depth. At 1 bit the staircase degenerates to two
/// levels; below 1 the step size `2/(2^b - 1)` loses its meaning (the
/// denominator reaches zero at `b = 0`).
pub const MIN_BITS: f64 = 1.0;

/// Highest usable bit depth; above 24 bits quantization is inaudible and
/// `2^b` starts to squander `f64` mantissa headroom.
pub const MAX_BITS: f64 = 24.0;

/// In-place bit-depth reducer.
///
/// Holds no per-sample state: the same input block and modulation block
/// always produce the same output, which makes the stage trivially safe
/// across block boundaries.
#[derive(Debug, Clone, Default)]
pub struct BitCrush {}

impl BitCrush {
    /// Create a bit crusher.
    pub fn new() -> Self {
        Self {}
    }

    /// Quantize every sample to the bit depth given by the modulation
    /// buffer.
    ///
    /// Audio channels beyond the modulation buffer's channel count read its
    /// last row (channel clamping). Frame counts are reconciled by taking
    /// the smaller of the two; a zero-length block is a no-op.
    pub fn process_block(&mut self, audio: &mut AudioBuffer, modulation: &ModulationBuffer) {
        if modulation.channels() == 0 {
            return;
        }
        let frames = audio.frames().min(modulation.frames());

        for ch in 0..audio.channels() {
            // Indexing the modulation row once per channel keeps the inner
            // loop free of bounds math.
            let bits_row: &[f64] = modulation.clamped_channel(ch);
            let samples = audio.channel_mut(ch);
            for smp in 0..frames {
                samples[smp] = Self::crush(samples[smp], bits_row[smp]);
            }
        }
    }

    /// Quantize a single sample to `bits` (clamped to `[MIN_BITS, MAX_BITS]`).
    #[inline]
    pub fn crush(value: f32, bits: f64) -> f32 {
        let bits = bits.clamp(MIN_BITS, MAX_BITS);
        let ql = 2.0 / (pow(2.0, bits) - 1.0);
        (ql * trunc(f64::from(value) / ql)) as f32
    }
}
