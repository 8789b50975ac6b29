//! Dry/wet blending around an effect stage.
//!
//! A [`DryWet`] snapshots the signal before the wet processing runs and
//! blends the snapshot back in afterward:
//!
//! ```text
//! out = wet * processed + (1 - wet) * dry
//! ```
//!
//! The scratch buffer is sized once in
//! [`prepare_to_play`](DryWet::prepare_to_play) (a non-real-time event) and
//! reused every block; `copy_dry_signal` / `mix_dry_signal` never allocate.
//! The orchestrator guarantees the copy always precedes the mix within one
//! block.

use aspero_core::{wet_dry_mix, AudioBuffer};

/// Snapshot-and-blend dry/wet mixer. One instance wraps one effect stage.
#[derive(Debug, Clone)]
pub struct DryWet {
    /// Wet fraction in `[0, 1]`, derived from the 0-100 % ratio parameter.
    wet: f32,
    scratch: AudioBuffer,
    /// Frames captured by the last `copy_dry_signal`; `mix_dry_signal`
    /// never blends past this.
    snapshot_frames: usize,
}

impl DryWet {
    /// Create a mixer with a ratio in percent (clamped to `[0, 100]`).
    pub fn new(ratio_percent: f32) -> Self {
        let mut dw = Self {
            wet: 0.0,
            scratch: AudioBuffer::empty(),
            snapshot_frames: 0,
        };
        dw.set_ratio(ratio_percent);
        dw
    }

    /// Allocate the scratch snapshot for blocks up to `max_block` frames.
    pub fn prepare_to_play(&mut self, max_block: usize, channels: usize) {
        self.scratch.resize(channels, max_block);
        self.snapshot_frames = 0;
    }

    /// Free the scratch snapshot. Safe to call repeatedly.
    pub fn release_resources(&mut self) {
        self.scratch.release();
        self.snapshot_frames = 0;
    }

    /// Set the dry/wet ratio in percent; out-of-range input clamps.
    pub fn set_ratio(&mut self, ratio_percent: f32) {
        self.wet = ratio_percent.clamp(0.0, 100.0) / 100.0;
    }

    /// Current ratio in percent.
    pub fn ratio(&self) -> f32 {
        self.wet * 100.0
    }

    /// Snapshot the (still dry) signal into scratch storage.
    ///
    /// Captures as many frames and channels as the scratch can hold; blocks
    /// longer than the prepared maximum are snapshotted up to capacity.
    pub fn copy_dry_signal(&mut self, audio: &AudioBuffer) {
        let frames = audio.frames().min(self.scratch.frames());
        let channels = audio.channels().min(self.scratch.channels());
        for ch in 0..channels {
            self.scratch.channel_mut(ch)[..frames].copy_from_slice(&audio.channel(ch)[..frames]);
        }
        self.snapshot_frames = frames;
    }

    /// Blend the snapshot back into the now-processed signal.
    ///
    /// With a ratio of 0 % the output is the snapshot exactly; at 100 % the
    /// processed signal passes through untouched. Without a prior snapshot
    /// (never copied, or released) this is a no-op.
    pub fn mix_dry_signal(&mut self, audio: &mut AudioBuffer) {
        let frames = audio.frames().min(self.snapshot_frames);
        let channels = audio.channels().min(self.scratch.channels());
        for ch in 0..channels {
            let dry = self.scratch.channel(ch);
            let samples = audio.channel_mut(ch);
            for smp in 0..frames {
                samples[smp] = wet_dry_mix(dry[smp], samples[smp], self.wet);
            }
        }
    }
}
