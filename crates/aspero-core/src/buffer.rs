//! Channel-major sample storage for audio and modulation signals.
//!
//! A [`Block`] owns a fixed `channels x frames` grid of samples. Audio is
//! stored as `f32` ([`AudioBuffer`]), modulation signals as `f64`
//! ([`ModulationBuffer`]). Channel count and frame count are fixed for the
//! lifetime of one processing call; resizing is a prepare-time operation and
//! must never happen while audio is flowing.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// A channel-major 2D sample buffer.
///
/// Samples are stored contiguously per channel, so `channel(ch)` yields one
/// flat slice per channel with no per-sample indirection.
#[derive(Debug, Clone, Default)]
pub struct Block<T> {
    data: Vec<T>,
    channels: usize,
    frames: usize,
}

/// Audio sample buffer, single precision.
pub type AudioBuffer = Block<f32>;

/// Modulation sample buffer, double precision. Typically has fewer channels
/// than the audio buffer it drives; consumers clamp their channel index via
/// [`Block::clamped_channel`].
pub type ModulationBuffer = Block<f64>;

impl<T: Copy + Default> Block<T> {
    /// Create a zeroed buffer of `channels x frames`.
    pub fn new(channels: usize, frames: usize) -> Self {
        Self {
            data: vec![T::default(); channels * frames],
            channels,
            frames,
        }
    }

    /// Create an empty (0 x 0) buffer. Useful before `prepare` has run.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            channels: 0,
            frames: 0,
        }
    }

    /// Resize to `channels x frames`, zeroing all contents.
    ///
    /// Allocates; call only from prepare/release transitions, never from the
    /// audio callback.
    pub fn resize(&mut self, channels: usize, frames: usize) {
        self.data.clear();
        self.data.resize(channels * frames, T::default());
        self.channels = channels;
        self.frames = frames;
    }

    /// Drop the backing storage, returning to the empty state.
    pub fn release(&mut self) {
        self.data = Vec::new();
        self.channels = 0;
        self.frames = 0;
    }

    /// Zero all samples without changing the shape.
    pub fn clear(&mut self) {
        for v in &mut self.data {
            *v = T::default();
        }
    }

    /// Number of channels.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of frames (samples per channel).
    #[inline]
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// `true` when the buffer holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read-only view of one channel.
    ///
    /// # Panics
    /// Panics if `ch >= self.channels()`.
    #[inline]
    pub fn channel(&self, ch: usize) -> &[T] {
        &self.data[ch * self.frames..(ch + 1) * self.frames]
    }

    /// Mutable view of one channel.
    ///
    /// # Panics
    /// Panics if `ch >= self.channels()`.
    #[inline]
    pub fn channel_mut(&mut self, ch: usize) -> &mut [T] {
        &mut self.data[ch * self.frames..(ch + 1) * self.frames]
    }

    /// Read-only view of channel `ch`, aliasing indices past the last
    /// channel onto the last channel.
    ///
    /// This is the channel-clamping policy used when an effect indexes a
    /// modulation buffer per audio channel: a stereo audio buffer driven by
    /// a mono modulation buffer reads row 0 for both sides.
    ///
    /// # Panics
    /// Panics if the buffer has no channels at all.
    #[inline]
    pub fn clamped_channel(&self, ch: usize) -> &[T] {
        self.channel(ch.min(self.channels - 1))
    }

    /// Copy interleaved frames (`frame0ch0, frame0ch1, ...`) into this
    /// buffer. Copies as many whole frames as both sides can hold.
    pub fn copy_from_interleaved(&mut self, interleaved: &[T]) {
        if self.channels == 0 {
            return;
        }
        let frames = (interleaved.len() / self.channels).min(self.frames);
        for ch in 0..self.channels {
            let stride = self.channels;
            let dst = &mut self.data[ch * self.frames..ch * self.frames + frames];
            for (i, slot) in dst.iter_mut().enumerate() {
                *slot = interleaved[i * stride + ch];
            }
        }
    }

    /// Write this buffer out as interleaved frames. Writes as many whole
    /// frames as both sides can hold.
    pub fn write_interleaved(&self, interleaved: &mut [T]) {
        if self.channels == 0 {
            return;
        }
        let frames = (interleaved.len() / self.channels).min(self.frames);
        for ch in 0..self.channels {
            let src = self.channel(ch);
            for (i, &v) in src.iter().take(frames).enumerate() {
                interleaved[i * self.channels + ch] = v;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_zeroed() {
        let buf = AudioBuffer::new(2, 64);
        assert_eq!(buf.channels(), 2);
        assert_eq!(buf.frames(), 64);
        assert!(buf.channel(0).iter().all(|&v| v == 0.0));
        assert!(buf.channel(1).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn channels_are_independent() {
        let mut buf = AudioBuffer::new(2, 4);
        buf.channel_mut(0).fill(1.0);
        assert!(buf.channel(0).iter().all(|&v| v == 1.0));
        assert!(buf.channel(1).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn clamped_channel_aliases_to_last() {
        let mut buf = ModulationBuffer::new(1, 4);
        buf.channel_mut(0).fill(0.5);
        // Indices beyond the channel count read the last row, not wrap.
        assert_eq!(buf.clamped_channel(0)[0], 0.5);
        assert_eq!(buf.clamped_channel(1)[0], 0.5);
        assert_eq!(buf.clamped_channel(7)[0], 0.5);
    }

    #[test]
    fn resize_rezeroes() {
        let mut buf = AudioBuffer::new(1, 4);
        buf.channel_mut(0).fill(1.0);
        buf.resize(2, 8);
        assert_eq!(buf.frames(), 8);
        assert!(buf.channel(0).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn release_returns_to_empty() {
        let mut buf = AudioBuffer::new(2, 16);
        buf.release();
        assert!(buf.is_empty());
        assert_eq!(buf.channels(), 0);
        // Releasing twice is fine.
        buf.release();
        assert!(buf.is_empty());
    }

    #[test]
    fn interleave_roundtrip() {
        let interleaved = [1.0f32, 10.0, 2.0, 20.0, 3.0, 30.0];
        let mut buf = AudioBuffer::new(2, 3);
        buf.copy_from_interleaved(&interleaved);
        assert_eq!(buf.channel(0), &[1.0, 2.0, 3.0]);
        assert_eq!(buf.channel(1), &[10.0, 20.0, 30.0]);

        let mut out = [0.0f32; 6];
        buf.write_interleaved(&mut out);
        assert_eq!(out, interleaved);
    }

    #[test]
    fn partial_interleaved_copy_is_bounded() {
        let mut buf = AudioBuffer::new(2, 4);
        // Only one whole frame available.
        buf.copy_from_interleaved(&[1.0, 2.0, 3.0]);
        assert_eq!(buf.channel(0)[0], 1.0);
        assert_eq!(buf.channel(1)[0], 2.0);
        assert_eq!(buf.channel(0)[1], 0.0);
    }
}
