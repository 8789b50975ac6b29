//! Parameter smoothing for zipper-free changes.
//!
//! Control values that jump instantaneously produce audible stepping
//! ("zipper noise"). Two ramp shapes are provided:
//!
//! - [`SmoothedParam`]: exponential one-pole smoothing, used for gains and
//!   mix ratios.
//! - [`MultiplicativeSmoothed`]: a geometric ramp over a fixed number of
//!   samples, used for the LFO frequency. A multiplicative ramp keeps equal
//!   perceptual steps across a wide frequency range (each sample multiplies
//!   by a constant factor) and can therefore never cross zero.

use libm::{expf, pow};

/// Exponentially smoothed parameter (one-pole lowpass on the target).
///
/// `advance()` is called once per sample in the audio callback; setters may
/// be called from a control thread. With no smoothing configured the value
/// snaps instantly.
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    current: f32,
    target: f32,
    coeff: f32,
    sample_rate: f32,
    smoothing_ms: f32,
}

impl SmoothedParam {
    /// Create with an initial value and smoothing disabled.
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            coeff: 1.0,
            sample_rate: 44100.0,
            smoothing_ms: 0.0,
        }
    }

    /// Create fully configured: initial value, sample rate, smoothing time.
    pub fn with_config(initial: f32, sample_rate: f32, smoothing_ms: f32) -> Self {
        let mut p = Self::new(initial);
        p.sample_rate = sample_rate;
        p.smoothing_ms = smoothing_ms;
        p.update_coeff();
        p
    }

    /// Set the value the parameter ramps toward.
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Set target and current simultaneously (no ramp).
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.target = value;
        self.current = value;
    }

    /// Update the sample rate; recomputes the smoothing coefficient.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_coeff();
    }

    /// Set the smoothing time constant in milliseconds (0 = instant).
    pub fn set_smoothing_ms(&mut self, ms: f32) {
        self.smoothing_ms = ms;
        self.update_coeff();
    }

    /// Advance one sample and return the smoothed value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.current += self.coeff * (self.target - self.current);
        self.current
    }

    /// Current smoothed value, without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Jump the current value to the target.
    #[inline]
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
    }

    // coeff = 1 - exp(-1 / (tau * fs)); tau in seconds. After ~5 tau the
    // ramp has effectively settled.
    fn update_coeff(&mut self) {
        if self.smoothing_ms <= 0.0 || self.sample_rate <= 0.0 {
            self.coeff = 1.0;
        } else {
            let samples = self.smoothing_ms / 1000.0 * self.sample_rate;
            self.coeff = 1.0 - expf(-1.0 / samples);
        }
    }
}

impl Default for SmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Geometrically smoothed positive value.
///
/// On `set_target` the ramp length is fixed (`ramp_samples`); each call to
/// `advance` multiplies the current value by a constant factor so that the
/// ramp lands exactly on the target after `ramp_samples` steps. Both current
/// and target are kept strictly positive.
#[derive(Debug, Clone)]
pub struct MultiplicativeSmoothed {
    current: f64,
    target: f64,
    factor: f64,
    steps_remaining: u32,
    ramp_samples: u32,
}

/// Smallest value a [`MultiplicativeSmoothed`] will hold. A geometric ramp
/// cannot pass through zero.
pub const MULTIPLICATIVE_FLOOR: f64 = 1e-6;

impl MultiplicativeSmoothed {
    /// Create with an initial value (clamped positive) and no ramp.
    pub fn new(initial: f64) -> Self {
        let initial = initial.max(MULTIPLICATIVE_FLOOR);
        Self {
            current: initial,
            target: initial,
            factor: 1.0,
            steps_remaining: 0,
            ramp_samples: 0,
        }
    }

    /// Reconfigure the ramp window and cancel any ramp in progress.
    ///
    /// Called from `prepare`-style transitions: the current value snaps to
    /// the target and subsequent `set_target` calls ramp over
    /// `ramp_seconds * sample_rate` samples.
    pub fn reset(&mut self, sample_rate: f64, ramp_seconds: f64) {
        self.ramp_samples = (ramp_seconds * sample_rate).max(0.0) as u32;
        self.current = self.target;
        self.factor = 1.0;
        self.steps_remaining = 0;
    }

    /// Set a new ramp target (clamped positive).
    pub fn set_target(&mut self, target: f64) {
        let target = target.max(MULTIPLICATIVE_FLOOR);
        self.target = target;
        if self.ramp_samples == 0 {
            self.current = target;
            self.steps_remaining = 0;
            return;
        }
        self.factor = pow(target / self.current, 1.0 / f64::from(self.ramp_samples));
        self.steps_remaining = self.ramp_samples;
    }

    /// Advance one sample and return the smoothed value.
    #[inline]
    pub fn advance(&mut self) -> f64 {
        if self.steps_remaining > 0 {
            self.current *= self.factor;
            self.steps_remaining -= 1;
            if self.steps_remaining == 0 {
                self.current = self.target;
            }
        }
        self.current
    }

    /// Current value, without advancing.
    #[inline]
    pub fn get(&self) -> f64 {
        self.current
    }

    /// Target value.
    #[inline]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// `true` once the ramp has finished.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.steps_remaining == 0
    }
}

impl Default for MultiplicativeSmoothed {
    fn default() -> Self {
        Self::new(1.0)
    }
}
