//! Low-frequency oscillator driving the effect modulation.
//!
//! One [`Lfo`] instance feeds one modulation target (down-sample rate or bit
//! depth). The oscillator runs in double precision: its output lands in a
//! [`ModulationBuffer`](crate::ModulationBuffer) row and is rescaled into
//! parameter units by a [`ModulationMapper`](crate::ModulationMapper).
//!
//! Frequency changes ramp multiplicatively over a short fixed window instead
//! of jumping, so sweeping the rate knob while audio flows stays click-free.
//! Waveform changes switch immediately; they are infrequent and a one-sample
//! discontinuity in a sub-audio modulator is inaudible.

use core::f64::consts::TAU;

use libm::{floor, sin};

use crate::param::MultiplicativeSmoothed;

/// Lowest frequency a caller can request, in Hz. Zero or negative input is
/// pulled up to this floor (a multiplicative ramp cannot reach zero).
pub const MIN_FREQUENCY_HZ: f64 = 0.01;

/// Length of the frequency smoothing ramp in seconds.
pub const FREQUENCY_RAMP_SECONDS: f64 = 0.05;

/// Oscillator waveform shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Waveform {
    /// `sin(2*pi*phase)`.
    #[default]
    Sinusoid,
    /// Linear ramp -1 -> 1 -> -1 across one cycle.
    Triangular,
    /// Linear ramp -1 -> 1 with a discontinuous reset.
    SawUp,
    /// Linear ramp 1 -> -1 with a discontinuous reset.
    SawDown,
    /// +1 for the first half cycle, -1 for the second.
    Square,
    /// One uniform random value per cycle, held until the phase wraps.
    SampleAndHold,
}

impl Waveform {
    /// Map a host-facing index to a shape. Out-of-range indices clamp to the
    /// nearest valid shape rather than failing.
    pub fn from_index(index: i32) -> Self {
        match index {
            i32::MIN..=0 => Waveform::Sinusoid,
            1 => Waveform::Triangular,
            2 => Waveform::SawUp,
            3 => Waveform::SawDown,
            4 => Waveform::Square,
            _ => Waveform::SampleAndHold,
        }
    }

    /// Index of this shape, inverse of [`from_index`](Self::from_index).
    pub fn to_index(self) -> i32 {
        match self {
            Waveform::Sinusoid => 0,
            Waveform::Triangular => 1,
            Waveform::SawUp => 2,
            Waveform::SawDown => 3,
            Waveform::Square => 4,
            Waveform::SampleAndHold => 5,
        }
    }

    /// Host-facing display name.
    pub fn label(self) -> &'static str {
        match self {
            Waveform::Sinusoid => "Sinusoid",
            Waveform::Triangular => "Triangular",
            Waveform::SawUp => "Saw Up",
            Waveform::SawDown => "Saw Down",
            Waveform::Square => "Square",
            Waveform::SampleAndHold => "Sample and Hold",
        }
    }
}

/// Low-frequency oscillator with a smoothed frequency and wrapping phase
/// accumulator in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct Lfo {
    waveform: Waveform,
    frequency: MultiplicativeSmoothed,
    phase: f64,
    /// `1 / sample_rate`; the per-sample phase increment is
    /// `frequency * sample_period`.
    sample_period: f64,
    /// Value held by the Sample-and-Hold shape until the next wrap.
    held: f64,
    /// Set when the phase wraps; the Sample-and-Hold shape draws exactly one
    /// new value per cycle.
    new_cycle: bool,
    rng_state: u32,
}

impl Lfo {
    /// Create an oscillator. The PRNG behind Sample-and-Hold is seeded once
    /// here; the phase is never reset mid-stream after this.
    pub fn new(frequency_hz: f64, waveform: Waveform) -> Self {
        Self {
            waveform,
            frequency: MultiplicativeSmoothed::new(frequency_hz.max(MIN_FREQUENCY_HZ)),
            phase: 0.0,
            sample_period: 1.0 / 44100.0,
            held: 0.0,
            new_cycle: true,
            rng_state: 0x9e37_79b9,
        }
    }

    /// Record the host sample rate and reset the frequency ramp baseline.
    pub fn prepare_to_play(&mut self, sample_rate: f64) {
        let sample_rate = sample_rate.max(1.0);
        self.sample_period = 1.0 / sample_rate;
        self.frequency.reset(sample_rate, FREQUENCY_RAMP_SECONDS);
    }

    /// Set a new frequency target in Hz. The running frequency ramps toward
    /// it over [`FREQUENCY_RAMP_SECONDS`]; values at or below zero clamp to
    /// [`MIN_FREQUENCY_HZ`].
    pub fn set_frequency(&mut self, hz: f64) {
        self.frequency.set_target(hz.max(MIN_FREQUENCY_HZ));
    }

    /// Current frequency target in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency.target()
    }

    /// Switch the waveform shape. Takes effect on the next sample.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    /// Current waveform shape.
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Produce the next sample in `[-1, 1]` and advance the phase.
    #[inline]
    pub fn next_sample(&mut self) -> f64 {
        let p = self.phase;
        let value = match self.waveform {
            Waveform::Sinusoid => sin(TAU * p),
            Waveform::Triangular => {
                if p < 0.5 {
                    4.0 * p - 1.0
                } else {
                    3.0 - 4.0 * p
                }
            }
            Waveform::SawUp => 2.0 * p - 1.0,
            Waveform::SawDown => 1.0 - 2.0 * p,
            Waveform::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::SampleAndHold => {
                if self.new_cycle {
                    self.held = self.next_random();
                    self.new_cycle = false;
                }
                self.held
            }
        };

        self.phase += self.frequency.advance() * self.sample_period;
        if self.phase >= 1.0 {
            self.phase -= floor(self.phase);
            self.new_cycle = true;
        }

        value
    }

    /// Fill a modulation buffer row with consecutive samples.
    pub fn process_block(&mut self, out: &mut [f64]) {
        for slot in out.iter_mut() {
            *slot = self.next_sample();
        }
    }

    // LCG with the Numerical Recipes constants; the upper 16 bits map onto
    // [-1, 1].
    #[inline]
    fn next_random(&mut self) -> f64 {
        self.rng_state = self
            .rng_state
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223);
        let upper = f64::from(self.rng_state >> 16);
        upper / 32768.0 - 1.0
    }
}

impl Default for Lfo {
    fn default() -> Self {
        Self::new(1.0, Waveform::Sinusoid)
    }
}
