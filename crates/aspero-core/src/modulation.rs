//! Rescaling of raw LFO output into effect parameter ranges.
//!
//! An oscillator produces bipolar samples in `[-1, 1]`; each effect wants a
//! value in its own unit (bits for the quantizer, Hz for the rate reducer).
//! The [`ModulationMapper`] maps `[-1, 1]` onto `[base, base + depth]` per
//! sample and clamps the result into an absolute `[floor, ceiling]` window.
//!
//! The clamp is not cosmetic: unclamped modulation can push the bit depth or
//! the target sample rate outside the physically meaningful range, which
//! would silence the signal or divide by zero in the consuming effect.

/// Maps a raw bipolar modulation row into `[base, base + depth]`, clamped to
/// an absolute window.
///
/// `base` is the host-facing parameter value (e.g. the "Bits" knob), `depth`
/// the modulation amount in the same unit. Both are single-slot published
/// values: a control thread may overwrite them between blocks and the next
/// block simply uses the latest value.
#[derive(Debug, Clone)]
pub struct ModulationMapper {
    base: f64,
    depth: f64,
    floor: f64,
    ceiling: f64,
}

impl ModulationMapper {
    /// Create a mapper with an absolute `[floor, ceiling]` window.
    pub fn new(base: f64, depth: f64, floor: f64, ceiling: f64) -> Self {
        let mut mapper = Self {
            base: 0.0,
            depth: 0.0,
            floor,
            ceiling,
        };
        mapper.set_base(base);
        mapper.set_depth(depth);
        mapper
    }

    /// Set the base value, clamped into the absolute window.
    pub fn set_base(&mut self, base: f64) {
        self.base = base.clamp(self.floor, self.ceiling);
    }

    /// Base value.
    pub fn base(&self) -> f64 {
        self.base
    }

    /// Set the modulation depth (negative input clamps to zero).
    pub fn set_depth(&mut self, depth: f64) {
        self.depth = depth.max(0.0);
    }

    /// Modulation depth.
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Upper clamp of the absolute window.
    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    /// Rescale one raw LFO sample.
    #[inline]
    pub fn map(&self, raw: f64) -> f64 {
        let scaled = self.base + self.depth * ((raw + 1.0) * 0.5);
        scaled.clamp(self.floor, self.ceiling)
    }

    /// Rescale a whole modulation row in place.
    pub fn process_block(&self, row: &mut [f64]) {
        for v in row.iter_mut() {
            *v = self.map(*v);
        }
    }
}
