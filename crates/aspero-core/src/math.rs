//! Level conversions and mixing helpers.
//!
//! Allocation-free, `no_std`-friendly math used across the effect stages.

use libm::{expf, logf};

/// Convert decibels to linear gain (0 dB -> 1.0, -6 dB -> ~0.5).
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels. Input is floored at 1e-10 so silence
/// maps to a large negative number instead of -inf.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Blend dry and wet signals: `wet_amount` of 0.0 returns `dry` exactly,
/// 1.0 returns `wet` exactly.
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, wet_amount: f32) -> f32 {
    wet_amount * wet + (1.0 - wet_amount) * dry
}
