//! Aspero Core - DSP primitives for the modulated lo-fi crusher
//!
//! This crate provides the building blocks the effect stages are assembled
//! from, designed for real-time audio processing with zero allocation in the
//! audio path:
//!
//! - [`Lfo`] - low-frequency oscillator with six waveforms and a
//!   multiplicatively smoothed frequency
//! - [`ModulationMapper`] - rescales bipolar LFO output into an effect's
//!   parameter range with a safety clamp
//! - [`SmoothedParam`] / [`MultiplicativeSmoothed`] - zipper-free parameter
//!   ramps
//! - [`AudioBuffer`] / [`ModulationBuffer`] - channel-major sample storage
//!   sized outside the audio callback
//! - Level conversions: [`db_to_linear`], [`linear_to_db`]
//!
//! # no_std Support
//!
//! The crate is `no_std` compatible (buffers use `alloc`); disable the
//! default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! aspero-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: allocation happens only in `prepare`-style calls,
//!   never while a block is being processed
//! - **Clamp, never reject**: out-of-range parameter input is pulled into
//!   the valid domain so audio keeps flowing
//! - **Pure `libm` math**: no dependency on `std` float intrinsics

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod buffer;
pub mod lfo;
pub mod math;
pub mod modulation;
pub mod param;

pub use buffer::{AudioBuffer, Block, ModulationBuffer};
pub use lfo::{Lfo, Waveform};
pub use math::{db_to_linear, linear_to_db, wet_dry_mix};
pub use modulation::ModulationMapper;
pub use param::{MultiplicativeSmoothed, SmoothedParam};
