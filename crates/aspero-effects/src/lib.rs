//! Aspero Effects - the modulated bit-crush / down-sample chain
//!
//! This crate assembles the primitives from `aspero-core` into the complete
//! lo-fi effect:
//!
//! - [`DownSample`] - decimation-hold sample rate reduction with an additive
//!   aliasing bed
//! - [`BitCrush`] - per-sample bit depth reduction
//! - [`DryWet`] - snapshot-and-blend mixing around each stage
//! - [`CrusherEngine`] - block orchestrator tying LFOs, mappers, gains and
//!   both stages together
//! - [`params`] - the host-facing parameter identifiers and descriptor table
//!
//! A host embeds one [`CrusherEngine`] per effect instance:
//!
//! ```
//! use aspero_core::AudioBuffer;
//! use aspero_effects::{params::id, CrusherEngine};
//!
//! let mut engine = CrusherEngine::new();
//! engine.prepare_to_play(44100.0, 512);
//! engine.set_parameter(id::BIT_CRUSH, 6.0);
//! engine.set_parameter(id::DRY_WET_BC, 100.0);
//!
//! let mut block = AudioBuffer::new(2, 512);
//! engine.process_block(&mut block);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod bit_crush;
pub mod down_sample;
pub mod dry_wet;
pub mod engine;
pub mod params;

pub use bit_crush::BitCrush;
pub use down_sample::DownSample;
pub use dry_wet::DryWet;
pub use engine::CrusherEngine;
