//! Host-facing parameter identifiers and metadata.
//!
//! Every control the engine exposes is addressed by a short, stable string
//! identifier. The identifiers are part of the persistence contract: hosts
//! serialize `identifier -> value` pairs, so they must never change. The
//! descriptor table carries the display metadata a host or GUI needs to lay
//! out controls without knowing anything about the DSP.

/// Stable string identifiers, one per parameter.
pub mod id {
    /// Input gain in dB.
    pub const GAIN_IN: &str = "GIN";
    /// Output gain in dB.
    pub const GAIN_OUT: &str = "GOUT";
    /// Dry/wet ratio around the down-sample stage, percent.
    pub const DRY_WET_DS: &str = "DWDS";
    /// Down-sample target rate base, Hz.
    pub const DOWN_SAMPLE: &str = "DS";
    /// Down-sample LFO frequency, Hz.
    pub const LFO_FREQ_DS: &str = "MFDS";
    /// Down-sample LFO modulation amount, Hz.
    pub const LFO_AMOUNT_DS: &str = "ADS";
    /// Down-sample LFO waveform index.
    pub const LFO_WAVEFORM_DS: &str = "MWDS";
    /// Dry/wet ratio around the bit-crush stage, percent.
    pub const DRY_WET_BC: &str = "DWBC";
    /// Bit depth base, bits.
    pub const BIT_CRUSH: &str = "BC";
    /// Bit-crush LFO frequency, Hz.
    pub const LFO_FREQ_BC: &str = "MFBC";
    /// Bit-crush LFO modulation amount, bits.
    pub const LFO_AMOUNT_BC: &str = "ABC";
    /// Bit-crush LFO waveform index.
    pub const LFO_WAVEFORM_BC: &str = "MWBC";
}

/// Unit a parameter value is expressed in, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamUnit {
    /// Unitless (waveform selectors).
    None,
    /// Decibels.
    Decibels,
    /// Percent.
    Percent,
    /// Hertz.
    Hertz,
    /// Bits of amplitude resolution.
    Bits,
}

impl ParamUnit {
    /// Display suffix.
    pub fn label(self) -> &'static str {
        match self {
            ParamUnit::None => "",
            ParamUnit::Decibels => "dB",
            ParamUnit::Percent => "%",
            ParamUnit::Hertz => "Hz",
            ParamUnit::Bits => "bits",
        }
    }
}

/// Static description of one host-facing parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    /// Stable string identifier (see [`id`]).
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Display unit.
    pub unit: ParamUnit,
    /// Minimum accepted value; lower input clamps here.
    pub min: f32,
    /// Maximum accepted value; higher input clamps here.
    pub max: f32,
    /// Value the engine starts with before any host state restore.
    pub default: f32,
    /// Step size hint for hosts with stepped controls.
    pub step: f32,
}

impl ParamSpec {
    /// Clamp a host-supplied value into this parameter's range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Fixed ceiling for the modulated down-sample target rate, Hz.
pub const RATE_CEILING_HZ: f32 = 44100.0;

/// Lowest selectable down-sample target rate, Hz.
pub const RATE_FLOOR_HZ: f32 = 100.0;

/// All parameters, in host display order.
pub const PARAMS: &[ParamSpec] = &[
    ParamSpec {
        id: id::GAIN_IN,
        name: "Gain IN",
        unit: ParamUnit::Decibels,
        min: -20.0,
        max: 20.0,
        default: 0.0,
        step: 0.1,
    },
    ParamSpec {
        id: id::DRY_WET_DS,
        name: "Dry/Wet DS",
        unit: ParamUnit::Percent,
        min: 0.0,
        max: 100.0,
        default: 50.0,
        step: 0.01,
    },
    ParamSpec {
        id: id::DOWN_SAMPLE,
        name: "DownSample",
        unit: ParamUnit::Hertz,
        min: RATE_FLOOR_HZ,
        max: RATE_CEILING_HZ,
        default: RATE_CEILING_HZ,
        step: 1.0,
    },
    ParamSpec {
        id: id::LFO_FREQ_DS,
        name: "LFO Frequency DownSample",
        unit: ParamUnit::Hertz,
        min: 0.1,
        max: 20.0,
        default: 1.0,
        step: 0.01,
    },
    ParamSpec {
        id: id::LFO_AMOUNT_DS,
        name: "LFO Amount DownSample",
        unit: ParamUnit::Hertz,
        min: 0.0,
        max: 22050.0,
        default: 0.0,
        step: 1.0,
    },
    ParamSpec {
        id: id::LFO_WAVEFORM_DS,
        name: "LFO Waveform DownSample",
        unit: ParamUnit::None,
        min: 0.0,
        max: 5.0,
        default: 0.0,
        step: 1.0,
    },
    ParamSpec {
        id: id::DRY_WET_BC,
        name: "Dry/Wet BC",
        unit: ParamUnit::Percent,
        min: 0.0,
        max: 100.0,
        default: 50.0,
        step: 0.01,
    },
    ParamSpec {
        id: id::BIT_CRUSH,
        name: "Bits",
        unit: ParamUnit::Bits,
        min: 1.0,
        max: 24.0,
        default: 24.0,
        step: 0.001,
    },
    ParamSpec {
        id: id::LFO_FREQ_BC,
        name: "LFO Frequency BitCrush",
        unit: ParamUnit::Hertz,
        min: 0.1,
        max: 20.0,
        default: 1.0,
        step: 0.01,
    },
    ParamSpec {
        id: id::LFO_AMOUNT_BC,
        name: "LFO Amount BitCrush",
        unit: ParamUnit::Bits,
        min: 0.0,
        max: 23.0,
        default: 0.0,
        step: 0.01,
    },
    ParamSpec {
        id: id::LFO_WAVEFORM_BC,
        name: "LFO Waveform BitCrush",
        unit: ParamUnit::None,
        min: 0.0,
        max: 5.0,
        default: 0.0,
        step: 1.0,
    },
    ParamSpec {
        id: id::GAIN_OUT,
        name: "Gain OUT",
        unit: ParamUnit::Decibels,
        min: -20.0,
        max: 20.0,
        default: 0.0,
        step: 0.1,
    },
];

/// Look up a parameter descriptor by identifier.
pub fn spec(param_id: &str) -> Option<&'static ParamSpec> {
    PARAMS.iter().find(|p| p.id == param_id)
}
