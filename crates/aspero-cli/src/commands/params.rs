//! Parameter listing command.

use aspero_core::Waveform;
use aspero_effects::params::{ParamUnit, PARAMS};
use clap::Args;

#[derive(Args)]
pub struct ParamsArgs {}

pub fn run(_args: ParamsArgs) -> anyhow::Result<()> {
    println!(
        "{:<6} {:<28} {:>10} {:>10} {:>10}  unit",
        "id", "name", "min", "max", "default"
    );
    for p in PARAMS {
        println!(
            "{:<6} {:<28} {:>10} {:>10} {:>10}  {}",
            p.id,
            p.name,
            p.min,
            p.max,
            p.default,
            p.unit.label()
        );
    }

    // Waveform selectors take an index, not a value; spell the mapping out.
    let has_selector = PARAMS.iter().any(|p| p.unit == ParamUnit::None);
    if has_selector {
        println!("\nWaveform indices:");
        for i in 0..6 {
            println!("  {} = {}", i, Waveform::from_index(i).label());
        }
    }
    Ok(())
}
