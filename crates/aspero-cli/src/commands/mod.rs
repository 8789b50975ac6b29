//! CLI subcommands.

pub mod params;
pub mod process;
