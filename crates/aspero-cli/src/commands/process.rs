//! File-based effect processing command.

use std::path::PathBuf;

use aspero_core::{linear_to_db, AudioBuffer};
use aspero_effects::{params, CrusherEngine};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::wav::{read_wav, write_wav, WavSpec};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Parameter setting (e.g., "BC=6" or "DWBC=100"); repeatable
    #[arg(short, long = "set", value_parser = parse_param, number_of_values = 1)]
    set: Vec<(String, f32)>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

fn parse_param(s: &str) -> Result<(String, f32), String> {
    let Some((key, value)) = s.split_once('=') else {
        return Err(format!("invalid parameter '{s}' (expected ID=VALUE)"));
    };
    let key = key.trim().to_uppercase();
    if params::spec(&key).is_none() {
        return Err(format!(
            "unknown parameter '{key}' (see `aspero params` for the list)"
        ));
    }
    let value: f32 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid value in '{s}'"))?;
    Ok((key, value))
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        anyhow::bail!("block size must be at least 1");
    }

    println!("Reading {}...", args.input.display());
    let (samples, spec) = read_wav(&args.input)?;
    let channels = spec.channels as usize;
    if channels > 2 {
        anyhow::bail!("only mono and stereo input is supported, got {channels} channels");
    }
    let total_frames = samples.len() / channels;
    println!(
        "  {} frames, {} ch, {} Hz, {:.2}s",
        total_frames,
        channels,
        spec.sample_rate,
        total_frames as f64 / f64::from(spec.sample_rate)
    );

    let mut engine = CrusherEngine::new();
    engine.prepare_to_play(f64::from(spec.sample_rate), args.block_size);
    for (id, value) in &args.set {
        engine.set_parameter(id, *value);
        debug!(param = %id, value = *value, "parameter set");
    }
    info!(
        block_size = args.block_size,
        sample_rate = spec.sample_rate,
        "engine prepared"
    );

    let pb = ProgressBar::new(total_frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut output = vec![0.0f32; samples.len()];
    let mut block = AudioBuffer::new(channels, args.block_size);
    let chunk_len = args.block_size * channels;
    let mut done = 0u64;

    for (in_chunk, out_chunk) in samples.chunks(chunk_len).zip(output.chunks_mut(chunk_len)) {
        let frames = in_chunk.len() / channels;
        if frames != block.frames() {
            // Final partial chunk; resizing outside the audio thread is fine.
            block.resize(channels, frames);
        }
        block.copy_from_interleaved(in_chunk);
        engine.process_block(&mut block);
        block.write_interleaved(out_chunk);

        done += frames as u64;
        pb.set_position(done);
    }
    pb.finish_with_message("done");

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&samples)),
        linear_to_db(peak(&samples))
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&output)),
        linear_to_db(peak(&output))
    );

    let out_spec = WavSpec {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };
    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &output, out_spec)?;
    println!("Done!");

    Ok(())
}

fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}
