//! Impulse response rendering command.

use anyhow::Context;
use clap::Args;
use estudio_core::ImpulseResponse;
use estudio_core::impulse::{
    DEFAULT_IMPULSE_DECAY, DEFAULT_IMPULSE_DURATION, MAX_IMPULSE_FRAMES, bounded_frame_count,
};
use hound::{SampleFormat, WavSpec, WavWriter};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct ImpulseArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Tail length in seconds
    #[arg(long, default_value_t = DEFAULT_IMPULSE_DURATION)]
    duration: f32,

    /// Envelope exponent; larger values decay faster
    #[arg(long, default_value_t = DEFAULT_IMPULSE_DECAY)]
    decay: f32,

    /// Sample rate
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Noise seed for a reproducible file
    #[arg(long)]
    seed: Option<u64>,
}

pub fn run(args: ImpulseArgs) -> anyhow::Result<()> {
    if !(args.duration.is_finite() && args.duration > 0.0) {
        anyhow::bail!("--duration must be a positive number of seconds");
    }
    if !(args.decay.is_finite() && args.decay >= 0.0) {
        anyhow::bail!("--decay must be a non-negative number");
    }
    if args.sample_rate == 0 {
        anyhow::bail!("--sample-rate must be positive");
    }
    if bounded_frame_count(args.sample_rate as f32, args.duration).is_none() {
        anyhow::bail!(
            "--duration {}s at {} Hz exceeds the limit of {} frames",
            args.duration,
            args.sample_rate,
            MAX_IMPULSE_FRAMES
        );
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let ir = ImpulseResponse::synthesize(
        args.sample_rate as f32,
        args.duration,
        args.decay,
        &mut rng,
    );

    write_impulse(&args.output, &ir, args.sample_rate)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!(
        "Wrote {} ({} frames, {} channels, {:.2}s at {} Hz, decay {})",
        args.output.display(),
        ir.len(),
        ir.channel_count(),
        ir.duration_seconds(),
        args.sample_rate,
        args.decay
    );
    Ok(())
}

/// Write an impulse response as an interleaved 32-bit float WAV.
fn write_impulse(path: &Path, ir: &ImpulseResponse, sample_rate: u32) -> anyhow::Result<()> {
    let spec = WavSpec {
        channels: u16::try_from(ir.channel_count())?,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for sample in ir.interleaved() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}
