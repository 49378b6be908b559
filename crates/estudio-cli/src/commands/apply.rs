//! Preset application command.
//!
//! Applies a preset to a freshly built engine on the offline host and
//! reports the parameter values the host ended up with.

use super::common::{engine_settings, load_preset, offline_engine};
use clap::Args;
use estudio_config::validate_preset;
use estudio_core::{AudioEngine, AudioParam, OfflineGraph, linear_to_db};
use serde::Serialize;

#[derive(Args)]
pub struct ApplyArgs {
    /// Preset name or path
    preset: String,

    /// Print the state as JSON
    #[arg(long)]
    json: bool,

    /// Sample rate of the offline context
    #[arg(long, default_value = "48000")]
    sample_rate: f32,
}

/// Parameter values read back from the host after a preset ran.
#[derive(Debug, Serialize)]
struct EngineState {
    preset: String,
    preamp_linear: f32,
    preamp_db: f32,
    pan: f32,
    reverb_mix: f32,
    wet: f32,
    dry: f32,
    bands: Vec<BandState>,
}

#[derive(Debug, Serialize)]
struct BandState {
    frequency: f32,
    q: f32,
    gain_db: f32,
}

impl EngineState {
    fn read(engine: &AudioEngine<OfflineGraph>, preset: &str) -> anyhow::Result<Self> {
        let nodes = engine
            .nodes()
            .ok_or_else(|| anyhow::anyhow!("engine did not initialize"))?;
        let host = engine.host();
        let param = |node, param| {
            host.param(node, param)
                .ok_or_else(|| anyhow::anyhow!("host has no {param} on {node}"))
        };

        let preamp_linear = param(nodes.gain, AudioParam::Gain)?;
        let bands = nodes
            .eq_bands
            .iter()
            .map(|&band| {
                Ok(BandState {
                    frequency: param(band, AudioParam::Frequency)?,
                    q: param(band, AudioParam::Q)?,
                    gain_db: param(band, AudioParam::Gain)?,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self {
            preset: preset.to_string(),
            preamp_linear,
            preamp_db: linear_to_db(preamp_linear),
            pan: param(nodes.panner, AudioParam::Pan)?,
            reverb_mix: engine.reverb_mix(),
            wet: param(nodes.wet_gain, AudioParam::Gain)?,
            dry: param(nodes.dry_gain, AudioParam::Gain)?,
            bands,
        })
    }

    fn print(&self) {
        println!("Preset: {}", self.preset);
        println!();
        println!(
            "Preamp:     {:.3} ({:+.1} dB)",
            self.preamp_linear, self.preamp_db
        );
        println!("Pan:        {:+.2}", self.pan);
        println!(
            "Reverb mix: {:.2} (wet {:.2}, dry {:.2})",
            self.reverb_mix, self.wet, self.dry
        );
        println!();
        println!("EQ:");
        for band in &self.bands {
            println!(
                "  {:>7} Hz  Q {:.1}  {:+.1} dB",
                band.frequency, band.q, band.gain_db
            );
        }
    }
}

pub fn run(args: ApplyArgs) -> anyhow::Result<()> {
    let preset = load_preset(&args.preset)?;
    if let Err(err) = validate_preset(&preset) {
        tracing::warn!(preset = %preset.name, %err, "applying preset with out-of-range values");
    }

    let mut engine = offline_engine(args.sample_rate, engine_settings())?;
    engine.apply_preset(Some(&preset));
    let state = EngineState::read(&engine, &preset.name)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        state.print();
    }
    Ok(())
}
