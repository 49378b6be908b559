//! Estudio CLI - inspect the engine graph, manage presets, render impulses.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "estudio")]
#[command(author, version, about = "Estudio audio engine CLI", long_about = None)]
struct Cli {
    /// Log graph construction and routing (sets the default level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List and manage presets
    Presets(commands::presets::PresetsArgs),

    /// Build the engine graph and print its routing
    Graph(commands::graph::GraphArgs),

    /// Apply a preset and print the resulting parameter state
    Apply(commands::apply::ApplyArgs),

    /// Synthesize a reverb impulse response to a WAV file
    Impulse(commands::impulse::ImpulseArgs),

    /// Show or create the engine settings file
    Settings(commands::settings::SettingsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Graph(args) => commands::graph::run(args),
        Commands::Apply(args) => commands::apply::run(args),
        Commands::Impulse(args) => commands::impulse::run(args),
        Commands::Settings(args) => commands::settings::run(args),
    }
}
