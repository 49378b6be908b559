//! Engine settings commands.

use clap::{Args, Subcommand};
use estudio_config::{ensure_user_config_dir, load_settings, save_settings, settings_path};
use estudio_core::EngineConfig;

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    command: SettingsCommand,
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print the effective engine settings
    Show,

    /// Write a settings file with default values
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: SettingsArgs) -> anyhow::Result<()> {
    match args.command {
        SettingsCommand::Show => show(),
        SettingsCommand::Init { force } => init(force),
    }
}

fn show() -> anyhow::Result<()> {
    let path = settings_path();
    let (config, source) = if path.exists() {
        (load_settings(&path)?, path.display().to_string())
    } else {
        (EngineConfig::default(), "defaults (no settings file)".to_string())
    };

    println!("# Source: {source}");
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn init(force: bool) -> anyhow::Result<()> {
    ensure_user_config_dir()?;
    let path = settings_path();
    if path.exists() && !force {
        anyhow::bail!(
            "Settings file {} already exists. Use --force to overwrite.",
            path.display()
        );
    }
    save_settings(&EngineConfig::default(), &path)?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}
