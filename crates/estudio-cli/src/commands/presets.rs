//! Preset management commands.
//!
//! Provides commands to list, show, save, validate and manage presets.

use super::common::{load_preset, parse_eq};
use clap::{Args, Subcommand};
use estudio_config::{
    ConfigError, Preset, ensure_user_presets_dir, factory_presets, get_factory_preset,
    is_factory_preset, list_user_presets, load_preset as load_preset_file, preset_filename,
    preset_name_from_path, save_preset as save_preset_file, system_presets_dir, user_config_dir,
    user_presets_dir, validate_preset,
};
use estudio_core::BAND_FREQUENCIES;

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only factory presets
        #[arg(long)]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Show details of a preset
    Show {
        /// Preset name or path
        name: String,
    },

    /// Save a new user preset from parameter values
    Save {
        /// Name for the new preset
        name: String,

        /// Preamp gain in dB
        #[arg(long, allow_hyphen_values = true)]
        preamp: Option<f32>,

        /// Pan position (-1 left, 1 right)
        #[arg(long, allow_hyphen_values = true)]
        panner: Option<f32>,

        /// Reverb wet ratio (0-1)
        #[arg(long)]
        reverb_mix: Option<f32>,

        /// Comma-separated EQ gains in dB, lowest band first (e.g. "3,-2")
        #[arg(long, allow_hyphen_values = true)]
        eq: Option<String>,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Overwrite if preset already exists
        #[arg(long)]
        force: bool,
    },

    /// Delete a user preset
    Delete {
        /// Preset name to delete
        name: String,

        /// Confirm deletion
        #[arg(long)]
        force: bool,
    },

    /// Copy a factory preset to user presets for customization
    Copy {
        /// Factory preset name
        source: String,

        /// New preset name (optional, uses source name if not specified)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Check a preset's values against accepted ranges
    Validate {
        /// Preset name or path
        name: String,
    },

    /// Show preset directories
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list_presets(factory, user),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Save {
            name,
            preamp,
            panner,
            reverb_mix,
            eq,
            description,
            force,
        } => {
            let mut preset = Preset::new(&name);
            preset.preamp = preamp;
            preset.panner = panner;
            preset.reverb_mix = reverb_mix;
            preset.description = description;
            if let Some(eq) = eq {
                preset.eq = Some(parse_eq(&eq).map_err(anyhow::Error::msg)?);
            }
            save_preset(&name, &preset, force)
        }
        PresetsCommand::Delete { name, force } => delete_preset(&name, force),
        PresetsCommand::Copy { source, name } => copy_preset(&source, name.as_deref()),
        PresetsCommand::Validate { name } => validate(&name),
        PresetsCommand::Paths => show_paths(),
    }
}

fn list_presets(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    let show_factory = !user_only;
    let show_user = !factory_only;

    if show_factory {
        println!("Factory Presets:");
        println!("================");
        for preset in factory_presets() {
            let desc = preset.description.as_deref().unwrap_or("");
            println!("  {:20} - {}", preset.name, desc);
        }
        println!();
    }

    if show_user {
        println!("User Presets:");
        println!("=============");
        let user_presets = list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Create a preset with: estudio presets save <name> --eq \"...\"\n");
        } else {
            for path in user_presets {
                let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
                match load_preset_file(&path) {
                    Ok(preset) => {
                        let desc = preset.description.as_deref().unwrap_or("");
                        println!("  {name:20} - {desc}");
                    }
                    Err(_) => println!("  {name:20} - (error loading)"),
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description: {desc}");
        println!();
    }

    let unset = || "(unchanged)".to_string();
    println!(
        "Preamp:     {}",
        preset.preamp.map_or_else(unset, |db| format!("{db:+.1} dB"))
    );
    println!(
        "Panner:     {}",
        preset.panner.map_or_else(unset, |pan| format!("{pan:+.2}"))
    );
    println!(
        "Reverb mix: {}",
        preset.reverb_mix.map_or_else(unset, |mix| format!("{mix:.2}"))
    );

    match &preset.eq {
        Some(eq) => {
            println!("EQ ({} bands):", eq.len());
            for (i, db) in eq.iter().enumerate() {
                match BAND_FREQUENCIES.get(i) {
                    Some(freq) => println!("  {freq:>7} Hz  {db:+.1} dB"),
                    None => println!("  (band {i} ignored)  {db:+.1} dB"),
                }
            }
        }
        None => println!("EQ:         (unchanged)"),
    }

    Ok(())
}

fn save_preset(name: &str, preset: &Preset, force: bool) -> anyhow::Result<()> {
    if is_factory_preset(name) {
        anyhow::bail!("'{name}' is a factory preset name. Choose another name.");
    }
    validate_preset(preset).map_err(ConfigError::from)?;

    ensure_user_presets_dir()?;
    let preset_path = user_presets_dir().join(preset_filename(name));

    if preset_path.exists() && !force {
        anyhow::bail!("Preset '{name}' already exists. Use --force to overwrite.");
    }

    save_preset_file(preset, &preset_path)?;

    println!("Saved preset '{}' to {}", name, preset_path.display());
    Ok(())
}

fn delete_preset(name: &str, force: bool) -> anyhow::Result<()> {
    if get_factory_preset(name).is_some() {
        anyhow::bail!("Cannot delete factory preset '{name}'. Factory presets are built-in.");
    }

    let preset_path = user_presets_dir().join(preset_filename(name));

    if !preset_path.exists() {
        anyhow::bail!("User preset '{name}' not found.");
    }

    if !force {
        anyhow::bail!("Use --force to confirm deletion of preset '{name}'.");
    }

    std::fs::remove_file(&preset_path).map_err(|e| ConfigError::remove_file(&preset_path, e))?;
    println!("Deleted preset '{name}'.");

    Ok(())
}

fn copy_preset(source: &str, new_name: Option<&str>) -> anyhow::Result<()> {
    let preset = get_factory_preset(source)
        .ok_or_else(|| anyhow::anyhow!("Factory preset '{source}' not found."))?;

    let target_name = new_name.unwrap_or(source);

    ensure_user_presets_dir()?;
    let preset_path = user_presets_dir().join(preset_filename(target_name));

    if preset_path.exists() {
        anyhow::bail!(
            "Preset '{target_name}' already exists in user presets. Choose a different name with --name."
        );
    }

    let copy = Preset {
        name: target_name.to_string(),
        description: preset.description.as_ref().map(|d| format!("{d} (copy)")),
        ..preset
    };
    save_preset_file(&copy, &preset_path)?;

    println!("Copied factory preset '{source}' to user preset '{target_name}'");
    println!("Path: {}", preset_path.display());

    Ok(())
}

fn validate(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;
    validate_preset(&preset).map_err(ConfigError::from)?;
    println!("Preset '{}' is valid.", preset.name);
    Ok(())
}

fn show_paths() -> anyhow::Result<()> {
    println!("Preset Directories:");
    println!("===================");
    println!();
    println!("User presets:   {}", user_presets_dir().display());
    println!("System presets: {}", system_presets_dir().display());
    println!("Config dir:     {}", user_config_dir().display());

    Ok(())
}
