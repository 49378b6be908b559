//! Integration tests for estudio-cli.
//!
//! Tests invoke the built binary. Commands that touch the user config
//! directory run with `XDG_CONFIG_HOME` pointed at a temp dir, so those are
//! Linux-only.

use std::process::{Command, Output};

/// Helper to get the path to the `estudio` binary built by cargo.
fn estudio_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_estudio"))
}

fn run(args: &[&str]) -> Output {
    estudio_bin()
        .args(args)
        .output()
        .expect("failed to run estudio")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// `estudio graph`
// ---------------------------------------------------------------------------

#[test]
fn cli_graph_prints_full_chain() {
    let output = run(&["graph", "--sample-rate", "8000"]);
    assert!(output.status.success(), "estudio graph failed");

    let stdout = stdout(&output);
    assert!(stdout.contains("Nodes:       17"));
    assert!(stdout.contains("Edges:       19"));
    assert!(stdout.contains("source → eq[0] 31 Hz"));
    assert!(stdout.contains("gain → dry gain"));
    assert!(stdout.contains("gain → convolver"));
    assert!(stdout.contains("convolver → wet gain"));
    assert!(stdout.contains("analyser → destination"));
}

// ---------------------------------------------------------------------------
// `estudio apply`
// ---------------------------------------------------------------------------

#[test]
fn cli_apply_factory_preset_as_json() {
    let output = run(&["apply", "concert_hall", "--json", "--sample-rate", "8000"]);
    assert!(output.status.success(), "estudio apply failed");

    let state: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(state["preset"], "Concert Hall");
    let wet = state["wet"].as_f64().unwrap();
    let dry = state["dry"].as_f64().unwrap();
    assert!((wet - 0.55).abs() < 1e-6);
    assert!((wet + dry - 1.0).abs() < 1e-6);

    let bands = state["bands"].as_array().unwrap();
    assert_eq!(bands.len(), 10);
    assert_eq!(bands[0]["frequency"], 31.0);
    assert_eq!(bands[9]["gain_db"], -3.0);
}

#[test]
fn cli_apply_partial_preset_keeps_defaults() {
    let output = run(&["apply", "small_room", "--json", "--sample-rate", "8000"]);
    assert!(output.status.success());

    let state: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(state["preamp_linear"], 1.0);
    assert_eq!(state["pan"], 0.0);
    assert!(
        state["bands"]
            .as_array()
            .unwrap()
            .iter()
            .all(|b| b["gain_db"] == 0.0)
    );
}

#[test]
fn cli_apply_unknown_preset_fails() {
    let output = run(&["apply", "no_such_preset_12345"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "stderr: {stderr}");
}

// ---------------------------------------------------------------------------
// `estudio impulse`
// ---------------------------------------------------------------------------

#[test]
fn cli_impulse_writes_stereo_float_wav() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("ir.wav");

    let output = run(&[
        "impulse",
        path.to_str().unwrap(),
        "--duration",
        "0.5",
        "--sample-rate",
        "8000",
        "--seed",
        "3",
    ]);
    assert!(output.status.success(), "estudio impulse failed");

    let reader = hound::WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 8000);
    assert_eq!(spec.bits_per_sample, 32);
    assert_eq!(spec.sample_format, hound::SampleFormat::Float);
    assert_eq!(reader.duration(), 4000);
}

#[test]
fn cli_impulse_seed_is_reproducible() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let a = temp_dir.path().join("a.wav");
    let b = temp_dir.path().join("b.wav");
    for path in [&a, &b] {
        let output = run(&[
            "impulse",
            path.to_str().unwrap(),
            "--duration",
            "0.1",
            "--sample-rate",
            "8000",
            "--seed",
            "11",
        ]);
        assert!(output.status.success());
    }
    assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
}

#[test]
fn cli_impulse_rejects_zero_duration() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("ir.wav");
    let output = run(&["impulse", path.to_str().unwrap(), "--duration", "0"]);
    assert!(!output.status.success());
    assert!(!path.exists());
}

#[test]
fn cli_impulse_rejects_oversized_tail() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("ir.wav");
    let output = run(&["impulse", path.to_str().unwrap(), "--duration", "1e9"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exceeds the limit"), "stderr: {stderr}");
    assert!(!path.exists());
}

// ---------------------------------------------------------------------------
// `estudio presets` / `estudio settings` (isolated config dir)
// ---------------------------------------------------------------------------

#[cfg(target_os = "linux")]
mod config_dir {
    use super::*;
    use tempfile::TempDir;

    fn run_in(config: &TempDir, args: &[&str]) -> Output {
        estudio_bin()
            .env("XDG_CONFIG_HOME", config.path())
            .args(args)
            .output()
            .expect("failed to run estudio")
    }

    #[test]
    fn cli_presets_list_shows_factory() {
        let config = TempDir::new().unwrap();
        let output = run_in(&config, &["presets", "list"]);
        assert!(output.status.success());
        let stdout = stdout(&output);
        for name in ["Flat", "Bass Boost", "Concert Hall", "Wide Right"] {
            assert!(stdout.contains(name), "missing {name}");
        }
        assert!(stdout.contains("(none)"));
    }

    #[test]
    fn cli_presets_save_show_delete() {
        let config = TempDir::new().unwrap();

        let output = run_in(
            &config,
            &[
                "presets", "save", "late_night", "--preamp", "-6", "--eq", "3,-2",
                "--reverb-mix", "0.1",
            ],
        );
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        let saved = config.path().join("estudio/presets/late_night.toml");
        assert!(saved.is_file());

        let output = run_in(&config, &["presets", "show", "late_night"]);
        assert!(output.status.success());
        let stdout = stdout(&output);
        assert!(stdout.contains("-6.0 dB"));
        assert!(stdout.contains("EQ (2 bands)"));
        assert!(stdout.contains("Panner:     (unchanged)"));

        // Saving again without --force is refused.
        let output = run_in(&config, &["presets", "save", "late_night"]);
        assert!(!output.status.success());

        let output = run_in(&config, &["presets", "delete", "late_night", "--force"]);
        assert!(output.status.success());
        assert!(!saved.exists());
    }

    #[test]
    fn cli_presets_save_rejects_invalid_values() {
        let config = TempDir::new().unwrap();
        let output = run_in(&config, &["presets", "save", "too_wide", "--panner", "3"]);
        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("panner"), "stderr: {stderr}");
    }

    #[test]
    fn cli_presets_copy_and_validate() {
        let config = TempDir::new().unwrap();
        let output = run_in(&config, &["presets", "copy", "vocal", "--name", "my_vocal"]);
        assert!(output.status.success());

        let output = run_in(&config, &["presets", "validate", "my_vocal"]);
        assert!(output.status.success());
        assert!(stdout(&output).contains("is valid"));
    }

    #[test]
    fn cli_presets_cannot_delete_factory() {
        let config = TempDir::new().unwrap();
        let output = run_in(&config, &["presets", "delete", "rock", "--force"]);
        assert!(!output.status.success());
    }

    #[test]
    fn cli_settings_init_then_show() {
        let config = TempDir::new().unwrap();

        let output = run_in(&config, &["settings", "show"]);
        assert!(output.status.success());
        assert!(stdout(&output).contains("defaults"));

        let output = run_in(&config, &["settings", "init"]);
        assert!(output.status.success());
        assert!(config.path().join("estudio/settings.toml").is_file());

        let output = run_in(&config, &["settings", "show"]);
        assert!(output.status.success());
        let stdout = stdout(&output);
        assert!(stdout.contains("fft_size = 2048"));
        assert!(stdout.contains("settings.toml"));

        let output = run_in(&config, &["settings", "init"]);
        assert!(!output.status.success());
    }

    #[test]
    fn cli_graph_uses_settings_file() {
        let config = TempDir::new().unwrap();
        let dir = config.path().join("estudio");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("settings.toml"), "impulse_duration = 0.1\nseed = 1\n").unwrap();

        let output = run_in(&config, &["graph", "--sample-rate", "8000"]);
        assert!(output.status.success());
    }
}
