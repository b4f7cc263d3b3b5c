//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Lumen editor command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "lumen", about = "Lumen material and terrain tools")]
pub struct CliArgs {
    /// Preset to apply to the selection (opaque, clip, fade, transparent).
    #[arg(long)]
    pub preset: Option<String>,

    /// Undo the preset right after applying it.
    #[arg(long)]
    pub undo: bool,

    /// Shader the edited materials are created from.
    #[arg(long)]
    pub shader: Option<String>,

    /// Number of materials in the selection.
    #[arg(long)]
    pub selection_size: Option<u32>,

    /// Start the terrain scene in play mode.
    #[arg(long)]
    pub play: bool,

    /// Number of terrain ticks to run.
    #[arg(long)]
    pub ticks: Option<u32>,

    /// Terrain width.
    #[arg(long)]
    pub terrain_width: Option<f32>,

    /// Terrain length.
    #[arg(long)]
    pub terrain_length: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref shader) = args.shader {
            self.inspector.shader = shader.clone();
        }
        if let Some(n) = args.selection_size {
            self.inspector.selection_size = n;
        }
        if args.play {
            self.terrain.start_playing = true;
        }
        if let Some(ticks) = args.ticks {
            self.terrain.ticks = ticks;
        }
        if let Some(w) = args.terrain_width {
            self.terrain.width = w;
        }
        if let Some(l) = args.terrain_length {
            self.terrain.length = l;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs::parse_from([
            "lumen",
            "--shader",
            "unlit",
            "--terrain-width",
            "100",
            "--play",
        ]);
        config.apply_cli_overrides(&args);
        assert_eq!(config.inspector.shader, "unlit");
        assert_eq!(config.terrain.width, 100.0);
        assert!(config.terrain.start_playing);
        // Non-overridden fields retain defaults
        assert_eq!(config.terrain.length, 1000.0);
        assert_eq!(config.terrain.ticks, 3);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::parse_from(["lumen"]));
        assert_eq!(config, original);
    }

    #[test]
    fn test_preset_is_not_a_config_setting() {
        let args = CliArgs::parse_from(["lumen", "--preset", "fade"]);
        assert_eq!(args.preset.as_deref(), Some("fade"));
        let mut config = Config::default();
        config.apply_cli_overrides(&args);
        assert_eq!(config, Config::default());
    }
}
