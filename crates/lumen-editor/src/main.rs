//! Host loop for the Lumen material and terrain tools.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p lumen-editor -- --preset fade --selection-size 2` to
//! apply a preset to a two-material selection, then tick the terrain scene.

mod scene;
mod session;
mod undo;

use std::process::ExitCode;

use clap::Parser;
use lumen_config::{CliArgs, Config, default_config_dir};
use lumen_materials::{InspectorFrame, Material, Preset, ShaderRegistry};
use lumen_terrain::PlayMode;
use tracing::{error, info};

use crate::scene::TerrainScene;
use crate::session::EditorSession;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone().map_or_else(default_config_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    lumen_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let registry = match &config.inspector.shader_manifest {
        Some(path) => match ShaderRegistry::from_ron(path) {
            Ok(registry) => registry,
            Err(e) => {
                error!("Failed to load shader manifest {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => ShaderRegistry::builtin(),
    };
    info!(
        "Shaders: {}",
        registry.names().collect::<Vec<_>>().join(", ")
    );

    let preset = match args.preset.as_deref().map(str::parse::<Preset>).transpose() {
        Ok(preset) => preset,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run_inspector(&registry, &config, preset, args.undo) {
        error!("{e}");
        return ExitCode::FAILURE;
    }
    run_terrain(&registry, &config);

    ExitCode::SUCCESS
}

fn run_inspector(
    registry: &ShaderRegistry,
    config: &Config,
    preset: Option<Preset>,
    undo: bool,
) -> Result<(), lumen_materials::RegistryError> {
    let mut session = EditorSession::new(registry, &config.inspector)?;
    let buttons = session.preset_buttons();
    info!(
        "Preset buttons: {}",
        buttons
            .iter()
            .map(|p| p.label())
            .collect::<Vec<_>>()
            .join(" | ")
    );

    let outcome = session.refresh(&InspectorFrame {
        preset_pressed: preset,
        edits: Vec::new(),
    });
    info!(changed = outcome.changed, preset = ?outcome.preset, "Inspector refresh");

    for material in session.selection() {
        log_material(material);
    }

    let history = session.history();
    if !history.is_empty() {
        info!(depth = history.len(), last = ?history.last_label(), "Undo history");
    }

    if undo && let Some(label) = session.undo() {
        info!("Undid {label}");
        for material in session.selection() {
            log_material(material);
        }
    }
    Ok(())
}

fn log_material(material: &Material) {
    let properties = material
        .properties()
        .filter_map(|(name, _)| material.float(name).ok().map(|v| format!("{name}={v}")))
        .collect::<Vec<_>>()
        .join(" ");
    info!(
        "{} [{}] queue={} keywords=[{}] {}",
        material.name(),
        material.shader(),
        material.render_queue(),
        material.keywords().collect::<Vec<_>>().join(", "),
        properties
    );
}

fn run_terrain(registry: &ShaderRegistry, config: &Config) {
    let mut scene = TerrainScene::new(registry, &config.terrain);
    for tick in 0..config.terrain.ticks {
        scene.tick();
        match scene.terrain_uniform() {
            Some(uniform) => info!(
                bytes = uniform.as_bytes().len(),
                "Tick {tick}: _TerrainSize = {:?}",
                uniform.size
            ),
            None => info!("Tick {tick}: terrain has no size parameter"),
        }
    }

    if config.terrain.start_playing {
        scene.set_play_mode(PlayMode::Editing);
        scene.tick();
        info!(
            "Stopped playing: _TerrainSize = {:?}",
            scene.terrain_uniform().map(|u| u.size)
        );
    }
}
