//! Terrain scene: a world with one terrain and its shader controller.

use bevy_ecs::prelude::*;
use glam::Vec3;
use lumen_config::TerrainConfig;
use lumen_materials::{MaterialHandle, MaterialStore, ShaderRegistry};
use lumen_terrain::{
    MaterialAssets, PlayMode, Terrain, TerrainData, TerrainShaderController, TerrainSizeUniform,
    register_terrain_systems,
};

/// Drives the terrain systems one tick at a time.
pub struct TerrainScene {
    world: World,
    schedule: Schedule,
    terrain: Entity,
    material: Option<MaterialHandle>,
}

impl TerrainScene {
    /// Builds the scene. The terrain gets a material from the `terrain`
    /// shader if the registry has one, and no material otherwise.
    pub fn new(registry: &ShaderRegistry, config: &TerrainConfig) -> Self {
        let mut world = World::new();
        let mut store = MaterialStore::new();
        let material = registry
            .instantiate("terrain", "terrain_material")
            .ok()
            .map(|m| store.insert(m));
        if material.is_none() {
            tracing::warn!("no terrain shader registered, terrain has no material");
        }

        world.insert_resource(MaterialAssets(store));
        world.insert_resource(if config.start_playing {
            PlayMode::Playing
        } else {
            PlayMode::Editing
        });

        let terrain = world
            .spawn((
                Terrain {
                    data: TerrainData::new(Vec3::new(config.width, config.height, config.length)),
                    material_template: material,
                },
                TerrainShaderController::on_self(),
            ))
            .id();

        let mut schedule = Schedule::default();
        register_terrain_systems(&mut schedule);

        Self {
            world,
            schedule,
            terrain,
            material,
        }
    }

    pub fn tick(&mut self) {
        self.schedule.run(&mut self.world);
    }

    pub fn set_play_mode(&mut self, mode: PlayMode) {
        self.world.insert_resource(mode);
    }

    /// The terrain material's `_TerrainSize`, packed for upload.
    pub fn terrain_uniform(&self) -> Option<TerrainSizeUniform> {
        let handle = self.material?;
        TerrainSizeUniform::from_material(self.world.resource::<MaterialAssets>().0.get(handle)?)
    }
}
