//! ECS wiring that keeps terrain materials' `_TerrainSize` current.
//!
//! A [`TerrainShaderController`] syncs once when it is added. After that it
//! re-syncs every tick while the world is in [`PlayMode::Editing`], since the
//! extent only changes while authoring. In [`PlayMode::Playing`] the value
//! written at startup is kept.

use bevy_ecs::prelude::*;
use lumen_materials::{MaterialHandle, MaterialStore};

use crate::sync::sync_terrain_size;
use crate::terrain::Terrain;

/// Whether the world is being authored or simulated.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayMode {
    #[default]
    Editing,
    Playing,
}

/// Material storage shared with the terrain systems.
#[derive(Resource, Default)]
pub struct MaterialAssets(pub MaterialStore);

/// Pushes a terrain's extent into its material.
///
/// `terrain` names the entity holding the [`Terrain`]; when `None`, the
/// controller's own entity is used. The material is resolved once, when
/// the controller starts.
#[derive(Component, Clone, Debug, Default)]
pub struct TerrainShaderController {
    pub terrain: Option<Entity>,
    material: Option<MaterialHandle>,
}

impl TerrainShaderController {
    pub fn new(terrain: Entity) -> Self {
        Self {
            terrain: Some(terrain),
            material: None,
        }
    }

    /// Controller for a [`Terrain`] on the same entity.
    pub fn on_self() -> Self {
        Self::default()
    }

    /// Material captured at startup, if the terrain had one.
    pub fn material(&self) -> Option<MaterialHandle> {
        self.material
    }
}

/// Run condition: true while authoring.
pub fn in_edit_mode(mode: Res<PlayMode>) -> bool {
    *mode == PlayMode::Editing
}

/// Resolves newly added controllers and performs their initial sync.
pub fn start_terrain_controllers(
    mut controllers: Query<(Entity, &mut TerrainShaderController), Added<TerrainShaderController>>,
    terrains: Query<&Terrain>,
    mut assets: ResMut<MaterialAssets>,
) {
    for (entity, mut controller) in &mut controllers {
        let terrain_entity = *controller.terrain.get_or_insert(entity);
        let Ok(terrain) = terrains.get(terrain_entity) else {
            tracing::warn!(?entity, "terrain shader controller has no terrain");
            controller.terrain = None;
            continue;
        };

        controller.material = terrain.material_template;
        let extent = terrain.data.extent();
        let target = controller.material.and_then(|h| assets.0.get_mut(h));
        if sync_terrain_size(extent, target) {
            tracing::debug!(?entity, width = extent.width, length = extent.length, "terrain size synced");
        }
    }
}

/// Re-syncs every started controller. Scheduled with [`in_edit_mode`].
pub fn update_terrain_controllers(
    controllers: Query<&TerrainShaderController>,
    terrains: Query<&Terrain>,
    mut assets: ResMut<MaterialAssets>,
) {
    for controller in &controllers {
        let Some(terrain) = controller.terrain.and_then(|e| terrains.get(e).ok()) else {
            continue;
        };
        let target = controller.material.and_then(|h| assets.0.get_mut(h));
        sync_terrain_size(terrain.data.extent(), target);
    }
}

/// Adds the terrain systems to `schedule`, startup before update.
pub fn register_terrain_systems(schedule: &mut Schedule) {
    schedule.add_systems(
        (
            start_terrain_controllers,
            update_terrain_controllers.run_if(in_edit_mode),
        )
            .chain(),
    );
}
