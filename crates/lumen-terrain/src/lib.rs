//! Terrain shader integration: keeps each terrain material's `_TerrainSize`
//! in step with the terrain's horizontal extent.

mod controller;
mod sync;
mod terrain;

pub use controller::{
    MaterialAssets, PlayMode, TerrainShaderController, in_edit_mode, register_terrain_systems,
    start_terrain_controllers, update_terrain_controllers,
};
pub use sync::{TerrainSizeUniform, sync_terrain_size, terrain_size_vector};
pub use terrain::{Terrain, TerrainData, TerrainExtent};
