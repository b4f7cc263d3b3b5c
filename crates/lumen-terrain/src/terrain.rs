//! Terrain data and the ECS component that carries it.

use bevy_ecs::prelude::*;
use glam::Vec3;
use lumen_materials::MaterialHandle;

/// Horizontal footprint of a terrain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainExtent {
    /// Size along X.
    pub width: f32,
    /// Size along Z.
    pub length: f32,
}

impl TerrainExtent {
    pub fn new(width: f32, length: f32) -> Self {
        Self { width, length }
    }
}

/// Terrain asset data. `size` is in world units; `y` is the height range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainData {
    pub size: Vec3,
}

impl TerrainData {
    pub fn new(size: Vec3) -> Self {
        Self { size }
    }

    /// Width (X) and length (Z); the height range is not part of the extent.
    pub fn extent(&self) -> TerrainExtent {
        TerrainExtent::new(self.size.x, self.size.z)
    }
}

/// A terrain in the world.
#[derive(Component, Clone, Debug)]
pub struct Terrain {
    pub data: TerrainData,
    /// Material the terrain renders with, if one is assigned.
    pub material_template: Option<MaterialHandle>,
}
