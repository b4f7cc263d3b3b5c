//! Writing a terrain's extent into its material.

use bytemuck::{Pod, Zeroable};
use glam::Vec4;
use lumen_materials::{Material, names};

use crate::terrain::TerrainExtent;

/// `_TerrainSize` packed for upload: `(width, length, 0, 0)`, 16 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TerrainSizeUniform {
    pub size: [f32; 4],
}

impl TerrainSizeUniform {
    /// Packs the `_TerrainSize` currently on `material`, if it has the slot.
    pub fn from_material(material: &Material) -> Option<Self> {
        let size = material.vector(names::TERRAIN_SIZE).ok()?;
        Some(Self {
            size: size.to_array(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// The shader-facing vector for an extent. Values are passed through unchecked.
pub fn terrain_size_vector(extent: TerrainExtent) -> Vec4 {
    Vec4::new(extent.width, extent.length, 0.0, 0.0)
}

/// Writes `extent` into `_TerrainSize` on `target`.
///
/// Returns `true` if a write happened. An absent target, or a material
/// without a vector `_TerrainSize` slot, is left alone.
pub fn sync_terrain_size(extent: TerrainExtent, target: Option<&mut Material>) -> bool {
    let Some(material) = target else {
        return false;
    };
    match material.set_vector(names::TERRAIN_SIZE, terrain_size_vector(extent)) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(material = material.name(), %err, "terrain size not written");
            false
        }
    }
}
