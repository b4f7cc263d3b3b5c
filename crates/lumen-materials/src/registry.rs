//! Shader registry: the explicit table of property slots each shader exposes.
//!
//! Every shader declares its properties by name, kind (implied by the default
//! value), and default. Materials are instantiated from these tables, so the
//! set of slots a material has is known up front instead of being discovered
//! at runtime. Tables load from a RON manifest or come from [`ShaderRegistry::builtin`].

use std::collections::{HashMap, HashSet};
use std::path::Path;

use glam::Vec4;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::material::{Material, PropertyKind, PropertyValue, TextureSlot};
use crate::names;
use crate::preset::RenderQueue;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors returned during registry construction and lookup.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// I/O error reading the manifest file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// RON deserialization error.
    #[error("ron parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// Two shaders share a name.
    #[error("duplicate shader name: {0}")]
    DuplicateShader(String),

    /// A shader declares the same property twice.
    #[error("shader {shader} declares property {property} twice")]
    DuplicateProperty {
        /// Shader name.
        shader: String,
        /// Repeated property name.
        property: String,
    },

    /// No shader with this name is registered.
    #[error("unknown shader: {0}")]
    UnknownShader(String),
}

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

/// One property slot of a shader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyDef {
    /// Property name as the shader declares it (e.g. `_BaseColor`).
    pub name: String,
    /// Initial value; its variant fixes the slot's [`PropertyKind`].
    pub default: PropertyValue,
}

impl PropertyDef {
    pub fn new(name: &str, default: PropertyValue) -> Self {
        Self {
            name: name.to_string(),
            default,
        }
    }

    pub fn kind(&self) -> PropertyKind {
        self.default.kind()
    }
}

/// A shader family and the property slots it exposes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShaderDef {
    pub name: String,
    /// Render queue assigned to freshly created materials.
    #[serde(default = "default_render_queue")]
    pub render_queue: i32,
    pub properties: Vec<PropertyDef>,
}

fn default_render_queue() -> i32 {
    RenderQueue::Geometry.value()
}

impl ShaderDef {
    /// Rejects shaders that declare a property name more than once.
    pub fn validated(self) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for prop in &self.properties {
            if !seen.insert(prop.name.as_str()) {
                return Err(RegistryError::DuplicateProperty {
                    shader: self.name.clone(),
                    property: prop.name.clone(),
                });
            }
        }
        Ok(self)
    }

    /// Looks up a property slot by exact name.
    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Creates a material with every slot at its default value.
    pub fn instantiate(&self, material_name: &str) -> Material {
        Material::new(
            material_name,
            self.name.as_str(),
            self.render_queue,
            self.properties
                .iter()
                .map(|p| (p.name.clone(), p.default.clone())),
        )
    }

    /// The full lit shader: blend state, shadows, premultiplied alpha and the
    /// legacy `_MainTex` / `_Color` slots that lightmapping still reads.
    pub fn lit() -> Self {
        Self {
            name: "lit".to_string(),
            render_queue: default_render_queue(),
            properties: vec![
                PropertyDef::new(names::BASE_MAP, PropertyValue::Texture(TextureSlot::default())),
                PropertyDef::new(names::BASE_COLOR, PropertyValue::Color([1.0, 1.0, 1.0, 1.0])),
                PropertyDef::new("_Cutoff", PropertyValue::Float(0.5)),
                PropertyDef::new(names::ALPHA_CLIP, PropertyValue::flag(false)),
                PropertyDef::new(names::PREMUL_ALPHA, PropertyValue::flag(false)),
                PropertyDef::new("_Metallic", PropertyValue::Float(0.0)),
                PropertyDef::new("_Smoothness", PropertyValue::Float(0.5)),
                PropertyDef::new(names::EMISSION_COLOR, PropertyValue::Color([0.0, 0.0, 0.0, 1.0])),
                PropertyDef::new(names::SRC_BLEND, PropertyValue::Float(1.0)),
                PropertyDef::new(names::DST_BLEND, PropertyValue::Float(0.0)),
                PropertyDef::new(names::Z_WRITE, PropertyValue::flag(true)),
                PropertyDef::new(names::SHADOWS, PropertyValue::Float(0.0)),
                PropertyDef::new(names::MAIN_TEX, PropertyValue::Texture(TextureSlot::default())),
                PropertyDef::new(names::COLOR, PropertyValue::Color([1.0, 1.0, 1.0, 1.0])),
            ],
        }
    }

    /// Unlit shader: no shadow mode, no premultiplied alpha, no legacy slots.
    pub fn unlit() -> Self {
        Self {
            name: "unlit".to_string(),
            render_queue: default_render_queue(),
            properties: vec![
                PropertyDef::new(names::BASE_MAP, PropertyValue::Texture(TextureSlot::default())),
                PropertyDef::new(names::BASE_COLOR, PropertyValue::Color([1.0, 1.0, 1.0, 1.0])),
                PropertyDef::new("_Cutoff", PropertyValue::Float(0.5)),
                PropertyDef::new(names::ALPHA_CLIP, PropertyValue::flag(false)),
                PropertyDef::new(names::SRC_BLEND, PropertyValue::Float(1.0)),
                PropertyDef::new(names::DST_BLEND, PropertyValue::Float(0.0)),
                PropertyDef::new(names::Z_WRITE, PropertyValue::flag(true)),
            ],
        }
    }

    /// Terrain shader: splat color plus the `_TerrainSize` vector.
    pub fn terrain() -> Self {
        Self {
            name: "terrain".to_string(),
            render_queue: default_render_queue(),
            properties: vec![
                PropertyDef::new(names::BASE_COLOR, PropertyValue::Color([1.0, 1.0, 1.0, 1.0])),
                PropertyDef::new(names::TERRAIN_SIZE, PropertyValue::Vector(Vec4::ZERO)),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// RON manifest types
// ---------------------------------------------------------------------------

/// Top-level RON manifest for shader definitions.
#[derive(Deserialize)]
pub struct ShaderManifest {
    pub shaders: Vec<ShaderDef>,
}

// ---------------------------------------------------------------------------
// ShaderRegistry
// ---------------------------------------------------------------------------

/// Name-indexed collection of [`ShaderDef`]s. Immutable after construction.
pub struct ShaderRegistry {
    shaders: Vec<ShaderDef>,
    name_to_index: HashMap<String, usize>,
}

impl ShaderRegistry {
    /// Builds a registry from shader definitions, validating each one.
    pub fn new(shaders: impl IntoIterator<Item = ShaderDef>) -> Result<Self, RegistryError> {
        let mut registry = Self {
            shaders: Vec::new(),
            name_to_index: HashMap::new(),
        };
        for shader in shaders {
            let shader = shader.validated()?;
            if registry.name_to_index.contains_key(&shader.name) {
                return Err(RegistryError::DuplicateShader(shader.name));
            }
            registry
                .name_to_index
                .insert(shader.name.clone(), registry.shaders.len());
            registry.shaders.push(shader);
        }
        Ok(registry)
    }

    /// The `lit`, `unlit` and `terrain` shaders.
    pub fn builtin() -> Self {
        let shaders = [ShaderDef::lit(), ShaderDef::unlit(), ShaderDef::terrain()];
        let mut name_to_index = HashMap::new();
        for (i, shader) in shaders.iter().enumerate() {
            name_to_index.insert(shader.name.clone(), i);
        }
        Self {
            shaders: shaders.into(),
            name_to_index,
        }
    }

    /// Load the registry from a RON manifest file on disk.
    pub fn from_ron(path: &Path) -> Result<Self, RegistryError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Load the registry from a RON string.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, RegistryError> {
        let manifest: ShaderManifest = ron::from_str(ron_str)?;
        let registry = Self::new(manifest.shaders)?;
        tracing::debug!(shaders = registry.len(), "loaded shader manifest");
        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Option<&ShaderDef> {
        self.name_to_index.get(name).map(|&i| &self.shaders[i])
    }

    /// Creates a material from the named shader.
    pub fn instantiate(&self, shader: &str, material_name: &str) -> Result<Material, RegistryError> {
        self.get(shader)
            .map(|def| def.instantiate(material_name))
            .ok_or_else(|| RegistryError::UnknownShader(shader.to_string()))
    }

    /// Shader names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shaders.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.shaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shaders.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
