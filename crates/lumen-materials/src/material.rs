//! Core material types: [`Material`], [`PropertyValue`], and [`MaterialHandle`].

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec4;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// MaterialHandle
// ---------------------------------------------------------------------------

/// Compact identifier for a material owned by a [`crate::MaterialStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialHandle(pub u32);

// ---------------------------------------------------------------------------
// AttributeError
// ---------------------------------------------------------------------------

/// Errors returned by named property lookups and writes.
#[derive(Debug, Error, PartialEq)]
pub enum AttributeError {
    /// The material's shader does not declare this property.
    #[error("property not found: {0}")]
    NotFound(String),

    /// The property exists but holds a different kind of value.
    #[error("property {name} is {found:?}, expected {expected:?}")]
    TypeMismatch {
        /// Property name.
        name: String,
        /// Kind the caller asked for.
        expected: PropertyKind,
        /// Kind the property actually has.
        found: PropertyKind,
    },
}

// ---------------------------------------------------------------------------
// Property values
// ---------------------------------------------------------------------------

/// The kind of value a shader property slot holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    /// Scalar; flags are stored as `0.0` / `1.0`.
    Float,
    /// Linear RGBA color.
    Color,
    /// Four-component vector.
    Vector,
    /// Texture reference plus tiling/offset.
    Texture,
}

/// A texture slot: the referenced texture (if any) and its tiling/offset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextureSlot {
    /// Asset path of the bound texture, `None` when unassigned.
    pub texture: Option<String>,
    /// `xy` = tiling, `zw` = offset.
    pub scale_offset: Vec4,
}

impl Default for TextureSlot {
    fn default() -> Self {
        Self {
            texture: None,
            scale_offset: Vec4::new(1.0, 1.0, 0.0, 0.0),
        }
    }
}

/// Value stored in a shader property slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Float(f32),
    Color([f32; 4]),
    Vector(Vec4),
    Texture(TextureSlot),
}

impl PropertyValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::Float(_) => PropertyKind::Float,
            PropertyValue::Color(_) => PropertyKind::Color,
            PropertyValue::Vector(_) => PropertyKind::Vector,
            PropertyValue::Texture(_) => PropertyKind::Texture,
        }
    }

    /// Encodes a boolean flag the way shaders read toggles.
    pub fn flag(enabled: bool) -> Self {
        PropertyValue::Float(if enabled { 1.0 } else { 0.0 })
    }
}

// ---------------------------------------------------------------------------
// Material
// ---------------------------------------------------------------------------

/// A material instance: named property slots, enabled keywords, render queue,
/// and per-pass toggles.
///
/// The set of property names is fixed when the material is created from a
/// [`crate::ShaderDef`]. Writes to names outside that set fail with
/// [`AttributeError::NotFound`] and leave the material untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    name: String,
    shader: String,
    properties: BTreeMap<String, PropertyValue>,
    keywords: BTreeSet<String>,
    disabled_passes: BTreeSet<String>,
    render_queue: i32,
    emissive_is_black: bool,
}

impl Material {
    /// Creates a material with the given property slots and their initial values.
    pub fn new(
        name: impl Into<String>,
        shader: impl Into<String>,
        render_queue: i32,
        properties: impl IntoIterator<Item = (String, PropertyValue)>,
    ) -> Self {
        Self {
            name: name.into(),
            shader: shader.into(),
            properties: properties.into_iter().collect(),
            keywords: BTreeSet::new(),
            disabled_passes: BTreeSet::new(),
            render_queue,
            emissive_is_black: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the shader this material was instantiated from.
    pub fn shader(&self) -> &str {
        &self.shader
    }

    /// Returns `true` if the shader declares a property with this name.
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Looks up a property value by name.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Iterates over all property slots in name order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Replaces a property value. The new value must have the same kind as the slot.
    ///
    /// # Errors
    ///
    /// [`AttributeError::NotFound`] if the shader has no slot named `name`,
    /// [`AttributeError::TypeMismatch`] if `value` is of a different kind than
    /// the slot. The material is unchanged on error.
    pub fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<(), AttributeError> {
        let slot = self
            .properties
            .get_mut(name)
            .ok_or_else(|| AttributeError::NotFound(name.to_string()))?;
        if slot.kind() != value.kind() {
            return Err(mismatch(name, value.kind(), slot));
        }
        *slot = value;
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<&PropertyValue, AttributeError> {
        self.properties
            .get(name)
            .ok_or_else(|| AttributeError::NotFound(name.to_string()))
    }

    /// Reads a float slot.
    ///
    /// # Errors
    ///
    /// [`AttributeError::NotFound`] if the shader has no slot named `name`,
    /// [`AttributeError::TypeMismatch`] if the slot holds a different kind.
    pub fn float(&self, name: &str) -> Result<f32, AttributeError> {
        match self.lookup(name)? {
            PropertyValue::Float(v) => Ok(*v),
            other => Err(mismatch(name, PropertyKind::Float, other)),
        }
    }

    /// Writes a float slot.
    ///
    /// # Errors
    ///
    /// [`AttributeError::NotFound`] if the shader has no slot named `name`,
    /// [`AttributeError::TypeMismatch`] if the slot is not a float slot. The
    /// material is unchanged on error.
    pub fn set_float(&mut self, name: &str, value: f32) -> Result<(), AttributeError> {
        self.set_property(name, PropertyValue::Float(value))
    }

    /// Reads a linear RGBA color slot.
    ///
    /// # Errors
    ///
    /// [`AttributeError::NotFound`] if the shader has no slot named `name`,
    /// [`AttributeError::TypeMismatch`] if the slot holds a different kind.
    pub fn color(&self, name: &str) -> Result<[f32; 4], AttributeError> {
        match self.lookup(name)? {
            PropertyValue::Color(c) => Ok(*c),
            other => Err(mismatch(name, PropertyKind::Color, other)),
        }
    }

    /// Writes a color slot.
    ///
    /// # Errors
    ///
    /// [`AttributeError::NotFound`] if the shader has no slot named `name`,
    /// [`AttributeError::TypeMismatch`] if the slot is not a color slot. The
    /// material is unchanged on error.
    pub fn set_color(&mut self, name: &str, value: [f32; 4]) -> Result<(), AttributeError> {
        self.set_property(name, PropertyValue::Color(value))
    }

    /// Reads a four-component vector slot.
    ///
    /// # Errors
    ///
    /// [`AttributeError::NotFound`] if the shader has no slot named `name`,
    /// [`AttributeError::TypeMismatch`] if the slot holds a different kind.
    pub fn vector(&self, name: &str) -> Result<Vec4, AttributeError> {
        match self.lookup(name)? {
            PropertyValue::Vector(v) => Ok(*v),
            other => Err(mismatch(name, PropertyKind::Vector, other)),
        }
    }

    /// Writes a vector slot.
    ///
    /// # Errors
    ///
    /// [`AttributeError::NotFound`] if the shader has no slot named `name`,
    /// [`AttributeError::TypeMismatch`] if the slot is not a vector slot. The
    /// material is unchanged on error.
    pub fn set_vector(&mut self, name: &str, value: Vec4) -> Result<(), AttributeError> {
        self.set_property(name, PropertyValue::Vector(value))
    }

    /// Reads a texture slot, including its scale/offset.
    ///
    /// # Errors
    ///
    /// [`AttributeError::NotFound`] if the shader has no slot named `name`,
    /// [`AttributeError::TypeMismatch`] if the slot holds a different kind.
    pub fn texture(&self, name: &str) -> Result<&TextureSlot, AttributeError> {
        match self.lookup(name)? {
            PropertyValue::Texture(t) => Ok(t),
            other => Err(mismatch(name, PropertyKind::Texture, other)),
        }
    }

    /// Writes a texture slot, replacing both the texture and its scale/offset.
    ///
    /// # Errors
    ///
    /// [`AttributeError::NotFound`] if the shader has no slot named `name`,
    /// [`AttributeError::TypeMismatch`] if the slot is not a texture slot. The
    /// material is unchanged on error.
    pub fn set_texture(&mut self, name: &str, value: TextureSlot) -> Result<(), AttributeError> {
        self.set_property(name, PropertyValue::Texture(value))
    }

    // -- keywords -----------------------------------------------------------

    pub fn enable_keyword(&mut self, keyword: &str) {
        self.keywords.insert(keyword.to_string());
    }

    pub fn disable_keyword(&mut self, keyword: &str) {
        self.keywords.remove(keyword);
    }

    pub fn is_keyword_enabled(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }

    /// Enabled keywords in name order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    // -- render state -------------------------------------------------------

    pub fn render_queue(&self) -> i32 {
        self.render_queue
    }

    pub fn set_render_queue(&mut self, queue: i32) {
        self.render_queue = queue;
    }

    /// Enables or disables a named shader pass. Passes are enabled by default.
    pub fn set_shader_pass_enabled(&mut self, pass: &str, enabled: bool) {
        if enabled {
            self.disabled_passes.remove(pass);
        } else {
            self.disabled_passes.insert(pass.to_string());
        }
    }

    pub fn is_shader_pass_enabled(&self, pass: &str) -> bool {
        !self.disabled_passes.contains(pass)
    }

    /// Global-illumination flag: when set, baking treats the emission as black.
    pub fn emissive_is_black(&self) -> bool {
        self.emissive_is_black
    }

    pub fn set_emissive_is_black(&mut self, value: bool) {
        self.emissive_is_black = value;
    }
}

fn mismatch(name: &str, expected: PropertyKind, found: &PropertyValue) -> AttributeError {
    AttributeError::TypeMismatch {
        name: name.to_string(),
        expected,
        found: found.kind(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
