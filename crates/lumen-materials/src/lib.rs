//! Material system: shader property tables, material instances, blend presets,
//! and the inspector that applies them.
//!
//! Presets are written through [`PresetApplier`], which skips any slot the
//! selected materials do not expose. After every change the inspector runs the
//! derived fix-ups (shadow-caster pass toggle, legacy slot mirroring).

mod applier;
mod inspector;
mod material;
pub mod names;
mod preset;
mod properties;
mod registry;
mod store;

pub use applier::{
    PresetApplier, apply_derived_fixups, apply_preset, copy_light_mapping_properties,
    set_shadow_caster_pass,
};
pub use inspector::{
    InspectorFrame, InspectorOutcome, MaterialInspector, NoUndo, PropertyEdit, UndoRecorder,
};
pub use material::{
    AttributeError, Material, MaterialHandle, PropertyKind, PropertyValue, TextureSlot,
};
pub use preset::{BlendFactor, Preset, PresetError, PresetValues, RenderQueue, ShadowMode};
pub use properties::{MaterialProperties, MaterialProperty};
pub use registry::{PropertyDef, RegistryError, ShaderDef, ShaderManifest, ShaderRegistry};
pub use store::MaterialStore;
