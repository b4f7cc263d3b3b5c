//! Shader property, keyword, and pass names.

pub const ALPHA_CLIP: &str = "_AlphaClip";
pub const PREMUL_ALPHA: &str = "_PremulAlpha";
pub const SRC_BLEND: &str = "_SrcBlend";
pub const DST_BLEND: &str = "_DstBlend";
pub const Z_WRITE: &str = "_ZWrite";
pub const SHADOWS: &str = "_Shadows";
pub const EMISSION_COLOR: &str = "_EmissionColor";
pub const TERRAIN_SIZE: &str = "_TerrainSize";

pub const BASE_MAP: &str = "_BaseMap";
pub const BASE_COLOR: &str = "_BaseColor";
/// Legacy slot mirrored from [`BASE_MAP`].
pub const MAIN_TEX: &str = "_MainTex";
/// Legacy slot mirrored from [`BASE_COLOR`].
pub const COLOR: &str = "_Color";

/// Alpha clipping shares its keyword name with the `_AlphaClip` toggle.
pub const ALPHA_CLIP_KEYWORD: &str = ALPHA_CLIP;
pub const PREMULTIPLY_KEYWORD: &str = "_ALPHAPREMULTIPLY_ON";
pub const SHADOWS_CLIP_KEYWORD: &str = "_SHADOWS_CLIP";
pub const SHADOWS_DITHER_KEYWORD: &str = "_SHADOWS_DITHER";

pub const SHADOW_CASTER_PASS: &str = "ShadowCaster";
