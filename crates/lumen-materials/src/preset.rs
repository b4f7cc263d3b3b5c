//! Blend presets and the render-state enums they are built from.
//!
//! A [`Preset`] is a compile-time bundle of [`PresetValues`]; applying one is
//! the job of [`crate::PresetApplier`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned when selecting or applying a preset.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PresetError {
    /// The preset is not offered for the current selection.
    #[error("preset {0} is not available for this selection")]
    Unavailable(Preset),

    /// No preset has this name.
    #[error("unknown preset: {0}")]
    UnknownName(String),
}

// ---------------------------------------------------------------------------
// Render state enums
// ---------------------------------------------------------------------------

/// Blend factor, numbered the way blend-state properties store it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlendFactor {
    Zero = 0,
    One = 1,
    DstColor = 2,
    SrcColor = 3,
    OneMinusDstColor = 4,
    SrcAlpha = 5,
    OneMinusSrcColor = 6,
    DstAlpha = 7,
    OneMinusDstAlpha = 8,
    SrcAlphaSaturate = 9,
    OneMinusSrcAlpha = 10,
}

impl BlendFactor {
    /// Value written into `_SrcBlend` / `_DstBlend`.
    pub fn as_f32(self) -> f32 {
        self as u8 as f32
    }
}

/// Draw-order bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderQueue {
    Background,
    Geometry,
    AlphaTest,
    GeometryLast,
    Transparent,
    Overlay,
}

impl RenderQueue {
    pub fn value(self) -> i32 {
        match self {
            RenderQueue::Background => 1000,
            RenderQueue::Geometry => 2000,
            RenderQueue::AlphaTest => 2450,
            RenderQueue::GeometryLast => 2500,
            RenderQueue::Transparent => 3000,
            RenderQueue::Overlay => 4000,
        }
    }
}

/// Shadow casting mode. Ordered: every mode before [`ShadowMode::Off`] casts shadows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ShadowMode {
    On = 0,
    Clip = 1,
    Dither = 2,
    Off = 3,
}

impl ShadowMode {
    pub fn as_f32(self) -> f32 {
        self as u8 as f32
    }

    /// Whether a stored `_Shadows` value casts shadows.
    ///
    /// Compares against [`ShadowMode::Off`] numerically so out-of-range values
    /// behave the same way the shader reads them.
    pub fn value_casts_shadows(value: f32) -> bool {
        value < ShadowMode::Off.as_f32()
    }

    pub fn casts_shadows(self) -> bool {
        self < ShadowMode::Off
    }
}

// ---------------------------------------------------------------------------
// Preset
// ---------------------------------------------------------------------------

/// The four blend presets offered by the material inspector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    Opaque,
    Clip,
    Fade,
    Transparent,
}

/// Attribute values a preset writes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PresetValues {
    /// `_AlphaClip`, paired with the `_AlphaClip` keyword.
    pub alpha_clip: bool,
    /// `_ALPHAPREMULTIPLY_ON` keyword; there is no backing property.
    pub premultiply_alpha: bool,
    /// `_SrcBlend` factor.
    pub src_blend: BlendFactor,
    /// `_DstBlend` factor.
    pub dst_blend: BlendFactor,
    /// `_ZWrite`, written as 1.0 or 0.0.
    pub z_write: bool,
    /// Render queue bucket, written on every material.
    pub render_queue: RenderQueue,
    /// `_Shadows`, paired with the `_SHADOWS_CLIP` / `_SHADOWS_DITHER` keywords.
    pub shadows: ShadowMode,
}

impl Preset {
    /// All presets in button order.
    pub const ALL: [Preset; 4] = [
        Preset::Opaque,
        Preset::Clip,
        Preset::Fade,
        Preset::Transparent,
    ];

    /// Button label, also used as the undo label.
    pub fn label(self) -> &'static str {
        match self {
            Preset::Opaque => "Opaque",
            Preset::Clip => "Clip",
            Preset::Fade => "Fade",
            Preset::Transparent => "Transparent",
        }
    }

    pub const fn values(self) -> PresetValues {
        match self {
            Preset::Opaque => PresetValues {
                alpha_clip: false,
                premultiply_alpha: false,
                src_blend: BlendFactor::One,
                dst_blend: BlendFactor::Zero,
                z_write: true,
                render_queue: RenderQueue::Geometry,
                shadows: ShadowMode::On,
            },
            Preset::Clip => PresetValues {
                alpha_clip: true,
                premultiply_alpha: false,
                src_blend: BlendFactor::One,
                dst_blend: BlendFactor::Zero,
                z_write: true,
                render_queue: RenderQueue::AlphaTest,
                shadows: ShadowMode::Clip,
            },
            // Alpha blend; specular fades with alpha.
            Preset::Fade => PresetValues {
                alpha_clip: false,
                premultiply_alpha: false,
                src_blend: BlendFactor::SrcAlpha,
                dst_blend: BlendFactor::OneMinusSrcAlpha,
                z_write: false,
                render_queue: RenderQueue::Transparent,
                shadows: ShadowMode::Dither,
            },
            // Premultiplied alpha; specular stays at full strength.
            Preset::Transparent => PresetValues {
                alpha_clip: false,
                premultiply_alpha: true,
                src_blend: BlendFactor::One,
                dst_blend: BlendFactor::OneMinusSrcAlpha,
                z_write: false,
                render_queue: RenderQueue::Transparent,
                shadows: ShadowMode::Dither,
            },
        }
    }

    /// Only `Transparent` depends on an optional shader capability.
    pub fn requires_premultiply(self) -> bool {
        matches!(self, Preset::Transparent)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Preset {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| PresetError::UnknownName(s.to_string()))
    }
}
