//! Writes presets onto a material selection and keeps derived state consistent.
//!
//! Every write is best effort. A property the selection lacks is skipped, and
//! a keyword paired with that property is skipped with it, so the same preset
//! works across shader families with different slots.

use crate::inspector::{NoUndo, UndoRecorder};
use crate::material::{Material, PropertyKind, PropertyValue};
use crate::names;
use crate::preset::{BlendFactor, Preset, PresetError, RenderQueue, ShadowMode};
use crate::properties::MaterialProperties;

/// Applies presets and individual attribute writes to every material in a selection.
pub struct PresetApplier<'a> {
    selection: &'a mut [Material],
    properties: &'a MaterialProperties,
}

impl<'a> PresetApplier<'a> {
    pub fn new(selection: &'a mut [Material], properties: &'a MaterialProperties) -> Self {
        Self {
            selection,
            properties,
        }
    }

    /// Presets that may be offered for this selection, in button order.
    pub fn available(properties: &MaterialProperties) -> Vec<Preset> {
        let premultiply = properties.contains(names::PREMUL_ALPHA);
        Preset::ALL
            .into_iter()
            .filter(|p| premultiply || !p.requires_premultiply())
            .collect()
    }

    /// Writes every attribute of `preset`.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::Unavailable`] when the preset is not offered for
    /// this selection. Nothing is written in that case.
    pub fn apply(&mut self, preset: Preset) -> Result<(), PresetError> {
        self.apply_with_undo(preset, &mut NoUndo)
    }

    /// Like [`PresetApplier::apply`], registering one undo step labelled with
    /// the preset name right before the first write.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::Unavailable`] when the preset is not offered for
    /// this selection. No undo step is registered in that case.
    pub fn apply_with_undo(
        &mut self,
        preset: Preset,
        undo: &mut dyn UndoRecorder,
    ) -> Result<(), PresetError> {
        if preset.requires_premultiply() && !self.properties.contains(names::PREMUL_ALPHA) {
            return Err(PresetError::Unavailable(preset));
        }
        undo.register_property_change_undo(preset.label(), self.selection);

        let values = preset.values();
        self.set_alpha_clip(values.alpha_clip);
        self.set_premultiply_alpha(values.premultiply_alpha);
        self.set_src_blend(values.src_blend);
        self.set_dst_blend(values.dst_blend);
        self.set_z_write(values.z_write);
        self.set_render_queue(values.render_queue);
        self.set_shadows(values.shadows);

        tracing::info!(
            preset = preset.label(),
            materials = self.selection.len(),
            "applied material preset"
        );
        Ok(())
    }

    pub fn set_alpha_clip(&mut self, enabled: bool) {
        self.set_toggle(names::ALPHA_CLIP, names::ALPHA_CLIP_KEYWORD, enabled);
    }

    /// Premultiplied alpha is keyword-only; the keyword is always written.
    pub fn set_premultiply_alpha(&mut self, enabled: bool) {
        self.set_keyword(names::PREMULTIPLY_KEYWORD, enabled);
    }

    pub fn set_src_blend(&mut self, factor: BlendFactor) {
        self.set_float(names::SRC_BLEND, factor.as_f32());
    }

    pub fn set_dst_blend(&mut self, factor: BlendFactor) {
        self.set_float(names::DST_BLEND, factor.as_f32());
    }

    pub fn set_z_write(&mut self, enabled: bool) {
        self.set_float(names::Z_WRITE, if enabled { 1.0 } else { 0.0 });
    }

    pub fn set_render_queue(&mut self, queue: RenderQueue) {
        for material in self.selection.iter_mut() {
            material.set_render_queue(queue.value());
        }
    }

    /// Writes `_Shadows` and, only if that succeeded, the two shadow keywords.
    pub fn set_shadows(&mut self, mode: ShadowMode) {
        if self.set_float(names::SHADOWS, mode.as_f32()) {
            self.set_keyword(names::SHADOWS_CLIP_KEYWORD, mode == ShadowMode::Clip);
            self.set_keyword(names::SHADOWS_DITHER_KEYWORD, mode == ShadowMode::Dither);
        }
    }

    /// Writes a float slot on every selected material. Returns `false` and
    /// writes nothing if the selection lacks a float slot with this name.
    pub fn set_float(&mut self, name: &str, value: f32) -> bool {
        if !self.has_slot(name, PropertyKind::Float) {
            tracing::debug!(property = name, "skipping write to absent property");
            return false;
        }
        for material in self.selection.iter_mut() {
            // Presence and kind were checked against the whole selection.
            let written = material.set_float(name, value);
            debug_assert!(written.is_ok(), "{name}: {written:?}");
        }
        true
    }

    /// Writes any property value on every selected material.
    pub fn set_property(&mut self, name: &str, value: &PropertyValue) -> bool {
        if !self.has_slot(name, value.kind()) {
            return false;
        }
        for material in self.selection.iter_mut() {
            let written = material.set_property(name, value.clone());
            debug_assert!(written.is_ok(), "{name}: {written:?}");
        }
        true
    }

    pub fn set_keyword(&mut self, keyword: &str, enabled: bool) {
        for material in self.selection.iter_mut() {
            if enabled {
                material.enable_keyword(keyword);
            } else {
                material.disable_keyword(keyword);
            }
        }
    }

    /// Writes a flag property and its keyword together, or neither.
    fn set_toggle(&mut self, name: &str, keyword: &str, enabled: bool) {
        if self.set_float(name, if enabled { 1.0 } else { 0.0 }) {
            self.set_keyword(keyword, enabled);
        }
    }

    fn has_slot(&self, name: &str, kind: PropertyKind) -> bool {
        self.properties.find(name).is_some_and(|p| p.kind == kind)
    }
}

/// Convenience wrapper: gathers properties for `selection` and applies `preset`.
pub fn apply_preset(preset: Preset, selection: &mut [Material]) -> Result<(), PresetError> {
    let properties = MaterialProperties::gather(selection);
    PresetApplier::new(selection, &properties).apply(preset)
}

// ---------------------------------------------------------------------------
// Derived fix-ups
// ---------------------------------------------------------------------------

/// Runs both fix-ups that must follow any attribute change.
pub fn apply_derived_fixups(selection: &mut [Material], properties: &MaterialProperties) {
    set_shadow_caster_pass(selection, properties);
    copy_light_mapping_properties(selection, properties);
}

/// Enables the shadow-caster pass iff the shadow mode casts shadows.
///
/// Skipped when `_Shadows` is absent or holds different values across the
/// selection; an indeterminate mode never disables the pass.
pub fn set_shadow_caster_pass(selection: &mut [Material], properties: &MaterialProperties) {
    let Some(shadows) = properties.find(names::SHADOWS) else {
        return;
    };
    if shadows.has_mixed_value || shadows.kind != PropertyKind::Float {
        tracing::trace!("shadow mode indeterminate, leaving shadow caster pass as is");
        return;
    }
    let Some(value) = selection.first().and_then(|m| m.float(names::SHADOWS).ok()) else {
        return;
    };

    let enabled = ShadowMode::value_casts_shadows(value);
    for material in selection.iter_mut() {
        material.set_shader_pass_enabled(names::SHADOW_CASTER_PASS, enabled);
    }
}

/// Mirrors `_BaseMap` onto `_MainTex` and `_BaseColor` onto `_Color` for
/// code paths that still read the legacy names (lightmapping, batching).
///
/// Each copy is skipped unless every selected material has both slots.
/// With several materials selected, each one mirrors its own `_BaseMap` and
/// `_BaseColor`; the first material's values are not copied onto the rest.
pub fn copy_light_mapping_properties(selection: &mut [Material], properties: &MaterialProperties) {
    let slots_present = |new: &str, legacy: &str, kind: PropertyKind| {
        [new, legacy]
            .iter()
            .all(|name| properties.find(name).is_some_and(|p| p.kind == kind))
    };

    if slots_present(names::BASE_MAP, names::MAIN_TEX, PropertyKind::Texture) {
        for material in selection.iter_mut() {
            if let Ok(base_map) = material.texture(names::BASE_MAP).cloned() {
                let written = material.set_texture(names::MAIN_TEX, base_map);
                debug_assert!(written.is_ok(), "{written:?}");
            }
        }
    }

    if slots_present(names::BASE_COLOR, names::COLOR, PropertyKind::Color) {
        for material in selection.iter_mut() {
            if let Ok(color) = material.color(names::BASE_COLOR) {
                let written = material.set_color(names::COLOR, color);
                debug_assert!(written.is_ok(), "{written:?}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ShaderDef, TextureSlot};
    use glam::Vec4;

    fn lit(name: &str) -> Material {
        ShaderDef::lit().instantiate(name)
    }

    fn applied(preset: Preset, mut selection: Vec<Material>) -> Vec<Material> {
        apply_preset(preset, &mut selection).unwrap();
        selection
    }

    fn assert_matches_table(mat: &Material, preset: Preset) {
        let v = preset.values();
        let flag = |b: bool| -> f32 { if b { 1.0 } else { 0.0 } };
        assert_eq!(mat.float(names::ALPHA_CLIP).unwrap(), flag(v.alpha_clip), "{preset}");
        assert_eq!(mat.is_keyword_enabled(names::ALPHA_CLIP_KEYWORD), v.alpha_clip);
        assert_eq!(
            mat.is_keyword_enabled(names::PREMULTIPLY_KEYWORD),
            v.premultiply_alpha
        );
        assert_eq!(mat.float(names::SRC_BLEND).unwrap(), v.src_blend.as_f32());
        assert_eq!(mat.float(names::DST_BLEND).unwrap(), v.dst_blend.as_f32());
        assert_eq!(mat.float(names::Z_WRITE).unwrap(), flag(v.z_write));
        assert_eq!(mat.render_queue(), v.render_queue.value());
        assert_eq!(mat.float(names::SHADOWS).unwrap(), v.shadows.as_f32());
    }

    #[test]
    fn test_every_preset_matches_table() {
        for preset in Preset::ALL {
            let selection = applied(preset, vec![lit("a")]);
            assert_matches_table(&selection[0], preset);
        }
    }

    #[test]
    fn test_opaque_preset_exact_values() {
        let mat = &applied(Preset::Opaque, vec![lit("a")])[0];
        assert_eq!(mat.float(names::ALPHA_CLIP).unwrap(), 0.0);
        assert_eq!(mat.float(names::SRC_BLEND).unwrap(), 1.0);
        assert_eq!(mat.float(names::DST_BLEND).unwrap(), 0.0);
        assert_eq!(mat.float(names::Z_WRITE).unwrap(), 1.0);
        assert_eq!(mat.render_queue(), 2000);
        assert_eq!(mat.float(names::SHADOWS).unwrap(), 0.0);
    }

    #[test]
    fn test_fade_preset_exact_values() {
        let mat = &applied(Preset::Fade, vec![lit("a")])[0];
        assert_eq!(mat.float(names::SRC_BLEND).unwrap(), 5.0);
        assert_eq!(mat.float(names::DST_BLEND).unwrap(), 10.0);
        assert_eq!(mat.float(names::Z_WRITE).unwrap(), 0.0);
        assert_eq!(mat.render_queue(), 3000);
        assert!(mat.is_keyword_enabled(names::SHADOWS_DITHER_KEYWORD));
    }

    #[test]
    fn test_applying_twice_is_idempotent() {
        for preset in Preset::ALL {
            let once = applied(preset, vec![lit("a"), lit("b")]);
            let twice = applied(preset, once.clone());
            assert_eq!(once, twice, "{preset}");
        }
    }

    #[test]
    fn test_switching_presets_converges() {
        let direct = applied(Preset::Fade, vec![lit("a")]);
        let via_clip = applied(Preset::Fade, applied(Preset::Clip, vec![lit("a")]));
        assert_eq!(direct, via_clip);
    }

    #[test]
    fn test_shadow_keywords_mutually_exclusive() {
        for preset in Preset::ALL {
            let mat = &applied(preset, vec![lit("a")])[0];
            let clip = mat.is_keyword_enabled(names::SHADOWS_CLIP_KEYWORD);
            let dither = mat.is_keyword_enabled(names::SHADOWS_DITHER_KEYWORD);
            assert!(!(clip && dither), "{preset}");
            match preset.values().shadows {
                ShadowMode::On | ShadowMode::Off => assert!(!clip && !dither),
                ShadowMode::Clip => assert!(clip),
                ShadowMode::Dither => assert!(dither),
            }
        }
    }

    #[test]
    fn test_shadows_off_clears_both_keywords() {
        let mut selection = applied(Preset::Clip, vec![lit("a")]);
        let properties = MaterialProperties::gather(&selection);
        PresetApplier::new(&mut selection, &properties).set_shadows(ShadowMode::Off);
        assert!(!selection[0].is_keyword_enabled(names::SHADOWS_CLIP_KEYWORD));
        assert!(!selection[0].is_keyword_enabled(names::SHADOWS_DITHER_KEYWORD));
    }

    #[test]
    fn test_absent_property_is_skipped_and_rest_applied() {
        let mut shader = ShaderDef::lit();
        shader.properties.retain(|p| p.name != names::Z_WRITE);
        let mat = &applied(Preset::Fade, vec![shader.instantiate("a")])[0];

        assert!(!mat.has_property(names::Z_WRITE));
        assert_eq!(mat.float(names::SRC_BLEND).unwrap(), 5.0);
        assert_eq!(mat.float(names::DST_BLEND).unwrap(), 10.0);
        assert_eq!(mat.render_queue(), 3000);
        assert_eq!(mat.float(names::SHADOWS).unwrap(), 2.0);
    }

    #[test]
    fn test_absent_shadows_skips_shadow_keywords() {
        let mat = &applied(Preset::Clip, vec![ShaderDef::unlit().instantiate("a")])[0];
        assert!(!mat.is_keyword_enabled(names::SHADOWS_CLIP_KEYWORD));
        assert!(mat.is_keyword_enabled(names::ALPHA_CLIP_KEYWORD));
        assert_eq!(mat.render_queue(), 2450);
    }

    #[test]
    fn test_absent_alpha_clip_skips_its_keyword() {
        let mut shader = ShaderDef::lit();
        shader.properties.retain(|p| p.name != names::ALPHA_CLIP);
        let mat = &applied(Preset::Clip, vec![shader.instantiate("a")])[0];
        assert!(!mat.is_keyword_enabled(names::ALPHA_CLIP_KEYWORD));
        assert!(mat.is_keyword_enabled(names::SHADOWS_CLIP_KEYWORD));
    }

    #[test]
    fn test_transparent_unavailable_without_premultiply() {
        let mut selection = vec![ShaderDef::unlit().instantiate("a")];
        let before = selection.clone();
        let result = apply_preset(Preset::Transparent, &mut selection);
        assert_eq!(result, Err(PresetError::Unavailable(Preset::Transparent)));
        assert_eq!(selection, before);

        let properties = MaterialProperties::gather(&selection);
        assert_eq!(
            PresetApplier::available(&properties),
            vec![Preset::Opaque, Preset::Clip, Preset::Fade]
        );
    }

    #[derive(Default)]
    struct Snapshots(Vec<(String, Vec<Material>)>);

    impl UndoRecorder for Snapshots {
        fn register_property_change_undo(&mut self, label: &str, selection: &[Material]) {
            self.0.push((label.to_string(), selection.to_vec()));
        }
    }

    #[test]
    fn test_apply_with_undo_snapshots_before_writes() {
        let mut selection = vec![lit("a"), lit("b")];
        let before = selection.clone();
        let properties = MaterialProperties::gather(&selection);
        let mut undo = Snapshots::default();

        PresetApplier::new(&mut selection, &properties)
            .apply_with_undo(Preset::Clip, &mut undo)
            .unwrap();

        assert_eq!(undo.0.len(), 1);
        assert_eq!(undo.0[0].0, "Clip");
        assert_eq!(undo.0[0].1, before);
        assert_matches_table(&selection[1], Preset::Clip);
    }

    #[test]
    fn test_unavailable_preset_registers_no_undo() {
        let mut selection = vec![ShaderDef::unlit().instantiate("a")];
        let properties = MaterialProperties::gather(&selection);
        let mut undo = Snapshots::default();

        let result = PresetApplier::new(&mut selection, &properties)
            .apply_with_undo(Preset::Transparent, &mut undo);

        assert_eq!(result, Err(PresetError::Unavailable(Preset::Transparent)));
        assert!(undo.0.is_empty());
    }

    #[test]
    fn test_transparent_available_with_premultiply() {
        let properties = MaterialProperties::gather(&[lit("a")]);
        assert_eq!(PresetApplier::available(&properties), Preset::ALL.to_vec());
    }

    #[test]
    fn test_multi_selection_receives_every_write() {
        let selection = applied(Preset::Clip, vec![lit("a"), lit("b"), lit("c")]);
        for mat in &selection {
            assert_matches_table(mat, Preset::Clip);
        }
    }

    #[test]
    fn test_shadow_caster_pass_follows_mode() {
        for (mode, expected) in [
            (ShadowMode::On, true),
            (ShadowMode::Clip, true),
            (ShadowMode::Dither, true),
            (ShadowMode::Off, false),
        ] {
            let mut selection = vec![lit("a")];
            selection[0].set_float(names::SHADOWS, mode.as_f32()).unwrap();
            selection[0].set_shader_pass_enabled(names::SHADOW_CASTER_PASS, !expected);

            let properties = MaterialProperties::gather(&selection);
            set_shadow_caster_pass(&mut selection, &properties);
            assert_eq!(
                selection[0].is_shader_pass_enabled(names::SHADOW_CASTER_PASS),
                expected,
                "{mode:?}"
            );
        }
    }

    #[test]
    fn test_shadow_caster_pass_unchanged_for_mixed_selection() {
        let mut a = lit("a");
        let mut b = lit("b");
        a.set_float(names::SHADOWS, ShadowMode::On.as_f32()).unwrap();
        b.set_float(names::SHADOWS, ShadowMode::Off.as_f32()).unwrap();
        a.set_shader_pass_enabled(names::SHADOW_CASTER_PASS, false);
        b.set_shader_pass_enabled(names::SHADOW_CASTER_PASS, true);

        let mut selection = vec![a, b];
        let properties = MaterialProperties::gather(&selection);
        set_shadow_caster_pass(&mut selection, &properties);

        assert!(!selection[0].is_shader_pass_enabled(names::SHADOW_CASTER_PASS));
        assert!(selection[1].is_shader_pass_enabled(names::SHADOW_CASTER_PASS));
    }

    #[test]
    fn test_shadow_caster_pass_skipped_without_shadows_slot() {
        let mut selection = vec![ShaderDef::unlit().instantiate("a")];
        selection[0].set_shader_pass_enabled(names::SHADOW_CASTER_PASS, false);
        let properties = MaterialProperties::gather(&selection);
        set_shadow_caster_pass(&mut selection, &properties);
        assert!(!selection[0].is_shader_pass_enabled(names::SHADOW_CASTER_PASS));
    }

    #[test]
    fn test_legacy_color_mirrored() {
        let mut selection = vec![lit("a")];
        selection[0]
            .set_color(names::BASE_COLOR, [1.0, 0.0, 0.0, 1.0])
            .unwrap();
        let properties = MaterialProperties::gather(&selection);
        copy_light_mapping_properties(&mut selection, &properties);
        assert_eq!(selection[0].color(names::COLOR).unwrap(), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_legacy_texture_and_tiling_mirrored() {
        let mut selection = vec![lit("a")];
        let slot = TextureSlot {
            texture: Some("bricks.png".to_string()),
            scale_offset: Vec4::new(2.0, 2.0, 0.5, 0.0),
        };
        selection[0].set_texture(names::BASE_MAP, slot.clone()).unwrap();
        let properties = MaterialProperties::gather(&selection);
        copy_light_mapping_properties(&mut selection, &properties);
        assert_eq!(selection[0].texture(names::MAIN_TEX).unwrap(), &slot);
    }

    #[test]
    fn test_legacy_mirroring_skipped_without_legacy_slot() {
        let mut selection = vec![ShaderDef::unlit().instantiate("a")];
        selection[0]
            .set_color(names::BASE_COLOR, [1.0, 0.0, 0.0, 1.0])
            .unwrap();
        let before = selection.clone();
        let properties = MaterialProperties::gather(&selection);
        copy_light_mapping_properties(&mut selection, &properties);
        assert_eq!(selection, before);
        assert!(!selection[0].has_property(names::COLOR));
    }

    #[test]
    fn test_legacy_mirroring_is_per_material() {
        let mut a = lit("a");
        let mut b = lit("b");
        a.set_color(names::BASE_COLOR, [1.0, 0.0, 0.0, 1.0]).unwrap();
        b.set_color(names::BASE_COLOR, [0.0, 0.0, 1.0, 1.0]).unwrap();
        let mut selection = vec![a, b];
        let properties = MaterialProperties::gather(&selection);
        apply_derived_fixups(&mut selection, &properties);
        assert_eq!(selection[0].color(names::COLOR).unwrap(), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(selection[1].color(names::COLOR).unwrap(), [0.0, 0.0, 1.0, 1.0]);
    }
}
