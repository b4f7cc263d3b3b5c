//! Material inspector: drives one editor refresh over a material selection.
//!
//! The host calls [`MaterialInspector::on_gui`] once per refresh with the
//! current selection and whatever the user did this frame (a preset button,
//! direct property edits). The inspector owns no selection state between calls.

use crate::applier::{PresetApplier, apply_derived_fixups};
use crate::material::{Material, PropertyValue};
use crate::names;
use crate::preset::Preset;
use crate::properties::MaterialProperties;

/// Host hook invoked immediately before a preset is written, so the whole
/// preset becomes a single undo step.
pub trait UndoRecorder {
    fn register_property_change_undo(&mut self, label: &str, selection: &[Material]);
}

/// Discards undo registrations.
pub struct NoUndo;

impl UndoRecorder for NoUndo {
    fn register_property_change_undo(&mut self, _label: &str, _selection: &[Material]) {}
}

/// A direct edit of one exposed property.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyEdit {
    pub name: String,
    pub value: PropertyValue,
}

impl PropertyEdit {
    pub fn new(name: &str, value: PropertyValue) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}

/// User input gathered by the host for one refresh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InspectorFrame {
    /// Preset button clicked this frame, if any.
    pub preset_pressed: Option<Preset>,
    pub edits: Vec<PropertyEdit>,
}

/// What a refresh did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InspectorOutcome {
    /// Whether anything was written; fix-ups ran iff this is `true`.
    pub changed: bool,
    /// The preset that was applied.
    pub preset: Option<Preset>,
}

/// Inspector for lit-style materials with blend preset buttons.
#[derive(Clone, Debug, Default)]
pub struct MaterialInspector {
    baked_emission: bool,
}

impl MaterialInspector {
    /// `baked_emission` clears the "emission is black" GI flag whenever the
    /// emission color is edited, so lightmap baking picks it up.
    pub fn new(baked_emission: bool) -> Self {
        Self { baked_emission }
    }

    /// Preset buttons to show for this selection.
    pub fn preset_buttons(&self, selection: &[Material]) -> Vec<Preset> {
        PresetApplier::available(&MaterialProperties::gather(selection))
    }

    pub fn on_gui(
        &self,
        selection: &mut [Material],
        frame: &InspectorFrame,
        undo: &mut dyn UndoRecorder,
    ) -> InspectorOutcome {
        let properties = MaterialProperties::gather(selection);
        let mut outcome = InspectorOutcome::default();

        if let Some(preset) = frame.preset_pressed {
            match PresetApplier::new(selection, &properties).apply_with_undo(preset, undo) {
                Ok(()) => {
                    outcome.changed = true;
                    outcome.preset = Some(preset);
                }
                Err(err) => tracing::warn!(%err, "preset not applied"),
            }
        }

        let mut emission_edited = false;
        for edit in &frame.edits {
            if PresetApplier::new(selection, &properties).set_property(&edit.name, &edit.value) {
                outcome.changed = true;
                emission_edited |= edit.name == names::EMISSION_COLOR;
            } else {
                tracing::warn!(
                    property = edit.name.as_str(),
                    kind = ?edit.value.kind(),
                    "ignoring edit to property the selection does not expose"
                );
            }
        }

        if self.baked_emission && emission_edited {
            for material in selection.iter_mut() {
                material.set_emissive_is_black(false);
            }
        }

        if outcome.changed {
            // Preset writes may have changed `_Shadows`; mixed-value state is
            // read from the selection as it is now.
            let properties = MaterialProperties::gather(selection);
            apply_derived_fixups(selection, &properties);
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShaderDef;

    #[derive(Default)]
    struct RecordingUndo {
        entries: Vec<(String, Vec<Material>)>,
    }

    impl UndoRecorder for RecordingUndo {
        fn register_property_change_undo(&mut self, label: &str, selection: &[Material]) {
            self.entries.push((label.to_string(), selection.to_vec()));
        }
    }

    fn lit() -> Vec<Material> {
        vec![ShaderDef::lit().instantiate("a")]
    }

    #[test]
    fn test_idle_frame_changes_nothing() {
        let mut selection = lit();
        selection[0].set_float(names::SHADOWS, 3.0).unwrap();
        let before = selection.clone();

        let outcome =
            MaterialInspector::default().on_gui(&mut selection, &InspectorFrame::default(), &mut NoUndo);

        assert_eq!(outcome, InspectorOutcome::default());
        assert_eq!(selection, before);
    }

    #[test]
    fn test_preset_registers_undo_before_writing() {
        let mut selection = lit();
        let before = selection.clone();
        let mut undo = RecordingUndo::default();
        let frame = InspectorFrame {
            preset_pressed: Some(Preset::Fade),
            edits: Vec::new(),
        };

        let outcome = MaterialInspector::default().on_gui(&mut selection, &frame, &mut undo);

        assert_eq!(outcome.preset, Some(Preset::Fade));
        assert!(outcome.changed);
        assert_eq!(undo.entries.len(), 1);
        assert_eq!(undo.entries[0].0, "Fade");
        assert_eq!(undo.entries[0].1, before);
        assert_eq!(selection[0].render_queue(), 3000);
    }

    #[test]
    fn test_unavailable_preset_is_not_invocable() {
        let mut selection = vec![ShaderDef::unlit().instantiate("a")];
        let before = selection.clone();
        let mut undo = RecordingUndo::default();
        let frame = InspectorFrame {
            preset_pressed: Some(Preset::Transparent),
            edits: Vec::new(),
        };

        let outcome = MaterialInspector::default().on_gui(&mut selection, &frame, &mut undo);

        assert!(!outcome.changed);
        assert!(undo.entries.is_empty());
        assert_eq!(selection, before);
    }

    #[test]
    fn test_preset_buttons_hide_transparent_without_premultiply() {
        let inspector = MaterialInspector::default();
        assert_eq!(inspector.preset_buttons(&lit()).len(), 4);
        let unlit = [ShaderDef::unlit().instantiate("a")];
        assert!(!inspector.preset_buttons(&unlit).contains(&Preset::Transparent));
    }

    #[test]
    fn test_preset_runs_shadow_caster_fixup() {
        let mut selection = lit();
        selection[0].set_shader_pass_enabled(names::SHADOW_CASTER_PASS, false);
        let frame = InspectorFrame {
            preset_pressed: Some(Preset::Opaque),
            edits: Vec::new(),
        };
        MaterialInspector::default().on_gui(&mut selection, &frame, &mut NoUndo);
        assert!(selection[0].is_shader_pass_enabled(names::SHADOW_CASTER_PASS));
    }

    #[test]
    fn test_direct_edit_runs_fixups() {
        let mut selection = lit();
        let frame = InspectorFrame {
            preset_pressed: None,
            edits: vec![
                PropertyEdit::new(names::SHADOWS, PropertyValue::Float(3.0)),
                PropertyEdit::new(names::BASE_COLOR, PropertyValue::Color([1.0, 0.0, 0.0, 1.0])),
            ],
        };

        let outcome = MaterialInspector::default().on_gui(&mut selection, &frame, &mut NoUndo);

        assert!(outcome.changed);
        assert_eq!(outcome.preset, None);
        assert!(!selection[0].is_shader_pass_enabled(names::SHADOW_CASTER_PASS));
        assert_eq!(selection[0].color(names::COLOR).unwrap(), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_invalid_edits_are_ignored() {
        let mut selection = lit();
        let before = selection.clone();
        let frame = InspectorFrame {
            preset_pressed: None,
            edits: vec![
                PropertyEdit::new("_Missing", PropertyValue::Float(1.0)),
                PropertyEdit::new(names::BASE_COLOR, PropertyValue::Float(1.0)),
            ],
        };

        let outcome = MaterialInspector::default().on_gui(&mut selection, &frame, &mut NoUndo);

        assert!(!outcome.changed);
        assert_eq!(selection, before);
    }

    #[test]
    fn test_baked_emission_clears_black_flag() {
        let frame = InspectorFrame {
            preset_pressed: None,
            edits: vec![PropertyEdit::new(
                names::EMISSION_COLOR,
                PropertyValue::Color([0.0, 1.0, 0.0, 1.0]),
            )],
        };

        let mut selection = lit();
        MaterialInspector::new(true).on_gui(&mut selection, &frame, &mut NoUndo);
        assert!(!selection[0].emissive_is_black());

        let mut selection = lit();
        MaterialInspector::new(false).on_gui(&mut selection, &frame, &mut NoUndo);
        assert!(selection[0].emissive_is_black());
    }
}
