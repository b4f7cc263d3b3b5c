//! Inspector session: the host side of the material inspector.

use lumen_config::InspectorConfig;
use lumen_materials::{
    InspectorFrame, InspectorOutcome, Material, MaterialInspector, Preset, RegistryError,
    ShaderRegistry,
};

use crate::undo::UndoHistory;

const UNDO_CAPACITY: usize = 64;

/// Owns the selection being edited and feeds it to the inspector each refresh.
pub struct EditorSession {
    selection: Vec<Material>,
    inspector: MaterialInspector,
    history: UndoHistory,
}

impl EditorSession {
    /// Creates `config.selection_size` materials from `config.shader`.
    pub fn new(registry: &ShaderRegistry, config: &InspectorConfig) -> Result<Self, RegistryError> {
        let selection = (0..config.selection_size.max(1))
            .map(|i| registry.instantiate(&config.shader, &format!("{}_{i}", config.shader)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            selection,
            inspector: MaterialInspector::new(config.baked_emission),
            history: UndoHistory::new(UNDO_CAPACITY),
        })
    }

    /// Preset buttons the host should draw.
    pub fn preset_buttons(&self) -> Vec<Preset> {
        self.inspector.preset_buttons(&self.selection)
    }

    /// Runs one inspector refresh.
    pub fn refresh(&mut self, frame: &InspectorFrame) -> InspectorOutcome {
        self.inspector
            .on_gui(&mut self.selection, frame, &mut self.history)
    }

    pub fn undo(&mut self) -> Option<String> {
        self.history.undo(&mut self.selection)
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    pub fn selection(&self) -> &[Material] {
        &self.selection
    }
}
