//! Per-refresh view of the properties shared by a material selection.

use crate::material::{Material, PropertyKind};

/// A property slot present on every material in a selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialProperty {
    pub name: String,
    pub kind: PropertyKind,
    /// `true` when the selected materials do not all hold the same value.
    pub has_mixed_value: bool,
}

/// The properties available on a selection, rebuilt for every inspector
/// refresh and discarded afterwards.
///
/// A name is listed only if every selected material has a slot of the same
/// kind under it; writes through [`crate::PresetApplier`] therefore never
/// partially succeed across a selection.
#[derive(Clone, Debug, Default)]
pub struct MaterialProperties {
    props: Vec<MaterialProperty>,
}

impl MaterialProperties {
    pub fn gather(selection: &[Material]) -> Self {
        let Some((first, rest)) = selection.split_first() else {
            return Self::default();
        };

        let props = first
            .properties()
            .filter_map(|(name, value)| {
                let mut mixed = false;
                for other in rest {
                    let other_value = other.property(name)?;
                    if other_value.kind() != value.kind() {
                        return None;
                    }
                    mixed |= other_value != value;
                }
                Some(MaterialProperty {
                    name: name.to_string(),
                    kind: value.kind(),
                    has_mixed_value: mixed,
                })
            })
            .collect();

        Self { props }
    }

    /// Exact-name lookup; `None` means the selection lacks the slot.
    pub fn find(&self, name: &str) -> Option<&MaterialProperty> {
        self.props.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaterialProperty> {
        self.props.iter()
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}
