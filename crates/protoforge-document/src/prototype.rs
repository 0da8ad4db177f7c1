use indexmap::{IndexMap, IndexSet};
use protoforge_value::{Mapping, ValueTree};

/// A named bag of fields attached to a prototype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Component name, taken from the `type` key of the component mapping.
    pub name: String,
    /// Every other key of the component mapping.
    pub fields: Mapping,
}

impl Component {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Mapping::new(),
        }
    }

    /// Field lookup ignoring ASCII case.
    pub fn field_ignore_case(&self, key: &str) -> Option<&ValueTree> {
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }
}

/// Placement sub-attributes of a prototype (`placement.*`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    pub mode: Option<String>,
    pub range: Option<i64>,
    pub offset: Option<String>,
    pub mounting_points: Option<Vec<i64>>,
    /// Keys of a nested `placement` mapping with no dedicated slot.
    pub extra: Mapping,
}

impl Placement {
    pub fn is_empty(&self) -> bool {
        self.mode.is_none()
            && self.range.is_none()
            && self.offset.is_none()
            && self.mounting_points.is_none()
            && self.extra.is_empty()
    }
}

/// One entity definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prototype {
    /// Unique identifier, used as the batch key.
    pub id: String,
    /// The `type` key, `entity` unless stated otherwise.
    pub kind: String,
    pub name: String,
    pub description: Option<String>,
    pub suffix: Option<String>,
    /// Parent ids in declaration order. The first listed parent wins ties.
    pub parents: Vec<String>,
    pub abstract_flag: Option<bool>,
    pub map_savable: bool,
    pub localization_id: Option<String>,
    pub categories: Option<IndexSet<String>>,
    pub placement: Placement,
    pub components: Vec<Component>,
    /// Top-level keys with no dedicated slot, kept verbatim.
    pub overflow: Mapping,
    /// Lower-cased names of the optional fields meant to be written on save.
    pub enabled_optional_fields: IndexSet<String>,
}

impl Prototype {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            name: String::new(),
            description: None,
            suffix: None,
            parents: Vec::new(),
            abstract_flag: None,
            map_savable: true,
            localization_id: None,
            categories: None,
            placement: Placement::default(),
            components: Vec::new(),
            overflow: Mapping::new(),
            enabled_optional_fields: IndexSet::new(),
        }
    }

    /// First component with the given name, ignoring ASCII case.
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn component_mut(&mut self, name: &str) -> Option<&mut Component> {
        self.components
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

/// Prototypes keyed by id.
pub type PrototypeBatch = IndexMap<String, Prototype>;

/// Key prototypes by id. On collision the prototype parsed last wins.
pub fn into_batch(prototypes: impl IntoIterator<Item = Prototype>) -> PrototypeBatch {
    let mut batch = PrototypeBatch::new();
    for prototype in prototypes {
        batch.insert(prototype.id.clone(), prototype);
    }
    batch
}
