//! Name-addressed access to prototype attributes.

use protoforge_value::ValueTree;

use crate::definitions::{FIELD_DEFINITIONS, FieldDefinition, is_meaningful};
use crate::parse::{parse_bool, parse_int};
use crate::Prototype;

/// Attributes reachable by field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrototypeField {
    Type,
    Id,
    Name,
    Description,
    Suffix,
    Parent,
    Abstract,
    Save,
    LocalizationId,
    Categories,
    PlacementMode,
    PlacementRange,
    PlacementOffset,
    PlacementMountingPoints,
}

impl PrototypeField {
    pub const ALL: [PrototypeField; 14] = [
        Self::Type,
        Self::Id,
        Self::Name,
        Self::Description,
        Self::Suffix,
        Self::Parent,
        Self::Abstract,
        Self::Save,
        Self::LocalizationId,
        Self::Categories,
        Self::PlacementMode,
        Self::PlacementRange,
        Self::PlacementOffset,
        Self::PlacementMountingPoints,
    ];

    /// Look a field up by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Id => "id",
            Self::Name => "name",
            Self::Description => "description",
            Self::Suffix => "suffix",
            Self::Parent => "parent",
            Self::Abstract => "abstract",
            Self::Save => "save",
            Self::LocalizationId => "localizationId",
            Self::Categories => "categories",
            Self::PlacementMode => "placement.mode",
            Self::PlacementRange => "placement.range",
            Self::PlacementOffset => "placement.offset",
            Self::PlacementMountingPoints => "placement.mountingPoints",
        }
    }

    pub fn definition(self) -> &'static FieldDefinition {
        &FIELD_DEFINITIONS[self as usize]
    }

    /// Value a disabled field falls back to.
    pub fn cleared_value(self) -> FieldValue {
        match self {
            Self::Parent => FieldValue::List(Vec::new()),
            Self::Save => FieldValue::Bool(true),
            _ => FieldValue::Null,
        }
    }

    pub fn get(self, proto: &Prototype) -> Option<FieldValue> {
        let text = |s: &Option<String>| s.clone().map(FieldValue::Text);
        match self {
            Self::Type => Some(FieldValue::Text(proto.kind.clone())),
            Self::Id => Some(FieldValue::Text(proto.id.clone())),
            Self::Name => Some(FieldValue::Text(proto.name.clone())),
            Self::Description => text(&proto.description),
            Self::Suffix => text(&proto.suffix),
            Self::Parent => Some(FieldValue::List(proto.parents.clone())),
            Self::Abstract => proto.abstract_flag.map(FieldValue::Bool),
            Self::Save => Some(FieldValue::Bool(proto.map_savable)),
            Self::LocalizationId => text(&proto.localization_id),
            Self::Categories => proto
                .categories
                .as_ref()
                .map(|set| FieldValue::List(set.iter().cloned().collect())),
            Self::PlacementMode => text(&proto.placement.mode),
            Self::PlacementRange => proto.placement.range.map(FieldValue::Int),
            Self::PlacementOffset => text(&proto.placement.offset),
            Self::PlacementMountingPoints => proto
                .placement
                .mounting_points
                .clone()
                .map(FieldValue::IntList),
        }
    }

    /// Store `value`, converting leniently. Values that do not convert leave
    /// the attribute unset, or at its default where it has one.
    pub fn set(self, proto: &mut Prototype, value: FieldValue) {
        match self {
            Self::Type => proto.kind = value.to_text().unwrap_or_default(),
            Self::Id => proto.id = value.to_text().unwrap_or_default(),
            Self::Name => proto.name = value.to_text().unwrap_or_default(),
            Self::Description => proto.description = value.to_text(),
            Self::Suffix => proto.suffix = value.to_text(),
            Self::Parent => proto.parents = value.to_list().unwrap_or_default(),
            Self::Abstract => proto.abstract_flag = value.as_bool(),
            Self::Save => proto.map_savable = value.as_bool().unwrap_or(true),
            Self::LocalizationId => proto.localization_id = value.to_text(),
            Self::Categories => {
                proto.categories = match &value {
                    FieldValue::Text(s) if s.trim().is_empty() => None,
                    _ => value.to_list().map(|items| items.into_iter().collect()),
                }
            }
            Self::PlacementMode => proto.placement.mode = value.to_text(),
            Self::PlacementRange => proto.placement.range = value.as_i64(),
            Self::PlacementOffset => proto.placement.offset = value.to_text(),
            Self::PlacementMountingPoints => {
                proto.placement.mounting_points = value.to_int_list()
            }
        }
    }
}

/// A field value as exchanged with an editing front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    List(Vec<String>),
    IntList(Vec<i64>),
    Tree(ValueTree),
}

impl FieldValue {
    /// Borrowed text of a `Text` value or a scalar tree.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Tree(tree) => tree.as_scalar(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => self.as_text().and_then(parse_bool),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => self.as_text().and_then(parse_int),
        }
    }

    fn to_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Bool(b) => Some(b.to_string()),
            FieldValue::Int(i) => Some(i.to_string()),
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::List(items) => Some(items.join(", ")),
            FieldValue::IntList(items) => Some(join_ints(items)),
            FieldValue::Tree(tree) => Some(tree.to_string()),
        }
    }

    fn to_list(&self) -> Option<Vec<String>> {
        match self {
            FieldValue::List(items) => Some(items.clone()),
            FieldValue::Text(s) => Some(split_list(s)),
            FieldValue::Tree(ValueTree::Scalar(s)) => Some(split_list(s)),
            FieldValue::Tree(tree @ ValueTree::Sequence(_)) => Some(
                tree.scalar_items()
                    .into_iter()
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            _ => None,
        }
    }

    fn to_int_list(&self) -> Option<Vec<i64>> {
        match self {
            FieldValue::IntList(items) => Some(items.clone()),
            FieldValue::List(items) => items.iter().map(|s| parse_int(s)).collect(),
            FieldValue::Text(s) => split_list(s).iter().map(|s| parse_int(s)).collect(),
            FieldValue::Tree(ValueTree::Scalar(s)) => {
                split_list(s).iter().map(|s| parse_int(s)).collect()
            }
            FieldValue::Tree(ValueTree::Sequence(items)) => items
                .iter()
                .map(|item| item.as_scalar().and_then(parse_int))
                .collect(),
            _ => None,
        }
    }

    /// Tree form for overflow storage. `Null` has none.
    pub fn to_tree(&self) -> Option<ValueTree> {
        Some(match self {
            FieldValue::Null => return None,
            FieldValue::Bool(b) => ValueTree::scalar(b.to_string()),
            FieldValue::Int(i) => ValueTree::scalar(i.to_string()),
            FieldValue::Text(s) => ValueTree::scalar(s.clone()),
            FieldValue::List(items) => {
                ValueTree::Sequence(items.iter().map(|s| ValueTree::scalar(s.clone())).collect())
            }
            FieldValue::IntList(items) => ValueTree::Sequence(
                items.iter().map(|i| ValueTree::scalar(i.to_string())).collect(),
            ),
            FieldValue::Tree(tree) => tree.clone(),
        })
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Vec<i64>> for FieldValue {
    fn from(value: Vec<i64>) -> Self {
        FieldValue::IntList(value)
    }
}

impl From<ValueTree> for FieldValue {
    fn from(value: ValueTree) -> Self {
        FieldValue::Tree(value)
    }
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_ints(items: &[i64]) -> String {
    items
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Prototype {
    /// Read a field by name. Unrouted names are looked up in `overflow`.
    pub fn get_field(&self, name: &str) -> Option<FieldValue> {
        match PrototypeField::from_name(name) {
            Some(field) => field.get(self),
            None => self.overflow.get(name).cloned().map(FieldValue::Tree),
        }
    }

    /// Write a field by name. Unrouted names go to `overflow`, where `Null`
    /// removes the key.
    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) {
        let value = value.into();
        if let Some(field) = PrototypeField::from_name(name) {
            field.set(self, value);
            return;
        }
        match value.to_tree() {
            Some(tree) => {
                self.overflow.insert(name.to_string(), tree);
            }
            None => {
                self.overflow.shift_remove(name);
            }
        }
    }

    pub fn is_optional_field_enabled(&self, name: &str) -> bool {
        self.enabled_optional_fields
            .contains(&name.to_ascii_lowercase())
    }

    /// Toggle an optional field. Disabling also clears its value.
    pub fn set_optional_field_enabled(&mut self, name: &str, enabled: bool) {
        let field = PrototypeField::from_name(name);
        if field.is_some_and(|field| !field.definition().optional) {
            return;
        }
        let key = name.to_ascii_lowercase();
        if enabled {
            self.enabled_optional_fields.insert(key);
            return;
        }
        self.enabled_optional_fields.shift_remove(&key);
        let cleared = field
            .map(PrototypeField::cleared_value)
            .unwrap_or(FieldValue::Null);
        self.set_field(name, cleared);
    }

    /// Enable every optional field that currently holds a meaningful value.
    pub fn enable_present_fields(&mut self) {
        for definition in FIELD_DEFINITIONS.iter().filter(|d| d.optional) {
            let value = definition.field.get(self);
            if is_meaningful(value.as_ref(), definition) {
                self.enabled_optional_fields
                    .insert(definition.field.name().to_ascii_lowercase());
            }
        }
    }
}
