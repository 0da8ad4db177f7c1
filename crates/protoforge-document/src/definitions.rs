//! Static catalog of the routed prototype fields.

use crate::{FieldValue, PrototypeField};

/// Editing shape of a routed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Boolean,
    Integer,
    StringArray,
    IntegerArray,
    Vector2,
    Enum,
}

/// Engine-side default of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Text(&'static str),
    Bool(bool),
    Int(i64),
}

impl DefaultValue {
    pub fn to_field_value(self) -> FieldValue {
        match self {
            DefaultValue::Text(s) => FieldValue::Text(s.to_string()),
            DefaultValue::Bool(b) => FieldValue::Bool(b),
            DefaultValue::Int(i) => FieldValue::Int(i),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDefinition {
    pub field: PrototypeField,
    /// Key written to YAML. Placement keys live under a `placement` mapping.
    pub yaml_key: &'static str,
    pub display_name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
    pub required: bool,
    /// Optional fields carry an enabled/disabled flag on the prototype.
    pub optional: bool,
    pub default: Option<DefaultValue>,
    pub enum_values: &'static [&'static str],
    pub max_length: Option<usize>,
}

const PLACEMENT_MODES: &[&str] = &[
    "PlaceFree",
    "PlaceNearby",
    "SnapgridCenter",
    "SnapgridBorder",
    "AlignWall",
    "AlignWallProper",
];

const fn optional(
    field: PrototypeField,
    yaml_key: &'static str,
    display_name: &'static str,
    kind: FieldKind,
    description: &'static str,
) -> FieldDefinition {
    FieldDefinition {
        field,
        yaml_key,
        display_name,
        kind,
        description,
        required: false,
        optional: true,
        default: None,
        enum_values: &[],
        max_length: None,
    }
}

/// Definitions in [`PrototypeField::ALL`] order.
pub static FIELD_DEFINITIONS: [FieldDefinition; 14] = [
    FieldDefinition {
        required: true,
        optional: false,
        default: Some(DefaultValue::Text("entity")),
        ..optional(
            PrototypeField::Type,
            "type",
            "Type",
            FieldKind::String,
            "The prototype type (entity, construction, etc.)",
        )
    },
    FieldDefinition {
        required: true,
        optional: false,
        max_length: Some(100),
        ..optional(
            PrototypeField::Id,
            "id",
            "ID",
            FieldKind::String,
            "The unique identifier for this prototype",
        )
    },
    FieldDefinition {
        max_length: Some(200),
        ..optional(
            PrototypeField::Name,
            "name",
            "Name",
            FieldKind::String,
            "The display name of the entity",
        )
    },
    FieldDefinition {
        max_length: Some(500),
        ..optional(
            PrototypeField::Description,
            "description",
            "Description",
            FieldKind::String,
            "The description shown when examining the entity",
        )
    },
    FieldDefinition {
        max_length: Some(100),
        ..optional(
            PrototypeField::Suffix,
            "suffix",
            "Suffix",
            FieldKind::String,
            "Optional suffix for development menus",
        )
    },
    optional(
        PrototypeField::Parent,
        "parent",
        "Parent",
        FieldKind::StringArray,
        "The prototype(s) this inherits from",
    ),
    FieldDefinition {
        default: Some(DefaultValue::Bool(false)),
        ..optional(
            PrototypeField::Abstract,
            "abstract",
            "Abstract",
            FieldKind::Boolean,
            "Whether this is an abstract prototype (cannot be spawned directly)",
        )
    },
    FieldDefinition {
        default: Some(DefaultValue::Bool(true)),
        ..optional(
            PrototypeField::Save,
            "save",
            "Map Savable",
            FieldKind::Boolean,
            "Whether this entity will be saved by the map loader",
        )
    },
    FieldDefinition {
        max_length: Some(100),
        ..optional(
            PrototypeField::LocalizationId,
            "localizationId",
            "Localization ID",
            FieldKind::String,
            "Custom localization ID for name/description lookup",
        )
    },
    optional(
        PrototypeField::Categories,
        "categories",
        "Categories",
        FieldKind::StringArray,
        "Categories this prototype belongs to",
    ),
    FieldDefinition {
        default: Some(DefaultValue::Text("PlaceFree")),
        enum_values: PLACEMENT_MODES,
        ..optional(
            PrototypeField::PlacementMode,
            "mode",
            "Placement Mode",
            FieldKind::Enum,
            "How this entity can be placed",
        )
    },
    FieldDefinition {
        default: Some(DefaultValue::Int(200)),
        ..optional(
            PrototypeField::PlacementRange,
            "range",
            "Placement Range",
            FieldKind::Integer,
            "Maximum range for placement",
        )
    },
    optional(
        PrototypeField::PlacementOffset,
        "offset",
        "Placement Offset",
        FieldKind::Vector2,
        "Offset applied when placing (x, y)",
    ),
    optional(
        PrototypeField::PlacementMountingPoints,
        "mountingPoints",
        "Mounting Points",
        FieldKind::IntegerArray,
        "Directions this entity can be mounted at",
    ),
];

/// Whether an enabled optional value is worth writing out.
///
/// Empty text and lists never are; booleans, integers and enum selections
/// only when they differ from the field's default.
pub fn is_meaningful(value: Option<&FieldValue>, definition: &FieldDefinition) -> bool {
    let Some(value) = value else {
        return false;
    };
    let default = definition.default.map(DefaultValue::to_field_value);
    match definition.kind {
        FieldKind::String | FieldKind::Vector2 => value.as_text().is_some_and(|s| !s.is_empty()),
        FieldKind::Boolean | FieldKind::Integer => {
            *value != FieldValue::Null && default.as_ref() != Some(value)
        }
        FieldKind::Enum => {
            value.as_text().is_some_and(|s| !s.is_empty()) && default.as_ref() != Some(value)
        }
        FieldKind::StringArray => matches!(value, FieldValue::List(items) if !items.is_empty()),
        FieldKind::IntegerArray => matches!(value, FieldValue::IntList(items) if !items.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definitions_follow_field_order() {
        for (index, field) in PrototypeField::ALL.iter().enumerate() {
            assert_eq!(FIELD_DEFINITIONS[index].field, *field);
            assert_eq!(field.definition().field, *field);
        }
    }

    #[test]
    fn test_only_type_and_id_are_required() {
        let required: Vec<_> = FIELD_DEFINITIONS
            .iter()
            .filter(|d| d.required)
            .map(|d| d.field)
            .collect();
        assert_eq!(required, vec![PrototypeField::Type, PrototypeField::Id]);
    }

    #[test]
    fn test_meaningful_values() {
        let save = PrototypeField::Save.definition();
        assert!(!is_meaningful(Some(&FieldValue::Bool(true)), save));
        assert!(is_meaningful(Some(&FieldValue::Bool(false)), save));

        let mode = PrototypeField::PlacementMode.definition();
        assert!(!is_meaningful(Some(&FieldValue::Text("PlaceFree".into())), mode));
        assert!(is_meaningful(Some(&FieldValue::Text("SnapgridCenter".into())), mode));

        let parent = PrototypeField::Parent.definition();
        assert!(!is_meaningful(Some(&FieldValue::List(vec![])), parent));
        assert!(is_meaningful(Some(&FieldValue::List(vec!["Base".into()])), parent));

        let name = PrototypeField::Name.definition();
        assert!(!is_meaningful(Some(&FieldValue::Text(String::new())), name));
        assert!(!is_meaningful(None, name));
    }
}
