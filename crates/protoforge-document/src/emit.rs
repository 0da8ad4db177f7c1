use protoforge_value::{Mapping, ValueTree, emit_yaml, tree_to_yaml};
use serde_yaml::Value as YamlValue;

use crate::definitions::{FIELD_DEFINITIONS, FieldDefinition, is_meaningful};
use crate::{Error, FieldValue, Prototype, PrototypeField};

const PLACEMENT_KEY: &str = "placement";

/// Serialize a prototype as a one-item YAML sequence.
pub fn to_yaml(proto: &Prototype) -> Result<String, Error> {
    emit_yaml(&to_yaml_value(proto)).map_err(|e| Error::Encode(e.to_string()))
}

/// YAML form of a prototype, wrapped in a one-item sequence.
///
/// `type` and `id` are always written. Optional fields are written only when
/// enabled and meaningful, placement fields nested under `placement`.
/// Overflow keys follow verbatim, then the components.
pub fn to_yaml_value(proto: &Prototype) -> YamlValue {
    let mut root = Mapping::new();
    root.insert("type".to_string(), ValueTree::scalar(&proto.kind));
    root.insert("id".to_string(), ValueTree::scalar(&proto.id));

    let mut placement = Mapping::new();
    for definition in FIELD_DEFINITIONS.iter().filter(|d| d.optional) {
        let Some(node) = emitted_field(proto, definition) else {
            continue;
        };
        if is_placement(definition.field) {
            placement.insert(definition.yaml_key.to_string(), node);
        } else {
            root.insert(definition.yaml_key.to_string(), node);
        }
    }
    for (key, node) in &proto.placement.extra {
        placement.entry(key.clone()).or_insert_with(|| node.clone());
    }
    if !placement.is_empty() {
        root.insert(PLACEMENT_KEY.to_string(), ValueTree::Mapping(placement));
    }

    for (key, node) in &proto.overflow {
        root.entry(key.clone()).or_insert_with(|| node.clone());
    }

    if !proto.components.is_empty() {
        let components = proto
            .components
            .iter()
            .map(|component| {
                let mut map = Mapping::new();
                map.insert("type".to_string(), ValueTree::scalar(&component.name));
                for (key, value) in &component.fields {
                    if matches!(value, ValueTree::Scalar(s) if s.is_empty()) {
                        continue;
                    }
                    map.insert(key.clone(), value.clone());
                }
                ValueTree::Mapping(map)
            })
            .collect();
        root.insert("components".to_string(), ValueTree::Sequence(components));
    }

    tree_to_yaml(&ValueTree::Sequence(vec![ValueTree::Mapping(root)]))
}

fn emitted_field(proto: &Prototype, definition: &FieldDefinition) -> Option<ValueTree> {
    let field = definition.field;
    if !proto.is_optional_field_enabled(field.name()) {
        return None;
    }
    let value = field.get(proto)?;
    if !is_meaningful(Some(&value), definition) {
        return None;
    }
    let node = match value {
        FieldValue::List(items) if field == PrototypeField::Parent && items.len() == 1 => {
            ValueTree::scalar(items[0].clone())
        }
        other => other.to_tree()?,
    };
    Some(node)
}

fn is_placement(field: PrototypeField) -> bool {
    matches!(
        field,
        PrototypeField::PlacementMode
            | PrototypeField::PlacementRange
            | PrototypeField::PlacementOffset
            | PrototypeField::PlacementMountingPoints
    )
}
