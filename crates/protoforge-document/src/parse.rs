use std::path::Path;

use protoforge_value::{Mapping, ValueTree, decode_documents, yaml_to_tree};
use tracing::debug;

use crate::{Component, Error, Placement, Prototype, PrototypeBatch, into_batch, resolve};

const DEFAULT_PROTOTYPE_TYPE: &str = "entity";
const UNKNOWN_COMPONENT: &str = "UnknownComponent";

/// Recognized top-level keys of a prototype mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TopLevelKey {
    Type,
    Id,
    Name,
    Description,
    Abstract,
    Suffix,
    SetName,
    SetDesc,
    SetSuffix,
    Categories,
    LocalizationId,
    HideSpawnMenu,
    Save,
    MountingPoints,
    PlacementMode,
    PlacementRange,
    PlacementOffset,
    CustomLocalizationId,
    Parent,
    Components,
    Placement,
}

impl TopLevelKey {
    fn from_key(key: &str) -> Option<Self> {
        let key = match key.to_ascii_lowercase().as_str() {
            "type" => Self::Type,
            "id" => Self::Id,
            "name" => Self::Name,
            "description" => Self::Description,
            "abstract" => Self::Abstract,
            "suffix" => Self::Suffix,
            "setname" => Self::SetName,
            "setdesc" => Self::SetDesc,
            "setsuffix" => Self::SetSuffix,
            "categories" => Self::Categories,
            "localizationid" => Self::LocalizationId,
            "hidespawnmenu" => Self::HideSpawnMenu,
            "save" => Self::Save,
            "mountingpoints" => Self::MountingPoints,
            "placementmode" => Self::PlacementMode,
            "placementrange" => Self::PlacementRange,
            "placementoffset" => Self::PlacementOffset,
            "customlocalizationid" => Self::CustomLocalizationId,
            "parent" => Self::Parent,
            "components" => Self::Components,
            "placement" => Self::Placement,
            _ => return None,
        };
        Some(key)
    }
}

/// Parse a prototype document.
///
/// Every YAML document of the stream is read. A root mapping is one
/// prototype, a root sequence holds many; anything else is ignored. Entries
/// without a non-empty `id` are skipped. Only a YAML syntax error fails the
/// call; once decoded, entries are interpreted permissively.
pub fn parse_document(text: &str) -> Result<Vec<Prototype>, Error> {
    let mut prototypes = Vec::new();
    for document in decode_documents(text)? {
        prototypes.extend(prototypes_from_tree(&yaml_to_tree(&document)));
    }
    Ok(prototypes)
}

/// Interpret a decoded document root as prototypes.
pub fn prototypes_from_tree(root: &ValueTree) -> Vec<Prototype> {
    match root {
        ValueTree::Mapping(map) => parse_prototype(map).into_iter().collect(),
        ValueTree::Sequence(items) => items
            .iter()
            .filter_map(ValueTree::as_mapping)
            .filter_map(parse_prototype)
            .collect(),
        ValueTree::Scalar(_) => Vec::new(),
    }
}

/// Read and parse a prototype file.
pub fn load_file(path: &Path) -> Result<Vec<Prototype>, Error> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&text)
}

/// Read a prototype file and resolve inheritance within it.
pub fn load_and_resolve(path: &Path) -> Result<PrototypeBatch, Error> {
    let mut batch = into_batch(load_file(path)?);
    resolve(&mut batch);
    Ok(batch)
}

/// Build a prototype from one mapping. Returns `None` without an `id`.
pub fn parse_prototype(map: &Mapping) -> Option<Prototype> {
    let id = map
        .iter()
        .rev()
        .find(|(k, _)| TopLevelKey::from_key(k) == Some(TopLevelKey::Id))
        .and_then(|(_, v)| v.as_scalar())
        .filter(|id| !id.trim().is_empty())?;

    let mut proto = Prototype::new(id, DEFAULT_PROTOTYPE_TYPE);

    for (key, node) in map {
        let Some(known) = TopLevelKey::from_key(key) else {
            proto.overflow.insert(key.clone(), node.clone());
            continue;
        };
        match known {
            TopLevelKey::Id => {}
            TopLevelKey::Type => {
                if let Some(kind) = node.as_scalar() {
                    proto.kind = kind.to_string();
                }
            }
            TopLevelKey::Name => {
                if let Some(name) = node.as_scalar() {
                    proto.name = name.to_string();
                }
            }
            TopLevelKey::Description => proto.description = scalar_text(node),
            TopLevelKey::Suffix => proto.suffix = scalar_text(node),
            TopLevelKey::Abstract => proto.abstract_flag = node.as_scalar().and_then(parse_bool),
            TopLevelKey::Save => {
                proto.map_savable = node.as_scalar().and_then(parse_bool).unwrap_or(true)
            }
            TopLevelKey::LocalizationId | TopLevelKey::CustomLocalizationId => {
                proto.localization_id = scalar_text(node)
            }
            TopLevelKey::Categories => {
                proto.categories = node.as_sequence().map(|items| {
                    items
                        .iter()
                        .filter_map(ValueTree::as_scalar)
                        .map(str::to_string)
                        .collect()
                })
            }
            TopLevelKey::MountingPoints => proto.placement.mounting_points = parse_int_list(node),
            TopLevelKey::PlacementMode => proto.placement.mode = scalar_text(node),
            TopLevelKey::PlacementRange => {
                proto.placement.range = node.as_scalar().and_then(parse_int)
            }
            TopLevelKey::PlacementOffset => proto.placement.offset = scalar_text(node),
            TopLevelKey::Placement => match node {
                ValueTree::Mapping(placement) => parse_placement(placement, &mut proto.placement),
                _ => {
                    proto.overflow.insert(key.clone(), node.clone());
                }
            },
            TopLevelKey::Parent => proto.parents = parse_parents(node),
            TopLevelKey::Components => proto.components = parse_components(node),
            TopLevelKey::SetName
            | TopLevelKey::SetDesc
            | TopLevelKey::SetSuffix
            | TopLevelKey::HideSpawnMenu => {
                proto.overflow.insert(key.clone(), node.clone());
            }
        }
    }

    Some(proto)
}

fn parse_placement(map: &Mapping, placement: &mut Placement) {
    for (key, node) in map {
        match key.to_ascii_lowercase().as_str() {
            "mode" => placement.mode = scalar_text(node),
            "range" => placement.range = node.as_scalar().and_then(parse_int),
            "offset" => placement.offset = scalar_text(node),
            "mountingpoints" => placement.mounting_points = parse_int_list(node),
            _ => {
                placement.extra.insert(key.clone(), node.clone());
            }
        }
    }
}

fn parse_parents(node: &ValueTree) -> Vec<String> {
    match node {
        ValueTree::Scalar(_) | ValueTree::Sequence(_) => node
            .scalar_items()
            .into_iter()
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect(),
        ValueTree::Mapping(_) => {
            debug!("ignoring mapping-shaped parent");
            Vec::new()
        }
    }
}

fn parse_components(node: &ValueTree) -> Vec<Component> {
    let Some(items) = node.as_sequence() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(ValueTree::as_mapping)
        .map(|map| {
            let name = map
                .get("type")
                .and_then(ValueTree::as_scalar)
                .unwrap_or(UNKNOWN_COMPONENT);
            let mut component = Component::new(name);
            for (key, value) in map {
                if key == "type" {
                    continue;
                }
                component.fields.insert(key.clone(), value.clone());
            }
            component
        })
        .collect()
}

fn scalar_text(node: &ValueTree) -> Option<String> {
    node.as_scalar().map(str::to_string)
}

/// Boolean parse accepting `true`/`false` in any case, surrounded by whitespace.
pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

pub(crate) fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

/// All items must parse, otherwise the list is unset.
fn parse_int_list(node: &ValueTree) -> Option<Vec<i64>> {
    node.as_sequence()?
        .iter()
        .map(|item| item.as_scalar().and_then(parse_int))
        .collect()
}
