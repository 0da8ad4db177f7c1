use serde::Deserialize;
use serde_yaml::{Mapping as YamlMapping, Value as YamlValue};

use crate::{Error, Mapping, ValueTree};

/// Decode every YAML document of a stream.
///
/// Documents separated by `---` are returned in order. Any syntax error fails
/// the whole stream.
pub fn decode_documents(text: &str) -> Result<Vec<YamlValue>, Error> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(text) {
        documents.push(YamlValue::deserialize(document)?);
    }
    Ok(documents)
}

/// Convert a decoded YAML node into a value tree.
///
/// Scalars keep their text form, null becomes an empty scalar and tags such as
/// `!type:Foo` are unwrapped to the tagged value.
pub fn yaml_to_tree(yaml: &YamlValue) -> ValueTree {
    match yaml {
        YamlValue::Null => ValueTree::Scalar(String::new()),
        YamlValue::Bool(b) => ValueTree::Scalar(b.to_string()),
        YamlValue::Number(n) => ValueTree::Scalar(n.to_string()),
        YamlValue::String(s) => ValueTree::Scalar(s.clone()),
        YamlValue::Sequence(seq) => ValueTree::Sequence(seq.iter().map(yaml_to_tree).collect()),
        YamlValue::Mapping(map) => {
            let mut result = Mapping::with_capacity(map.len());
            for (k, v) in map.iter() {
                result.insert(yaml_key_text(k), yaml_to_tree(v));
            }
            ValueTree::Mapping(result)
        }
        YamlValue::Tagged(tagged) => yaml_to_tree(&tagged.value),
    }
}

/// Text of a mapping key. Non-string keys are stringified.
pub(crate) fn yaml_key_text(key: &YamlValue) -> String {
    match key {
        YamlValue::String(s) => s.clone(),
        other => yaml_to_tree(other).to_string(),
    }
}

/// Convert a value tree back into YAML.
///
/// Scalars that read back identically as a boolean or a number are written as
/// native YAML scalars, everything else as strings.
pub fn tree_to_yaml(tree: &ValueTree) -> YamlValue {
    match tree {
        ValueTree::Scalar(s) => scalar_to_yaml(s),
        ValueTree::Sequence(items) => YamlValue::Sequence(items.iter().map(tree_to_yaml).collect()),
        ValueTree::Mapping(map) => {
            let mut result = YamlMapping::with_capacity(map.len());
            for (k, v) in map {
                result.insert(YamlValue::String(k.clone()), tree_to_yaml(v));
            }
            YamlValue::Mapping(result)
        }
    }
}

fn scalar_to_yaml(text: &str) -> YamlValue {
    match text {
        "true" => return YamlValue::Bool(true),
        "false" => return YamlValue::Bool(false),
        _ => {}
    }
    if let Ok(i) = text.parse::<i64>()
        && i.to_string() == text
    {
        return YamlValue::Number(i.into());
    }
    if let Ok(f) = text.parse::<f64>()
        && f.is_finite()
        && f.to_string() == text
    {
        return YamlValue::Number(f.into());
    }
    YamlValue::String(text.to_string())
}

/// Serialize a YAML node to text.
pub fn emit_yaml(value: &YamlValue) -> Result<String, Error> {
    serde_yaml::to_string(value).map_err(|e| Error::Encode(e.to_string()))
}
