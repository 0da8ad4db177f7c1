use super::*;
use serde_yaml::Value as YamlValue;

fn decode_one(text: &str) -> ValueTree {
    let docs = decode_documents(text).unwrap();
    assert_eq!(docs.len(), 1);
    yaml_to_tree(&docs[0])
}

#[test]
fn test_scalars_keep_text() {
    let tree = decode_one("a: 1\nb: true\nc: 2.5\nd: ~\ne: hello");
    let map = tree.as_mapping().unwrap();
    assert_eq!(map["a"], ValueTree::scalar("1"));
    assert_eq!(map["b"], ValueTree::scalar("true"));
    assert_eq!(map["c"], ValueTree::scalar("2.5"));
    assert_eq!(map["d"], ValueTree::scalar(""));
    assert_eq!(map["e"], ValueTree::scalar("hello"));
}

#[test]
fn test_mapping_preserves_order() {
    let tree = decode_one("zeta: 1\nalpha: 2\nmid: 3");
    let keys: Vec<_> = tree.as_mapping().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_nested_structures() {
    let tree = decode_one(
        r#"
layers:
  - state: base
    visible: false
  - state: overlay
size: [1, 2]
"#,
    );
    let layers = tree.get("layers").unwrap().as_sequence().unwrap();
    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].get("state"), Some(&ValueTree::scalar("base")));
    assert_eq!(layers[0].get("visible"), Some(&ValueTree::scalar("false")));
    assert_eq!(
        tree.get("size"),
        Some(&ValueTree::Sequence(vec!["1".into(), "2".into()]))
    );
}

#[test]
fn test_tags_are_unwrapped() {
    let tree = decode_one("damage: !type:DamageSpecifier\n  types:\n    Blunt: 5");
    let damage = tree.get("damage").unwrap();
    assert_eq!(
        damage.get("types").and_then(|t| t.get("Blunt")),
        Some(&ValueTree::scalar("5"))
    );
}

#[test]
fn test_non_string_keys_are_stringified() {
    let tree = decode_one("1: one\ntrue: yes");
    let map = tree.as_mapping().unwrap();
    assert_eq!(map["1"], ValueTree::scalar("one"));
    assert_eq!(map["true"], ValueTree::scalar("yes"));
}

#[test]
fn test_multi_document_stream() {
    let docs = decode_documents("- id: a\n---\n- id: b\n").unwrap();
    assert_eq!(docs.len(), 2);
}

#[test]
fn test_decode_error() {
    let result = decode_documents("key: [unclosed");
    assert!(matches!(result, Err(Error::Decode(_))));
}

#[test]
fn test_scalar_to_yaml_types() {
    assert_eq!(tree_to_yaml(&"true".into()), YamlValue::Bool(true));
    assert_eq!(tree_to_yaml(&"42".into()), YamlValue::Number(42.into()));
    assert_eq!(tree_to_yaml(&"0.5".into()), YamlValue::Number(0.5.into()));
    // Leading zeros would be lost as a number.
    assert_eq!(
        tree_to_yaml(&"007".into()),
        YamlValue::String("007".to_string())
    );
    assert_eq!(
        tree_to_yaml(&"objects/mug.png".into()),
        YamlValue::String("objects/mug.png".to_string())
    );
}

#[test]
fn test_display() {
    let tree = decode_one("a: [x, y]\nb: {c: d}");
    assert_eq!(tree.to_string(), "{a: [x, y], b: {c: d}}");
}

#[test]
fn test_is_empty_and_scalar_items() {
    assert!(ValueTree::scalar("").is_empty());
    assert!(!ValueTree::scalar("x").is_empty());
    let seq = ValueTree::Sequence(vec!["a".into(), ValueTree::Sequence(vec![]), "b".into()]);
    assert_eq!(seq.scalar_items(), vec!["a", "b"]);
    assert_eq!(ValueTree::scalar("solo").scalar_items(), vec!["solo"]);
}
