//! Attribute inheritance between prototypes of one batch.
//!
//! Only `name`, `description` and `suffix` are inherited. Ancestors are
//! completed before their descendants, and each empty attribute of a child is
//! taken from the first listed parent that has it. Parent ids missing from the
//! batch are skipped. A parent edge that closes a cycle is ignored.

use std::collections::HashMap;

use tracing::debug;

use crate::{Component, Prototype, PrototypeBatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Complete inheritable attributes of every prototype in the batch, in place.
pub fn resolve(batch: &mut PrototypeBatch) {
    let mut marks = HashMap::with_capacity(batch.len());
    let mut order = Vec::with_capacity(batch.len());
    let graph: &PrototypeBatch = batch;
    for id in graph.keys() {
        visit(id, graph, &mut marks, &mut order);
    }
    for id in order {
        inherit_from_parents(batch, &id);
    }
}

/// Post-order walk of the parent graph, iterative so long chains cannot
/// exhaust the stack.
fn visit<'a>(
    start: &'a str,
    batch: &'a PrototypeBatch,
    marks: &mut HashMap<String, Mark>,
    order: &mut Vec<String>,
) {
    if marks.contains_key(start) {
        return;
    }
    marks.insert(start.to_string(), Mark::InProgress);
    let mut stack: Vec<(&'a str, usize)> = vec![(start, 0)];
    while let Some((id, next)) = stack.pop() {
        let parents = batch.get(id).map_or(&[][..], |proto| proto.parents.as_slice());
        let Some(parent) = parents.get(next) else {
            marks.insert(id.to_string(), Mark::Done);
            order.push(id.to_string());
            continue;
        };
        stack.push((id, next + 1));
        if !batch.contains_key(parent) {
            debug!(id, parent = parent.as_str(), "parent not in batch");
            continue;
        }
        match marks.get(parent.as_str()) {
            Some(Mark::Done) => {}
            Some(Mark::InProgress) => debug!(id, "ignoring parent edge that closes a cycle"),
            None => {
                marks.insert(parent.clone(), Mark::InProgress);
                stack.push((parent.as_str(), 0));
            }
        }
    }
}

fn inherit_from_parents(batch: &mut PrototypeBatch, id: &str) {
    let Some(proto) = batch.get(id) else {
        return;
    };

    let mut name = None;
    let mut description = None;
    let mut suffix = None;
    for parent_id in &proto.parents {
        if parent_id == id {
            continue;
        }
        let Some(parent) = batch.get(parent_id) else {
            continue;
        };
        if proto.name.is_empty() && name.is_none() && !parent.name.is_empty() {
            name = Some(parent.name.clone());
        }
        if is_blank(&proto.description) && description.is_none() && !is_blank(&parent.description)
        {
            description = parent.description.clone();
        }
        if is_blank(&proto.suffix) && suffix.is_none() && !is_blank(&parent.suffix) {
            suffix = parent.suffix.clone();
        }
    }

    if let Some(proto) = batch.get_mut(id) {
        if let Some(name) = name {
            proto.name = name;
        }
        if description.is_some() {
            proto.description = description;
        }
        if suffix.is_some() {
            proto.suffix = suffix;
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

/// What a prototype takes over from its first parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritanceReport {
    pub parent_id: String,
    /// Inherited property labels, e.g. `name` or `sprite (entire component)`.
    pub inherited: Vec<String>,
}

const SPRITE_COMPONENT: &str = "Sprite";
const SPRITE_PATH_KEYS: [&str; 3] = ["sprite", "texture", "rsi"];
const SPRITE_MODIFIER_KEYS: [&str; 3] = ["scale", "offset", "rotation"];

/// Describe what `proto` inherits from its first listed parent.
///
/// The parent id is matched against the batch ignoring ASCII case. Returns
/// `None` when there is no parent, the parent is unknown, or nothing is
/// inherited.
pub fn inheritance_report(proto: &Prototype, batch: &PrototypeBatch) -> Option<InheritanceReport> {
    let parent_id = proto.parents.first()?;
    let parent = batch
        .values()
        .find(|p| p.id.eq_ignore_ascii_case(parent_id))?;

    let mut inherited = Vec::new();
    if proto.name.is_empty() && !parent.name.is_empty() {
        inherited.push("name".to_string());
    }
    if is_blank(&proto.description) && !is_blank(&parent.description) {
        inherited.push("description".to_string());
    }
    if is_blank(&proto.suffix) && !is_blank(&parent.suffix) {
        inherited.push("suffix".to_string());
    }
    if let Some(sprite) = sprite_inheritance(
        proto.component(SPRITE_COMPONENT),
        parent.component(SPRITE_COMPONENT),
    ) {
        inherited.push(sprite.to_string());
    }

    if inherited.is_empty() {
        return None;
    }
    Some(InheritanceReport {
        parent_id: parent_id.clone(),
        inherited,
    })
}

fn sprite_inheritance(child: Option<&Component>, parent: Option<&Component>) -> Option<&'static str> {
    let parent = parent?;
    let Some(child) = child else {
        return Some("sprite (entire component)");
    };

    let child_has_path = has_sprite_path(child);
    let parent_has_path = has_sprite_path(parent);

    if !child_has_path && parent_has_path {
        let child_state = field_text(child, "state");
        let parent_state = field_text(parent, "state");
        let same_state = match (child_state.as_deref(), parent_state.as_deref()) {
            (None, _) => true,
            (Some(c), Some(p)) => c.eq_ignore_ascii_case(p),
            (Some(_), None) => false,
        };
        if !same_state {
            return None;
        }
        let modified = SPRITE_MODIFIER_KEYS
            .iter()
            .any(|key| child.field_ignore_case(key).is_some());
        return Some(if modified {
            "sprite (path inherited, modified)"
        } else {
            "sprite"
        });
    }

    if child_has_path && parent_has_path {
        let child_path = field_text(child, "sprite")?;
        let parent_path = field_text(parent, "sprite")?;
        if child_path.eq_ignore_ascii_case(&parent_path) {
            return Some("sprite (same path as parent)");
        }
    }
    None
}

fn has_sprite_path(component: &Component) -> bool {
    SPRITE_PATH_KEYS
        .iter()
        .any(|key| field_text(component, key).is_some())
}

/// Non-empty text form of a field.
fn field_text(component: &Component, key: &str) -> Option<String> {
    component
        .field_ignore_case(key)
        .map(|v| v.to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::into_batch;
    use protoforge_value::ValueTree;

    fn proto(id: &str, name: &str, parents: &[&str]) -> Prototype {
        let mut p = Prototype::new(id, "entity");
        p.name = name.to_string();
        p.parents = parents.iter().map(|s| s.to_string()).collect();
        p
    }

    fn sprite(fields: &[(&str, &str)]) -> Component {
        let mut c = Component::new("Sprite");
        for (k, v) in fields {
            c.fields.insert(k.to_string(), ValueTree::scalar(*v));
        }
        c
    }

    #[test]
    fn test_single_parent() {
        let mut batch = into_batch([proto("A", "", &["B"]), proto("B", "Foo", &[])]);
        resolve(&mut batch);
        assert_eq!(batch["A"].name, "Foo");
    }

    #[test]
    fn test_unresolved_parent_is_skipped() {
        let mut batch = into_batch([proto("A", "", &["ghost"])]);
        let before = batch.clone();
        resolve(&mut batch);
        assert_eq!(batch, before);
    }

    #[test]
    fn test_grandparent_reaches_child_regardless_of_order() {
        let mut batch = into_batch([
            proto("Child", "", &["Parent"]),
            proto("Parent", "", &["Grand"]),
            proto("Grand", "Grand name", &[]),
        ]);
        resolve(&mut batch);
        assert_eq!(batch["Parent"].name, "Grand name");
        assert_eq!(batch["Child"].name, "Grand name");
    }

    #[test]
    fn test_first_listed_parent_wins_per_attribute() {
        let mut first = proto("First", "first", &[]);
        first.description = Some(String::new());
        let mut second = proto("Second", "second", &[]);
        second.description = Some("from second".to_string());
        second.suffix = Some("S".to_string());
        let mut batch = into_batch([proto("Child", "", &["First", "Second"]), first, second]);
        resolve(&mut batch);
        let child = &batch["Child"];
        assert_eq!(child.name, "first");
        assert_eq!(child.description.as_deref(), Some("from second"));
        assert_eq!(child.suffix.as_deref(), Some("S"));
    }

    #[test]
    fn test_child_values_are_kept() {
        let mut child = proto("Child", "own", &["Parent"]);
        child.suffix = Some("mine".to_string());
        let mut parent = proto("Parent", "theirs", &[]);
        parent.suffix = Some("theirs".to_string());
        let mut batch = into_batch([child, parent]);
        resolve(&mut batch);
        assert_eq!(batch["Child"].name, "own");
        assert_eq!(batch["Child"].suffix.as_deref(), Some("mine"));
    }

    #[test]
    fn test_cycle_terminates() {
        let mut batch = into_batch([
            proto("A", "", &["B"]),
            proto("B", "", &["A"]),
            proto("Self", "", &["Self"]),
        ]);
        resolve(&mut batch);
        assert_eq!(batch["A"].name, "");
        assert_eq!(batch["B"].name, "");
    }

    #[test]
    fn test_cycle_still_copies_available_values() {
        let mut batch = into_batch([proto("A", "", &["B"]), proto("B", "bee", &["A"])]);
        resolve(&mut batch);
        assert_eq!(batch["A"].name, "bee");
        assert_eq!(batch["B"].name, "bee");
    }

    #[test]
    fn test_long_chain() {
        let depth = 10_000;
        let mut protos: Vec<_> = (0..depth)
            .map(|i| {
                let parent = format!("P{}", i + 1);
                proto(&format!("P{i}"), "", &[parent.as_str()])
            })
            .collect();
        protos.push(proto(&format!("P{depth}"), "root", &[]));
        let mut batch = into_batch(protos);
        resolve(&mut batch);
        assert_eq!(batch["P0"].name, "root");
        assert_eq!(batch["P5000"].name, "root");
    }

    #[test]
    fn test_no_components_fabricated() {
        let mut parent = proto("Parent", "p", &[]);
        parent.components.push(sprite(&[("sprite", "a.rsi")]));
        let mut batch = into_batch([proto("Child", "", &["Parent"]), parent]);
        resolve(&mut batch);
        assert!(batch["Child"].components.is_empty());
    }

    #[test]
    fn test_report_basic_properties() {
        let mut parent = proto("Parent", "p", &[]);
        parent.description = Some("desc".to_string());
        let child = proto("Child", "", &["parent"]);
        let batch = into_batch([child.clone(), parent]);
        let report = inheritance_report(&child, &batch).unwrap();
        assert_eq!(report.parent_id, "parent");
        assert_eq!(report.inherited, vec!["name", "description"]);
    }

    #[test]
    fn test_report_sprite_variants() {
        let mut parent = proto("Parent", "p", &[]);
        parent
            .components
            .push(sprite(&[("sprite", "objects/mug.rsi"), ("state", "icon")]));

        let whole = proto("Whole", "w", &["Parent"]);

        let mut same_state = proto("SameState", "s", &["Parent"]);
        same_state.components.push(sprite(&[("state", "ICON")]));

        let mut modified = proto("Modified", "m", &["Parent"]);
        modified.components.push(sprite(&[("scale", "2, 2")]));

        let mut other_state = proto("OtherState", "o", &["Parent"]);
        other_state.components.push(sprite(&[("state", "broken")]));

        let mut same_path = proto("SamePath", "sp", &["Parent"]);
        same_path
            .components
            .push(sprite(&[("sprite", "Objects/Mug.rsi")]));

        let batch = into_batch([
            parent,
            whole.clone(),
            same_state.clone(),
            modified.clone(),
            other_state.clone(),
            same_path.clone(),
        ]);

        let labels = |p: &Prototype| inheritance_report(p, &batch).map(|r| r.inherited);
        assert_eq!(labels(&whole), Some(vec!["sprite (entire component)".to_string()]));
        assert_eq!(labels(&same_state), Some(vec!["sprite".to_string()]));
        assert_eq!(
            labels(&modified),
            Some(vec!["sprite (path inherited, modified)".to_string()])
        );
        assert_eq!(labels(&other_state), None);
        assert_eq!(
            labels(&same_path),
            Some(vec!["sprite (same path as parent)".to_string()])
        );
    }

    #[test]
    fn test_report_without_parent() {
        let lone = proto("Lone", "", &[]);
        let batch = into_batch([lone.clone()]);
        assert!(inheritance_report(&lone, &batch).is_none());
    }
}
