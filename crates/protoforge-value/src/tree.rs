use std::fmt;

use indexmap::IndexMap;

/// Ordered string-keyed mapping. Keys are unique and keep insertion order.
pub type Mapping = IndexMap<String, ValueTree>;

/// One node of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueTree {
    /// Scalar text. Booleans, numbers and nulls are kept as their source text.
    Scalar(String),
    /// Ordered list of nodes.
    Sequence(Vec<ValueTree>),
    /// Ordered mapping of nodes.
    Mapping(Mapping),
}

impl ValueTree {
    pub fn scalar(text: impl Into<String>) -> Self {
        ValueTree::Scalar(text.into())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ValueTree::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ValueTree]> {
        match self {
            ValueTree::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            ValueTree::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key of a mapping node.
    pub fn get(&self, key: &str) -> Option<&ValueTree> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// True for an empty scalar, sequence or mapping.
    pub fn is_empty(&self) -> bool {
        match self {
            ValueTree::Scalar(s) => s.is_empty(),
            ValueTree::Sequence(items) => items.is_empty(),
            ValueTree::Mapping(map) => map.is_empty(),
        }
    }

    /// Scalar items of a sequence, or the scalar itself as a one-item list.
    ///
    /// Nested sequences and mappings are skipped.
    pub fn scalar_items(&self) -> Vec<&str> {
        match self {
            ValueTree::Scalar(s) => vec![s.as_str()],
            ValueTree::Sequence(items) => items.iter().filter_map(ValueTree::as_scalar).collect(),
            ValueTree::Mapping(_) => Vec::new(),
        }
    }
}

impl fmt::Display for ValueTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueTree::Scalar(s) => f.write_str(s),
            ValueTree::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            ValueTree::Mapping(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<&str> for ValueTree {
    fn from(value: &str) -> Self {
        ValueTree::Scalar(value.to_string())
    }
}

impl From<String> for ValueTree {
    fn from(value: String) -> Self {
        ValueTree::Scalar(value)
    }
}

impl From<Vec<ValueTree>> for ValueTree {
    fn from(value: Vec<ValueTree>) -> Self {
        ValueTree::Sequence(value)
    }
}

impl From<Mapping> for ValueTree {
    fn from(value: Mapping) -> Self {
        ValueTree::Mapping(value)
    }
}
