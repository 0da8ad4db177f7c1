//! Pattern-based scan of component declarations in C# sources.
//!
//! This is a text matcher, not a parser. A declaration counts when it is a
//! public or internal class, struct or record whose name ends in one of the
//! configured suffixes and a `///` doc comment sits right above it, with only
//! attribute lines in between. Attributes may also share the declaration line. A `<summary>` block gives a strict match. A
//! plain doc line gives a fallback match that never replaces a strict one.
//!
//! Fields are read from the declaration body, which runs to the next type
//! declaration in the file. `[DataField]` members come first; `{ get; set; }`
//! properties only fill names the marker pass did not claim.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use ahash::AHashSet;
use indexmap::IndexMap;
use regex::{Captures, Regex};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{EntryMap, FieldSchema, ScanConfig, SchemaEntry, TypeCategory};

static TYPE_DECL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:\[[^\]\n]*\][ \t]*)*(?P<mods>(?:[A-Za-z]+[ \t]+)*)(?P<kind>class|struct|record|interface|enum)[ \t]+(?P<name>\w+)",
    )
    .unwrap()
});

static DATA_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\[(?:\w+(?:\([^)]*\))?\s*,\s*)*DataField(?:\((?P<args>[^)]*)\))?[^\]]*\]\s*",
        r"(?:\[[^\]\n]*\]\s*)*(?:///[^\n]*\n\s*)*",
        r"public\s+(?:(?:readonly|static|virtual|override|required|new)\s+)*",
        r"(?P<ty>[\w.]+(?:<[^;={}()]*?>)?(?:\[\])?\??)\s+(?P<name>\w+)\s*",
        r"(?:\{[^}]*\}\s*(?:=\s*(?P<pinit>[^;]+);)?|=\s*(?P<init>[^;]+);|;)",
    ))
    .unwrap()
});

static ACCESSOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"public\s+(?:(?:virtual|override|static|new|required)\s+)*",
        r"(?P<ty>[\w.]+(?:<[^;={}()]*?>)?(?:\[\])?\??)\s+(?P<name>\w+)\s*\{\s*get;\s*set;\s*\}",
    ))
    .unwrap()
});

static DATA_FIELD_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*"(?P<key>[^"]*)""#).unwrap());

static REQUIRED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\brequired\s*:\s*true\b").unwrap());

static XML_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const COMPONENT_SUFFIX: &str = "Component";

/// Scanner over the configured source directories of a repository.
#[derive(Debug, Clone, Default)]
pub struct SourceScanner {
    config: ScanConfig,
}

impl SourceScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan every candidate directory under `root`.
    ///
    /// Missing directories are skipped silently; unreadable ones and files
    /// are logged and skipped. Invalid UTF-8 is decoded lossily. A file
    /// reachable from two candidate directories is read once.
    pub fn scan(&self, root: &Path) -> EntryMap {
        let mut matches = Matches::default();
        let mut seen = AHashSet::new();
        for dir in &self.config.source_dirs {
            let dir = root.join(dir);
            if !dir.is_dir() {
                continue;
            }
            for path in self.source_files(&dir) {
                if !seen.insert(path.clone()) {
                    continue;
                }
                match std::fs::read(&path) {
                    Ok(bytes) => {
                        let text = String::from_utf8_lossy(&bytes);
                        self.collect(&path, &text, &mut matches);
                    }
                    Err(e) => warn!(path = %path.display(), "skipping unreadable source file: {e}"),
                }
            }
        }
        matches.finish()
    }

    /// Scan one source text as if it were the only file.
    pub fn scan_text(&self, source_file: &Path, text: &str) -> EntryMap {
        let mut matches = Matches::default();
        self.collect(source_file, text, &mut matches);
        matches.finish()
    }

    fn source_files(&self, dir: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(dir = %dir.display(), "skipping unreadable entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let has_extension = path
                .extension()
                .is_some_and(|ext| ext == self.config.source_extension.as_str());
            let file_name = entry.file_name().to_string_lossy();
            let named_like_declaration = self
                .config
                .declaration_suffixes
                .iter()
                .any(|suffix| file_name.contains(suffix.as_str()));
            if has_extension && named_like_declaration {
                files.push(path.to_path_buf());
            }
        }
        files
    }

    fn collect(&self, source_file: &Path, text: &str, matches: &mut Matches) {
        let declarations: Vec<_> = TYPE_DECL_RE.captures_iter(text).collect();
        let mut found = 0;
        for (index, decl) in declarations.iter().enumerate() {
            let Some(name) = self.declared_name(decl) else {
                continue;
            };
            let Some(whole) = decl.get(0) else {
                continue;
            };
            let doc = doc_lines_before(text, whole.start());
            let strict = strict_summary(&doc);
            let fallback = if strict.is_none() {
                fallback_summary(&doc)
            } else {
                None
            };
            if strict.is_none() && fallback.is_none() {
                continue;
            }

            let body_end = declarations
                .get(index + 1)
                .and_then(|next| next.get(0))
                .map_or(text.len(), |next| next.start());
            let body = &text[whole.end()..body_end];

            let component_name = canonical_component_name(name);
            let entry = SchemaEntry {
                component_name: component_name.clone(),
                declaration_name: name.to_string(),
                summary: String::new(),
                source_file: source_file.to_path_buf(),
                fields: scan_fields(body),
                commonly_observed_fields: Vec::new(),
            };
            found += 1;
            match (strict, fallback) {
                (Some(summary), _) => {
                    matches
                        .strict
                        .insert(component_name, SchemaEntry { summary, ..entry });
                }
                (None, Some(summary)) => {
                    matches
                        .fallback
                        .entry(component_name)
                        .or_insert(SchemaEntry { summary, ..entry });
                }
                (None, None) => {}
            }
        }
        debug!(path = %source_file.display(), found, "scanned source file");
    }

    /// Name of a public or internal class, struct or record with a wanted suffix.
    fn declared_name<'t>(&self, decl: &Captures<'t>) -> Option<&'t str> {
        let kind = decl.name("kind")?.as_str();
        if !matches!(kind, "class" | "struct" | "record") {
            return None;
        }
        let visible = decl
            .name("mods")?
            .as_str()
            .split_whitespace()
            .any(|m| m == "public" || m == "internal");
        let name = decl.name("name")?.as_str();
        let wanted = self
            .config
            .declaration_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()));
        (visible && wanted).then_some(name)
    }
}

/// Strict matches overwrite each other, fallbacks keep the first one seen and
/// never replace a strict match.
#[derive(Default)]
struct Matches {
    strict: EntryMap,
    fallback: EntryMap,
}

impl Matches {
    fn finish(self) -> EntryMap {
        let mut entries = self.strict;
        for (name, entry) in self.fallback {
            entries.entry(name).or_insert(entry);
        }
        entries
    }
}

fn scan_fields(body: &str) -> IndexMap<String, FieldSchema> {
    let mut fields = IndexMap::new();

    for caps in DATA_FIELD_RE.captures_iter(body) {
        let (Some(ty), Some(member), Some(whole)) = (caps.name("ty"), caps.name("name"), caps.get(0))
        else {
            continue;
        };
        let args = caps.name("args").map_or("", |m| m.as_str());
        let name = DATA_FIELD_KEY_RE
            .captures(args)
            .and_then(|key| key.name("key"))
            .map(|key| key.as_str().to_string())
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| canonical_field_name(member.as_str()));
        let default_value = caps
            .name("init")
            .or_else(|| caps.name("pinit"))
            .map(|init| init.as_str().trim().to_string());
        let description = field_description(&doc_lines_before(body, whole.start()));
        fields.insert(
            name.clone(),
            FieldSchema {
                name,
                type_category: categorize_type(ty.as_str()),
                declared_type: ty.as_str().to_string(),
                description,
                default_value,
                required: REQUIRED_RE.is_match(args),
            },
        );
    }

    for caps in ACCESSOR_RE.captures_iter(body) {
        let (Some(ty), Some(member)) = (caps.name("ty"), caps.name("name")) else {
            continue;
        };
        let name = canonical_field_name(member.as_str());
        fields.entry(name.clone()).or_insert_with(|| FieldSchema {
            name,
            type_category: categorize_type(ty.as_str()),
            declared_type: ty.as_str().to_string(),
            description: String::new(),
            default_value: None,
            required: false,
        });
    }

    fields
}

/// `///` lines directly above the line containing `offset`, top to bottom.
///
/// Attribute lines between the comment and the declaration are skipped.
fn doc_lines_before(text: &str, offset: usize) -> Vec<&str> {
    let line_start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    let mut lines = Vec::new();
    for line in text[..line_start].lines().rev() {
        let line = line.trim();
        if let Some(doc) = line.strip_prefix("///") {
            lines.push(doc);
        } else if line.starts_with('[') && lines.is_empty() {
            continue;
        } else {
            break;
        }
    }
    lines.reverse();
    lines
}

fn strict_summary(doc: &[&str]) -> Option<String> {
    let joined = doc.join("\n");
    let start = joined.find("<summary>")? + "<summary>".len();
    let end = start + joined[start..].find("</summary>")?;
    Some(flatten(&joined[start..end])).filter(|s| !s.is_empty())
}

/// Nearest doc line that still has text once XML tags are removed.
fn fallback_summary(doc: &[&str]) -> Option<String> {
    doc.iter().rev().map(|line| flatten(line)).find(|s| !s.is_empty())
}

fn field_description(doc: &[&str]) -> String {
    strict_summary(doc).unwrap_or_else(|| flatten(&doc.join(" ")))
}

/// Strip XML tags and collapse whitespace to single spaces.
fn flatten(text: &str) -> String {
    let text = XML_TAG_RE.replace_all(text, " ");
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

fn canonical_component_name(declaration: &str) -> String {
    match declaration.strip_suffix(COMPONENT_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => declaration.to_string(),
    }
}

/// YAML spelling of a member name: leading underscores dropped, first letter
/// lowered.
pub fn canonical_field_name(member: &str) -> String {
    let member = member.trim_start_matches('_');
    let mut chars = member.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Bucket declared type text into a [`TypeCategory`].
pub fn categorize_type(declared: &str) -> TypeCategory {
    let ty = declared.trim().trim_end_matches('?').trim();
    if ty.ends_with("[]") {
        return TypeCategory::List;
    }
    let (head, generic) = ty.split_at(ty.find('<').unwrap_or(ty.len()));
    let head = head.rsplit('.').next().unwrap_or(head);

    if !generic.is_empty() {
        return match head {
            "List" | "IList" | "IReadOnlyList" | "HashSet" | "ISet" => TypeCategory::List,
            "Dictionary" | "IDictionary" | "IReadOnlyDictionary" => TypeCategory::Dictionary,
            "ProtoId" | "EntProtoId" => TypeCategory::String,
            _ => TypeCategory::Unknown,
        };
    }
    match head {
        "string" | "String" | "LocId" | "EntProtoId" | "ResPath" => TypeCategory::String,
        "int" | "uint" | "long" | "ulong" | "short" | "ushort" | "byte" | "sbyte" | "float"
        | "double" | "decimal" | "Int16" | "Int32" | "Int64" | "UInt16" | "UInt32" | "UInt64"
        | "Single" | "Double" | "Decimal" | "FixedPoint2" => TypeCategory::Number,
        "bool" | "Boolean" => TypeCategory::Boolean,
        _ => TypeCategory::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> EntryMap {
        SourceScanner::default().scan_text(Path::new("PowerComponent.cs"), text)
    }

    #[test]
    fn test_canonical_field_name() {
        assert_eq!(canonical_field_name("_maxCharge"), "maxCharge");
        assert_eq!(canonical_field_name("Power"), "power");
        assert_eq!(canonical_field_name("_"), "");
    }

    #[test]
    fn test_categorize_type() {
        assert_eq!(categorize_type("string?"), TypeCategory::String);
        assert_eq!(categorize_type("ProtoId<TagPrototype>"), TypeCategory::String);
        assert_eq!(categorize_type("ResPath"), TypeCategory::String);
        assert_eq!(categorize_type("FixedPoint2"), TypeCategory::Number);
        assert_eq!(categorize_type("float"), TypeCategory::Number);
        assert_eq!(categorize_type("bool"), TypeCategory::Boolean);
        assert_eq!(categorize_type("List<string>"), TypeCategory::List);
        assert_eq!(categorize_type("HashSet<EntProtoId>"), TypeCategory::List);
        assert_eq!(categorize_type("int[]"), TypeCategory::List);
        assert_eq!(
            categorize_type("Dictionary<string, List<int>>"),
            TypeCategory::Dictionary
        );
        assert_eq!(categorize_type("System.Collections.Generic.List<int>"), TypeCategory::List);
        assert_eq!(categorize_type("SoundSpecifier"), TypeCategory::Unknown);
    }

    #[test]
    fn test_strict_summary_with_attributes() {
        let entries = scan(
            r#"
/// <summary>
///     Stores electrical
///     charge.
/// </summary>
[RegisterComponent, NetworkedComponent]
public sealed partial class BatteryComponent : Component
{
}
"#,
        );
        let battery = &entries["Battery"];
        assert_eq!(battery.declaration_name, "BatteryComponent");
        assert_eq!(battery.summary, "Stores electrical charge.");
    }

    #[test]
    fn test_attribute_on_declaration_line() {
        let entries = scan(
            r#"
/// <summary>
/// Holds a battery.
/// </summary>
[RegisterComponent] [Access(typeof(BatterySystem))] public sealed partial class BatteryComponent : Component
{
    [DataField]
    public float MaxCharge;
}
"#,
        );
        let battery = &entries["Battery"];
        assert_eq!(battery.summary, "Holds a battery.");
        assert_eq!(battery.fields.keys().collect::<Vec<_>>(), vec!["maxCharge"]);
    }

    #[test]
    fn test_fallback_line_strips_tags() {
        let entries = scan(
            r#"
/// Makes a <see cref="Lamp"/> glow.
public sealed class GlowSystem : EntitySystem
{
}
"#,
        );
        assert_eq!(entries["GlowSystem"].summary, "Makes a glow.");
    }

    #[test]
    fn test_undocumented_and_private_declarations_ignored() {
        let entries = scan(
            r#"
public sealed class QuietComponent : Component
{
}

/// Hidden.
private sealed class HiddenComponent : Component
{
}

/// Not a component.
public sealed class Helper
{
}
"#,
        );
        assert!(entries.is_empty());
    }

    #[test]
    fn test_fallback_never_replaces_strict() {
        let text = r#"
/// <summary>
/// The real summary.
/// </summary>
public sealed partial class PowerComponent : Component
{
}

/// Client-side duplicate.
public sealed partial class PowerComponent : Component
{
}
"#;
        assert_eq!(scan(text)["Power"].summary, "The real summary.");
    }

    #[test]
    fn test_data_fields() {
        let entries = scan(
            r#"
/// <summary>
/// Powered device.
/// </summary>
[RegisterComponent]
public sealed partial class PowerComponent : Component
{
    /// <summary>
    /// Watts drawn.
    /// </summary>
    [DataField("load", required: true)]
    public float Load = 5f;

    [ViewVariables, DataField]
    public ProtoId<TagPrototype>? _tag;

    [DataField(customTypeSerializer: typeof(Foo))]
    public Dictionary<string, List<int>> Slots { get; set; } = new();

    [DataField]
    public bool Enabled { get; set; }

    public int Power { get; set; }
}
"#,
        );
        let fields = &entries["Power"].fields;
        assert_eq!(
            fields.keys().collect::<Vec<_>>(),
            vec!["load", "tag", "slots", "enabled", "power"]
        );

        let load = &fields["load"];
        assert!(load.required);
        assert_eq!(load.type_category, TypeCategory::Number);
        assert_eq!(load.default_value.as_deref(), Some("5f"));
        assert_eq!(load.description, "Watts drawn.");

        assert_eq!(fields["tag"].type_category, TypeCategory::String);
        assert_eq!(fields["slots"].type_category, TypeCategory::Dictionary);
        assert_eq!(fields["slots"].default_value.as_deref(), Some("new()"));
        assert!(!fields["power"].required);
        assert_eq!(fields["power"].type_category, TypeCategory::Number);
    }

    #[test]
    fn test_marker_field_beats_accessor() {
        let entries = scan(
            r#"
/// Holds a charge.
public sealed partial class ChargeComponent : Component
{
    [DataField("charge", required: true)]
    public int Charge { get; set; } = 10;
}
"#,
        );
        let charge = &entries["Charge"].fields["charge"];
        assert!(charge.required);
        assert_eq!(charge.default_value.as_deref(), Some("10"));
    }

    #[test]
    fn test_data_field_spanning_lines() {
        let entries = scan(
            r#"
/// Stores slots.
public sealed partial class SlotsComponent : Component
{
    [DataField("slots",
        required: true,
        customTypeSerializer: typeof(SlotSerializer))]
    public List<string> Slots = new();

    [DataField]
    public int Count;
}
"#,
        );
        let fields = &entries["Slots"].fields;
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["slots", "count"]);
        assert!(fields["slots"].required);
        assert_eq!(fields["slots"].type_category, TypeCategory::List);
    }

    #[test]
    fn test_fields_scoped_to_declaration_body() {
        let entries = scan(
            r#"
/// First.
public sealed partial class FirstComponent : Component
{
    [DataField]
    public int Alpha;
}

/// Second.
public sealed partial class SecondComponent : Component
{
    [DataField]
    public int Beta;
}
"#,
        );
        assert_eq!(entries["First"].fields.keys().collect::<Vec<_>>(), vec!["alpha"]);
        assert_eq!(entries["Second"].fields.keys().collect::<Vec<_>>(), vec!["beta"]);
    }
}
