use std::path::PathBuf;

use anyhow::anyhow;
use protoforge_schema::SchemaRegistry;

use crate::util::resolve_root;

#[derive(clap::Args)]
pub struct Args {
    /// Component name, with or without the `Component` suffix
    pub component: String,

    /// Game repository root (defaults to the stored root)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Print the entry as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let root = resolve_root(args.root)?;
    let catalog = SchemaRegistry::global().build(&root);
    let entry = catalog
        .lookup(&args.component)
        .ok_or_else(|| anyhow!("Unknown component: {}", args.component))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(entry)?);
        return Ok(());
    }

    println!("{} ({})", entry.component_name, entry.declaration_name);
    println!("  {}", entry.summary);
    println!("  declared in {}", entry.source_file.display());
    if !entry.fields.is_empty() {
        println!();
        for field in entry.fields.values() {
            let mut line = format!("  {:<32} {:<10}", field.name, field.type_category);
            if field.required {
                line.push_str(" required");
            }
            if let Some(default) = &field.default_value {
                line.push_str(&format!(" = {default}"));
            }
            println!("{line}");
        }
    }
    if !entry.commonly_observed_fields.is_empty() {
        println!("\n  seen in prototypes: {}", entry.commonly_observed_fields.join(", "));
    }
    Ok(())
}
