//! Scan command - builds the component schema catalog of a repository.

use std::path::PathBuf;

use protoforge_schema::SchemaRegistry;

use crate::util::resolve_root;

#[derive(clap::Args)]
pub struct Args {
    /// Game repository root (defaults to the stored root)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Print entries as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let root = resolve_root(args.root)?;
    let catalog = SchemaRegistry::global().build(&root);

    if args.json {
        let entries: Vec<_> = catalog.entries().collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if catalog.is_empty() {
        println!("No component declarations found under {}.", root.display());
        return Ok(());
    }
    println!("{:<40} {:>6}  SUMMARY", "COMPONENT", "FIELDS");
    for entry in catalog.entries() {
        println!(
            "{:<40} {:>6}  {}",
            entry.component_name,
            entry.fields.len(),
            entry.summary
        );
    }
    println!("\n{} entries", catalog.len());
    Ok(())
}
