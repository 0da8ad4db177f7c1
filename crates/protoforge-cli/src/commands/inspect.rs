use std::path::PathBuf;

use anyhow::Context;
use protoforge_document::{inheritance_report, load_and_resolve};

#[derive(clap::Args)]
pub struct Args {
    /// Prototype YAML file
    pub file: PathBuf,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let batch = load_and_resolve(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    for proto in batch.values() {
        println!("{} ({})", proto.id, proto.kind);
        if !proto.name.is_empty() {
            println!("  name: {}", proto.name);
        }
        if let Some(description) = &proto.description {
            println!("  description: {description}");
        }
        if let Some(suffix) = &proto.suffix {
            println!("  suffix: {suffix}");
        }
        if !proto.parents.is_empty() {
            println!("  parents: {}", proto.parents.join(", "));
        }
        if proto.abstract_flag == Some(true) {
            println!("  abstract");
        }
        if !proto.components.is_empty() {
            let names: Vec<_> = proto.components.iter().map(|c| c.name.as_str()).collect();
            println!("  components: {}", names.join(", "));
        }
        if !proto.overflow.is_empty() {
            let keys: Vec<_> = proto.overflow.keys().map(String::as_str).collect();
            println!("  other keys: {}", keys.join(", "));
        }
        if let Some(report) = inheritance_report(proto, &batch) {
            println!(
                "  inherits from {}: {}",
                report.parent_id,
                report.inherited.join(", ")
            );
        }
    }
    Ok(())
}
