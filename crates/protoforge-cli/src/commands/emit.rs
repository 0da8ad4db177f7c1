use std::path::PathBuf;

use anyhow::{Context, anyhow};
use protoforge_document::{load_and_resolve, to_yaml};

#[derive(clap::Args)]
pub struct Args {
    /// Prototype YAML file
    pub file: PathBuf,

    /// Id of the prototype to print
    pub id: String,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let mut batch = load_and_resolve(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let proto = batch
        .get_mut(&args.id)
        .ok_or_else(|| anyhow!("No prototype {} in {}", args.id, args.file.display()))?;

    proto.enable_present_fields();
    print!("{}", to_yaml(proto)?);
    Ok(())
}
