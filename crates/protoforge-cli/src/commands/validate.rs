use std::path::PathBuf;

use anyhow::{Context, bail};
use protoforge_document::{load_file, validate};

#[derive(clap::Args)]
pub struct Args {
    /// Prototype YAML file
    pub file: PathBuf,

    /// Only report invalid prototypes
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let prototypes = load_file(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let mut invalid = 0;
    for proto in &prototypes {
        let result = validate(proto);
        if !result.valid {
            invalid += 1;
        }
        if !result.valid || !args.quiet {
            println!("{}: {}", proto.id, result.message);
        }
    }

    if invalid > 0 {
        bail!("{invalid} of {} prototypes are invalid", prototypes.len());
    }
    Ok(())
}
